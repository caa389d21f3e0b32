//! End-to-end tests for the dual-encoding string engine

use bistr::{BiStr, Encoding, EncodingPolicy, EngineConfig, SplitOptions};
use std::cmp::Ordering;

#[test]
fn test_index_of_forward_and_backward() {
    let s = BiStr::from("abcabc");
    assert_eq!(s.find_unit_in(b'b' as u16, 0, 6).unwrap(), Some(1));
    assert_eq!(s.rfind_unit_in(b'b' as u16, 5, 6).unwrap(), Some(4));
}

#[test]
fn test_replace_substring() {
    let s = BiStr::from("banana");
    let out = s.replace(&BiStr::from("na"), &BiStr::from("NA")).unwrap();
    assert_eq!(out.to_string(), "baNANA");
}

#[test]
fn test_pad_left_behavior() {
    let s = BiStr::from("42");
    assert_eq!(s.pad_left_with(5, b'0' as u16).unwrap().to_string(), "00042");
    // Width below the current length is a no-op, not an error.
    let unchanged = s.pad_left_with(1, b'0' as u16).unwrap();
    assert!(unchanged.ptr_eq(&s));
}

#[test]
fn test_split_remove_empty() {
    let s = BiStr::from("a,,b");
    let seps = [BiStr::from(",")];
    let dropped = s.split(&seps, SplitOptions::REMOVE_EMPTY).unwrap();
    assert_eq!(
        dropped.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    let kept = s.split(&seps, SplitOptions::empty()).unwrap();
    assert_eq!(
        kept.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        vec!["a", "", "b"]
    );
}

#[test]
fn test_join_basics() {
    let sep = BiStr::from("-");
    let parts: Vec<BiStr> = ["x", "y", "z"].iter().map(|&p| BiStr::from(p)).collect();
    assert_eq!(BiStr::join(&sep, &parts).unwrap().to_string(), "x-y-z");
    assert!(BiStr::join(&sep, &[]).unwrap().is_empty());
}

#[test]
fn test_concat_encoding_selection() {
    let compact = BiStr::from("abc");
    let wide = BiStr::from("dé");
    assert_eq!(compact.encoding(), Encoding::Compact);
    assert_eq!(wide.encoding(), Encoding::Wide);

    let mixed = compact.concat(&wide).unwrap();
    assert_eq!(mixed.encoding(), Encoding::Wide);
    assert_eq!(mixed.to_string(), "abcdé");

    let both_compact = compact.concat(&BiStr::from("def")).unwrap();
    assert_eq!(both_compact.encoding(), Encoding::Compact);
    assert_eq!(both_compact.to_string(), "abcdef");
}

#[test]
fn test_equality_ordering_hash_across_encodings() {
    let compact = BiStr::from("engine");
    let wide_units: Vec<u16> = "engine".encode_utf16().collect();
    // Force wide storage of ASCII content through the padding path.
    let wide = BiStr::from("engine")
        .pad_left(7)
        .unwrap()
        .substring(1)
        .unwrap();
    assert_eq!(wide.encoding(), Encoding::Wide);
    assert_eq!(wide.to_units(), wide_units);

    assert_eq!(compact, wide);
    assert_eq!(compact.cmp(&wide), Ordering::Equal);
    assert_eq!(compact.hash_code(), wide.hash_code());
}

#[test]
fn test_empty_singleton_shared_by_producers() {
    let from_sub = BiStr::from("abc").substring_range(1, 0).unwrap();
    let from_trim = BiStr::from("   ").trim();
    let from_remove = BiStr::from("x").remove(0, 1).unwrap();
    let canonical = BiStr::empty();
    assert!(from_sub.ptr_eq(&canonical));
    assert!(from_trim.ptr_eq(&canonical));
    assert!(from_remove.ptr_eq(&canonical));
}

#[test]
fn test_no_op_operations_return_receiver() {
    let s = BiStr::from("stable");
    assert!(s.trim().ptr_eq(&s));
    assert!(s.substring_range(0, 6).unwrap().ptr_eq(&s));
    assert!(s.pad_left(3).unwrap().ptr_eq(&s));
    assert!(s
        .replace(&BiStr::from("zz"), &BiStr::from("q"))
        .unwrap()
        .ptr_eq(&s));
    assert!(s.replace_unit(b'q' as u16, b'r' as u16).unwrap().ptr_eq(&s));
}

#[test]
fn test_windowed_search_errors_name_parameters() {
    let s = BiStr::from("abc");
    let err = s.find_unit_in(b'a' as u16, 4, 1).unwrap_err();
    assert_eq!(err.category(), "range");
    let err = s.find_unit_in(b'a' as u16, 1, 3).unwrap_err();
    assert_eq!(err.category(), "range");
}

#[test]
fn test_mixed_encoding_replace_uniform() {
    // Wide haystack, compact pattern, wide replacement.
    let s = BiStr::from("cafe café cafe");
    let out = s.replace(&BiStr::from("cafe"), &BiStr::from("café")).unwrap();
    assert_eq!(out.to_string(), "café café café");
    // Compact haystack, compact pattern, wide replacement widens.
    let s = BiStr::from("cafe");
    let out = s.replace(&BiStr::from("e"), &BiStr::from("é")).unwrap();
    assert_eq!(out.encoding(), Encoding::Wide);
    assert_eq!(out.to_string(), "café");
}

#[test]
fn test_demote_rescan_policy_end_to_end() {
    let config = EngineConfig {
        encoding_policy: EncodingPolicy::DemoteRescan,
        ..EngineConfig::default()
    };
    // Replace the only wide unit with ASCII; the rescan demotes the result.
    let s = BiStr::from("café");
    let preserve = s.replace(&BiStr::from("é"), &BiStr::from("e")).unwrap();
    let demoted = s
        .replace_with(&BiStr::from("é"), &BiStr::from("e"), &config)
        .unwrap();
    assert_eq!(preserve.encoding(), Encoding::Wide);
    assert_eq!(demoted.encoding(), Encoding::Compact);
    assert_eq!(preserve, demoted);
    assert_eq!(demoted.to_string(), "cafe");
}

#[test]
fn test_search_mutate_pipeline() {
    let csv = BiStr::from("  name, age , city  ");
    let trimmed = csv.trim();
    let fields = trimmed
        .split(&[BiStr::from(",")], SplitOptions::empty())
        .unwrap();
    let cleaned: Vec<BiStr> = fields.iter().map(|f| f.trim()).collect();
    let rendered: Vec<String> = cleaned.iter().map(|f| f.to_string()).collect();
    assert_eq!(rendered, vec!["name", "age", "city"]);
    let rejoined = BiStr::join(&BiStr::from("|"), &cleaned).unwrap();
    assert_eq!(rejoined.to_string(), "name|age|city");
    assert_eq!(rejoined.find(&BiStr::from("age")), Some(5));
}

#[test]
fn test_case_insensitive_surface() {
    let a = BiStr::from("Straße");
    let b = BiStr::from("STRAße");
    assert!(a.eq_ignore_case(&b));
    assert_eq!(a.hash_code_ignore_case(), b.hash_code_ignore_case());

    let hay = BiStr::from("Needle in a HAYSTACK");
    assert_eq!(hay.find_ignore_case(&BiStr::from("haystack")), Some(12));
}

#[test]
fn test_insert_remove_round_trip() {
    let s = BiStr::from("hello world");
    let removed = s.remove(5, 6).unwrap();
    assert_eq!(removed.to_string(), "hello");
    let restored = removed.insert(5, &BiStr::from(" world")).unwrap();
    assert_eq!(restored, s);
}

#[test]
fn test_unit_iteration_matches_indexing() {
    for text in ["", "ascii", "wide é text", "あいう"] {
        let s = BiStr::from(text);
        let via_iter: Vec<u16> = s.iter().collect();
        let via_index: Vec<u16> = (0..s.len()).filter_map(|i| s.unit_at(i)).collect();
        assert_eq!(via_iter, via_index);
        assert_eq!(via_iter, text.encode_utf16().collect::<Vec<u16>>());
    }
}

#[test]
fn test_substring_encoding_preserved_even_when_ascii() {
    // An ASCII-only slice of a wide string stays wide under Preserve.
    let s = BiStr::from("abcé");
    let slice = s.substring_range(0, 3).unwrap();
    assert_eq!(slice.encoding(), Encoding::Wide);
    assert_eq!(slice, BiStr::from("abc"));
}

#[test]
fn test_stable_hash_does_not_vary() {
    let h = BiStr::from("persisted key").hash_code();
    for _ in 0..3 {
        assert_eq!(BiStr::from("persisted key").hash_code(), h);
    }
}
