//! Serialization round-trips for the `serde` feature

#![cfg(feature = "serde")]

use bistr::{BiStr, Encoding, EncodingPolicy, EngineConfig};

#[test]
fn test_bistr_serializes_as_string() {
    let s = BiStr::from("héllo");
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(json, "\"héllo\"");
}

#[test]
fn test_bistr_round_trip() {
    for text in ["", "ascii only", "wide é content", "あいう"] {
        let s = BiStr::from(text);
        let json = serde_json::to_string(&s).unwrap();
        let back: BiStr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}

#[test]
fn test_deserialized_ascii_is_compact() {
    let back: BiStr = serde_json::from_str("\"plain\"").unwrap();
    assert_eq!(back.encoding(), Encoding::Compact);
}

#[test]
fn test_config_round_trip() {
    let config = EngineConfig {
        encoding_policy: EncodingPolicy::DemoteRescan,
        replace_offset_cap: 64,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
