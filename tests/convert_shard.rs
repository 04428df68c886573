//! End-to-end shard conversion
//!
//! Builds shard files containing encoded entities and checks the
//! document trees the converter produces.

mod common;

use chrono::{TimeZone, Utc};
use common::{entity_record, LogBuilder};
use fs2json::convert::{convert_shard, ConvertError};
use fs2json::entity::{BinaryEntityDecoder, Key, PathElement, TypedValue};
use fs2json::tree::TreeError;
use serde_json::{json, Value};
use tempfile::TempDir;

#[test]
fn test_country_city_scenario() {
    // Root, child, then a duplicate of the root collapsing its state.
    let mut builder = LogBuilder::new();
    builder
        .record(&entity_record(
            &[("Country", "US")],
            &[("name", TypedValue::Text("United States".to_string()))],
        ))
        .record(&entity_record(
            &[("Country", "US"), ("City", "NYC")],
            &[("name", TypedValue::Text("New York".to_string()))],
        ))
        .record(&entity_record(
            &[("Country", "US")],
            &[
                ("name", TypedValue::Text("USA".to_string())),
                ("population", TypedValue::Integer(331000000)),
            ],
        ));

    let temp_dir = TempDir::new().unwrap();
    let path = builder.write(temp_dir.path(), "output-0");

    let (tree, stats) = convert_shard(&path, &BinaryEntityDecoder::new()).unwrap();
    assert_eq!(stats.documents, 3);
    assert_eq!(
        Value::Object(tree),
        json!({
            "Country:US": {
                "name": "USA",
                "City:NYC": {"name": "New York"},
                "population": 331000000
            }
        })
    );
}

#[test]
fn test_top_level_key_order_is_first_appearance() {
    let mut builder = LogBuilder::new();
    builder
        .record(&entity_record(&[("Zoo", "z1")], &[]))
        .record(&entity_record(&[("Aquarium", "a1")], &[]))
        .record(&entity_record(&[("Zoo", "z1")], &[]));

    let temp_dir = TempDir::new().unwrap();
    let path = builder.write(temp_dir.path(), "output-0");

    let (tree, _) = convert_shard(&path, &BinaryEntityDecoder::new()).unwrap();
    let keys: Vec<_> = tree.keys().cloned().collect();
    assert_eq!(keys, vec!["Zoo:z1", "Aquarium:a1"]);
}

#[test]
fn test_every_value_kind_normalizes() {
    let instant = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let reference = Key::new(vec![
        PathElement::named("Country", "US"),
        PathElement::numbered("City", 44),
    ]);
    let mut builder = LogBuilder::new();
    builder.record(&entity_record(
        &[("Sample", "s1")],
        &[
            ("none", TypedValue::Null),
            ("flag", TypedValue::Boolean(true)),
            ("count", TypedValue::Integer(-5)),
            ("ratio", TypedValue::Float(2.5)),
            ("label", TypedValue::Text("text".to_string())),
            ("raw", TypedValue::Blob(vec![0xde, 0xad, 0xbe, 0xef])),
            ("seen", TypedValue::Timestamp(instant)),
            (
                "where",
                TypedValue::GeoPoint {
                    lat: 40.7128,
                    lng: -74.0060,
                },
            ),
            ("capital", TypedValue::Reference(reference)),
            (
                "address",
                TypedValue::Entity(vec![(
                    "zip".to_string(),
                    TypedValue::Text("10001".to_string()),
                )]),
            ),
            (
                "tags",
                TypedValue::List(vec![
                    TypedValue::Text("a".to_string()),
                    TypedValue::Integer(2),
                ]),
            ),
        ],
    ));

    let temp_dir = TempDir::new().unwrap();
    let path = builder.write(temp_dir.path(), "output-0");

    let (tree, _) = convert_shard(&path, &BinaryEntityDecoder::new()).unwrap();
    assert_eq!(
        Value::Object(tree),
        json!({
            "Sample:s1": {
                "none": null,
                "flag": true,
                "count": -5,
                "ratio": 2.5,
                "label": "text",
                "raw": "3q2+7w==",
                "seen": "2023-11-14T22:13:20.000000Z",
                "where": {"lat": 40.7128, "lng": -74.0060},
                "capital": "Country:US/City:44",
                "address": {"zip": "10001"},
                "tags": ["a", 2]
            }
        })
    );
}

#[test]
fn test_record_spanning_blocks_decodes_like_any_other() {
    // A property large enough to force FIRST/MIDDLE/LAST chunks.
    let big = "x".repeat(2 * 32768);
    let mut builder = LogBuilder::new();
    builder.record(&entity_record(
        &[("Doc", "big")],
        &[("body", TypedValue::Text(big.clone()))],
    ));

    let temp_dir = TempDir::new().unwrap();
    let path = builder.write(temp_dir.path(), "output-0");

    let (tree, _) = convert_shard(&path, &BinaryEntityDecoder::new()).unwrap();
    assert_eq!(tree["Doc:big"]["body"], json!(big));
}

#[test]
fn test_undecodable_record_fails_with_index() {
    let mut builder = LogBuilder::new();
    builder
        .record(&entity_record(&[("Country", "US")], &[]))
        .record(b"definitely not an entity");

    let temp_dir = TempDir::new().unwrap();
    let path = builder.write(temp_dir.path(), "output-0");

    let err = convert_shard(&path, &BinaryEntityDecoder::new()).unwrap_err();
    match err {
        ConvertError::Decode { index, .. } => assert_eq!(index, 1),
        other => panic!("expected decode error, got {}", other),
    }
}

#[test]
fn test_empty_key_path_fails_structurally() {
    let empty_key = common::encode_entity(&Key::default(), &[]);
    let mut builder = LogBuilder::new();
    builder.record(&empty_key);

    let temp_dir = TempDir::new().unwrap();
    let path = builder.write(temp_dir.path(), "output-0");

    let err = convert_shard(&path, &BinaryEntityDecoder::new()).unwrap_err();
    match err {
        ConvertError::Structure { index, source } => {
            assert_eq!(index, 0);
            assert!(matches!(source, TreeError::EmptyKeyPath));
        }
        other => panic!("expected structural error, got {}", other),
    }
}

#[test]
fn test_corrupt_shard_reports_offset() {
    let mut builder = LogBuilder::new();
    builder.record(&entity_record(&[("Country", "US")], &[]));
    let mut bytes = builder.build();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("output-0");
    std::fs::write(&path, bytes).unwrap();

    let err = convert_shard(&path, &BinaryEntityDecoder::new()).unwrap_err();
    let display = format!("{}", err);
    assert!(display.contains("FSJ_LOG_CORRUPTION"));
    assert!(display.contains("byte_offset: 0"));
}

#[test]
fn test_empty_shard_produces_empty_tree() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("output-0");
    std::fs::write(&path, b"").unwrap();

    let (tree, stats) = convert_shard(&path, &BinaryEntityDecoder::new()).unwrap();
    assert!(tree.is_empty());
    assert_eq!(stats.documents, 0);
}
