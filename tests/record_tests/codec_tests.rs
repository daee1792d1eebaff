//! Record Codec Tests
//!
//! These tests verify:
//! - Byte layout of encoded records
//! - Full decode of encoded rows
//! - Projected (filtered) decode and its ordering contract
//! - Truncation detection

use benchkv::record::{decode_all, decode_filtered, encode, encoded_len, Field, Row};
use benchkv::BenchKvError;

// =============================================================================
// Helper Functions
// =============================================================================

fn row_of(pairs: &[(&str, &str)]) -> Row {
    pairs.iter().map(|(n, v)| Field::new(*n, *v)).collect()
}

fn names(list: &[&str]) -> Vec<Vec<u8>> {
    list.iter().map(|n| n.as_bytes().to_vec()).collect()
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_layout() {
    let row = row_of(&[("ab", "xyz")]);
    let encoded = encode(&row).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&2u32.to_le_bytes());
    expected.extend_from_slice(b"ab");
    expected.extend_from_slice(&3u32.to_le_bytes());
    expected.extend_from_slice(b"xyz");

    assert_eq!(&encoded[..], &expected[..]);
}

#[test]
fn test_encode_is_deterministic() {
    let row = row_of(&[("field0", "aaa"), ("field1", "bbb")]);
    assert_eq!(encode(&row).unwrap(), encode(&row).unwrap());
}

#[test]
fn test_encoded_len_matches_output() {
    let row = row_of(&[("field0", "aaa"), ("f", ""), ("", "value")]);
    assert_eq!(encoded_len(&row), encode(&row).unwrap().len());
    assert_eq!(encoded_len(&row), 3 * 8 + 6 + 3 + 1 + 5);
}

// =============================================================================
// Full Decode Tests
// =============================================================================

#[test]
fn test_decode_all_preserves_order_and_values() {
    let row = row_of(&[("field2", "c"), ("field0", "a"), ("field1", "b")]);
    let decoded = decode_all(&encode(&row).unwrap()).unwrap();
    assert_eq!(decoded, row);
}

#[test]
fn test_decode_all_empty_buffer() {
    assert_eq!(decode_all(&[]).unwrap(), Vec::<Field>::new());
}

#[test]
fn test_decode_all_empty_names_and_values() {
    let row = row_of(&[("", ""), ("", "")]);
    assert_eq!(decode_all(&encode(&row).unwrap()).unwrap(), row);
}

#[test]
fn test_decode_all_binary_payloads() {
    let row = vec![
        Field::new(vec![0u8, 255, 1], vec![0u8; 300]),
        Field::new(b"k".to_vec(), (0..=255u8).collect::<Vec<u8>>()),
    ];
    assert_eq!(decode_all(&encode(&row).unwrap()).unwrap(), row);
}

#[test]
fn test_decode_all_many_fields() {
    let row: Row = (0..100)
        .map(|i| Field::new(format!("field{}", i), format!("value-{}", i)))
        .collect();
    assert_eq!(decode_all(&encode(&row).unwrap()).unwrap(), row);
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_truncated_value_payload() {
    // Name "a", then a value prefix claiming 10 bytes with only 3 present
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.push(b'a');
    bytes.extend_from_slice(&10u32.to_le_bytes());
    bytes.extend_from_slice(b"xyz");

    match decode_all(&bytes) {
        Err(BenchKvError::Truncated {
            offset,
            needed,
            remaining,
        }) => {
            assert_eq!(offset, 9);
            assert_eq!(needed, 10);
            assert_eq!(remaining, 3);
        }
        other => panic!("Expected Truncated, got {:?}", other),
    }
}

#[test]
fn test_truncated_length_prefix() {
    let mut bytes = encode(&row_of(&[("a", "b")])).unwrap().to_vec();
    bytes.extend_from_slice(&[1, 0]);

    let err = decode_all(&bytes).unwrap_err();
    assert!(matches!(err, BenchKvError::Truncated { needed: 4, remaining: 2, .. }));
    assert!(err.is_integrity_fault());
}

#[test]
fn test_every_cut_point_is_rejected() {
    let encoded = encode(&row_of(&[("field0", "aaa"), ("field1", "bbb")])).unwrap();
    let first_field_end = 4 + 6 + 4 + 3;

    for cut in 1..encoded.len() {
        let result = decode_all(&encoded[..cut]);
        if cut == first_field_end {
            assert_eq!(result.unwrap().len(), 1);
        } else {
            assert!(
                matches!(result, Err(BenchKvError::Truncated { .. })),
                "cut at {} should be truncated",
                cut
            );
        }
    }
}

#[test]
fn test_huge_length_prefix_does_not_overread() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(b"abc");
    assert!(matches!(
        decode_all(&bytes),
        Err(BenchKvError::Truncated { .. })
    ));
}

// =============================================================================
// Filtered Decode Tests
// =============================================================================

#[test]
fn test_filtered_subset_in_order() {
    let row = row_of(&[("f1", "v1"), ("f2", "v2"), ("f3", "v3")]);
    let encoded = encode(&row).unwrap();

    let decoded = decode_filtered(&encoded, &names(&["f1", "f3"])).unwrap();
    assert_eq!(decoded, row_of(&[("f1", "v1"), ("f3", "v3")]));
}

#[test]
fn test_filtered_all_fields() {
    let row = row_of(&[("f1", "v1"), ("f2", "v2")]);
    let encoded = encode(&row).unwrap();
    assert_eq!(decode_filtered(&encoded, &names(&["f1", "f2"])).unwrap(), row);
}

#[test]
fn test_filtered_single_last_field() {
    let row = row_of(&[("field0", "aaa"), ("field1", "bbb")]);
    let encoded = encode(&row).unwrap();
    assert_eq!(
        decode_filtered(&encoded, &names(&["field1"])).unwrap(),
        row_of(&[("field1", "bbb")])
    );
}

#[test]
fn test_filtered_out_of_order_is_fault() {
    let encoded = encode(&row_of(&[("f1", "v1"), ("f2", "v2"), ("f3", "v3")])).unwrap();

    match decode_filtered(&encoded, &names(&["f3", "f1"])) {
        Err(BenchKvError::FilterMismatch {
            missing,
            matched,
            requested,
        }) => {
            assert_eq!(missing, "f1");
            assert_eq!(matched, 1);
            assert_eq!(requested, 2);
        }
        other => panic!("Expected FilterMismatch, got {:?}", other),
    }
}

#[test]
fn test_filtered_unknown_name_is_fault() {
    let encoded = encode(&row_of(&[("f1", "v1")])).unwrap();
    let err = decode_filtered(&encoded, &names(&["nope"])).unwrap_err();
    assert!(matches!(err, BenchKvError::FilterMismatch { matched: 0, .. }));
    assert!(err.is_integrity_fault());
}

#[test]
fn test_filtered_empty_filter_returns_empty_row() {
    let encoded = encode(&row_of(&[("f1", "v1")])).unwrap();
    let empty: Vec<Vec<u8>> = Vec::new();
    assert!(decode_filtered(&encoded, &empty).unwrap().is_empty());
}

#[test]
fn test_filtered_stops_after_last_match() {
    // Garbage after the matched field is never parsed
    let mut bytes = encode(&row_of(&[("f1", "v1")])).unwrap().to_vec();
    bytes.extend_from_slice(&[0xff, 0xff, 0xff]);

    let decoded = decode_filtered(&bytes, &names(&["f1"])).unwrap();
    assert_eq!(decoded, row_of(&[("f1", "v1")]));
}

#[test]
fn test_filtered_truncation_before_match() {
    let encoded = encode(&row_of(&[("f1", "v1"), ("f2", "v2")])).unwrap();
    let cut = &encoded[..encoded.len() - 1];
    assert!(matches!(
        decode_filtered(cut, &names(&["f2"])),
        Err(BenchKvError::Truncated { .. })
    ));
}

#[test]
fn test_filtered_accepts_str_names() {
    let encoded = encode(&row_of(&[("a", "1"), ("b", "2")])).unwrap();
    let decoded = decode_filtered(&encoded, &["b"]).unwrap();
    assert_eq!(decoded, row_of(&[("b", "2")]));
}
