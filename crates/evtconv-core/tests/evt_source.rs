use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use evtconv_core::{EvtFileSource, ItemSource, SourceError};

fn temp_capture(name: &str, bytes: &[u8]) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("evtconv_{name}_{unique}.evt"));
    fs::write(&path, bytes).unwrap();
    path
}

fn item(item_type: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&((payload.len() as u32 + 8).to_le_bytes()));
    bytes.extend_from_slice(&item_type.to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

#[test]
fn reads_items_until_end_of_stream() {
    let mut capture = item(30, &[1, 2, 3, 4]);
    capture.extend_from_slice(&item(2, &[]));
    let path = temp_capture("items", &capture);

    let mut source = EvtFileSource::open(&path).unwrap();
    let first = source.next_item().unwrap().unwrap();
    assert_eq!(first.item_type, 30);
    assert_eq!(first.payload, vec![1, 2, 3, 4]);

    let second = source.next_item().unwrap().unwrap();
    assert_eq!(second.item_type, 2);
    assert!(second.payload.is_empty());

    assert!(source.next_item().unwrap().is_none());
    let _ = fs::remove_file(&path);
}

#[test]
fn partial_header_at_boundary_is_end_of_stream() {
    let mut capture = item(2, &[9, 9]);
    capture.extend_from_slice(&[0x10, 0x00, 0x00]); // 3 bytes of a next header
    let path = temp_capture("partial_header", &capture);

    let mut source = EvtFileSource::open(&path).unwrap();
    assert!(source.next_item().unwrap().is_some());
    assert!(source.next_item().unwrap().is_none());
    let _ = fs::remove_file(&path);
}

#[test]
fn truncated_payload_is_an_error() {
    let mut capture = Vec::new();
    capture.extend_from_slice(&32u32.to_le_bytes());
    capture.extend_from_slice(&30u32.to_le_bytes());
    capture.extend_from_slice(&[0u8; 10]); // declared 24 payload bytes

    let path = temp_capture("truncated", &capture);
    let mut source = EvtFileSource::open(&path).unwrap();
    let err = source.next_item().unwrap_err();
    let _ = fs::remove_file(&path);

    assert!(matches!(
        err,
        SourceError::TruncatedItem {
            offset: 0,
            declared: 24,
            actual: 10
        }
    ));
}

#[test]
fn undersized_item_header_is_an_error() {
    let mut capture = Vec::new();
    capture.extend_from_slice(&4u32.to_le_bytes());
    capture.extend_from_slice(&30u32.to_le_bytes());

    let path = temp_capture("undersized", &capture);
    let mut source = EvtFileSource::open(&path).unwrap();
    let err = source.next_item().unwrap_err();
    let _ = fs::remove_file(&path);

    assert!(matches!(
        err,
        SourceError::InvalidItemSize { size: 4, offset: 0 }
    ));
}
