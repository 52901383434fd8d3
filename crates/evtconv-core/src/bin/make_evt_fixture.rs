//! Write a small synthetic ring-item capture for manual testing.
//!
//! The capture holds one type-30 physics item with a single 100 MHz hit
//! (channel 3, energy 1234, no trace) followed by one non-physics item
//! that a correct converter must skip whole.

use std::fs;
use std::path::PathBuf;

const BODY_HEADER_LEN: usize = 20;
const FRAGMENT_SIZE_LEN: usize = 4;
const FRAGMENT_HEADER_LEN: usize = 20;
const PHYSICS_HEADER_LEN: usize = 8;
const PHYSICS_EVENT_TYPE: u32 = 30;

fn main() -> Result<(), String> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| "usage: make_evt_fixture <output.evt>".to_string())?;

    let mut capture = Vec::new();
    write_physics_item(&mut capture);
    write_skippable_item(&mut capture);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }
    fs::write(&path, capture).map_err(|e| e.to_string())?;
    eprintln!("fixture written -> {}", path.display());
    Ok(())
}

fn write_physics_item(out: &mut Vec<u8>) {
    let mut payload = vec![0u8; BODY_HEADER_LEN + FRAGMENT_SIZE_LEN];
    payload.extend_from_slice(&[0u8; FRAGMENT_HEADER_LEN]);
    payload.extend_from_slice(&[0u8; PHYSICS_HEADER_LEN]);
    payload.extend_from_slice(&[0u8; BODY_HEADER_LEN]);
    // Device descriptor: body size, frequency, resolution, revision.
    payload.extend_from_slice(&16i32.to_le_bytes());
    payload.extend_from_slice(&100i16.to_le_bytes());
    payload.push(14);
    payload.push(1);
    // Hit record: header, time low, CFD, energy.
    for word in [
        3u32 | (4 << 12) | (4 << 17),
        100,
        16384 << 16,
        1234,
    ] {
        payload.extend_from_slice(&word.to_le_bytes());
    }

    out.extend_from_slice(&((payload.len() as u32 + 8).to_le_bytes()));
    out.extend_from_slice(&PHYSICS_EVENT_TYPE.to_le_bytes());
    out.extend_from_slice(&payload);
}

fn write_skippable_item(out: &mut Vec<u8>) {
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&[0u8; 8]);
}
