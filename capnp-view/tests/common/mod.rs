//! Hand assembly of message words.

#![allow(dead_code)]

use capnp_view::private::layout::ElementSize;

pub mod schema;

pub fn struct_pointer(offset: i32, data: u16, pointers: u16) -> u64 {
    u64::from((offset as u32) << 2) | u64::from(data) << 32 | u64::from(pointers) << 48
}

pub fn list_pointer(offset: i32, size: ElementSize, count: u32) -> u64 {
    u64::from((offset as u32) << 2 | 1) | u64::from(count << 3 | size as u32) << 32
}

pub fn far_pointer(double: bool, position: u32, segment: u32) -> u64 {
    u64::from(position << 3 | u32::from(double) << 2 | 2) | u64::from(segment) << 32
}

/// Little-endian bytes of `words`.
pub fn words(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Packs `bytes` into words, zero-padding the last one.
pub fn packed(bytes: &[u8]) -> Vec<u64> {
    bytes
        .chunks(8)
        .map(|chunk| {
            let mut word = [0; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            u64::from_le_bytes(word)
        })
        .collect()
}

/// Frames `segments` with a stream segment table.
pub fn stream(segments: &[Vec<u64>]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&(segments.len() as u32 - 1).to_le_bytes());
    for segment in segments {
        bytes.extend_from_slice(&(segment.len() as u32).to_le_bytes());
    }
    if segments.len() % 2 == 0 {
        bytes.extend_from_slice(&[0; 4]);
    }
    for segment in segments {
        bytes.extend(words(segment));
    }
    bytes
}

/// A single-segment `Person` with every field set:
/// id 42, age 25, color blue, score 3.0, not active, name "Alice",
/// nicknames ["Ali", null], two friends with ids 7 and 8, lucky [-1, 13, 7].
pub fn alice() -> Vec<u64> {
    let mut w = vec![0u64; 29];
    w[0] = struct_pointer(0, 3, 4);
    w[1] = 42;
    w[2] = u64::from(25u16 ^ 30) | 2 << 16 | u64::from(3.0f32.to_bits() ^ 1.5f32.to_bits()) << 32;
    w[3] = 1;
    w[4] = list_pointer(3, ElementSize::Byte, 6);
    w[5] = list_pointer(3, ElementSize::Pointer, 2);
    w[6] = list_pointer(5, ElementSize::InlineComposite, 14);
    w[7] = list_pointer(19, ElementSize::FourBytes, 3);
    w[8] = packed(b"Alice\0")[0];
    w[9] = list_pointer(1, ElementSize::Byte, 4);
    w[11] = packed(b"Ali\0")[0];
    w[12] = struct_pointer(2, 3, 4);
    w[13] = 7;
    w[20] = 8;
    w[27] = u64::from(-1i32 as u32) | 13 << 32;
    w[28] = 7;
    w
}
