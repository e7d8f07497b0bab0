//! Binary model serialization in the `weights.bin` (NTRV) format.
//!
//! The blob is a fixed 20-byte little-endian header (magic, version, tuple
//! count, data CRC-32, reserved), followed by the tuple definitions (one
//! length byte plus that many cell indices each) and the flattened weight
//! tables (3^len IEEE-754 single-precision floats per tuple, in definition
//! order). The CRC-32 covers everything after the header.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::constants::BOARD_CELLS;
use crate::error::{NTupleError, Result};
use crate::eval::NTupleNetwork;
use crate::pattern::{self, PATTERNS};

/// ASCII magic identifying the format.
pub const MAGIC: [u8; 4] = *b"NTRV";

/// Implemented format version.
pub const VERSION: u32 = 1;

/// Fixed header size in bytes.
pub const HEADER_SIZE: usize = 20;

/// Builds the data section: tuple definitions followed by weight tables.
fn build_data_section(network: &NTupleNetwork) -> Result<Vec<u8>> {
    let mut data = Vec::new();

    for tuple in PATTERNS {
        if tuple.len() > u8::MAX as usize {
            return Err(NTupleError::Format(format!(
                "tuple size must fit in one byte, got {}",
                tuple.len()
            )));
        }
        data.write_u8(tuple.len() as u8)?;
        for &cell in tuple {
            if cell as usize >= BOARD_CELLS {
                return Err(NTupleError::Format(format!(
                    "tuple cell index out of range: {cell}"
                )));
            }
            data.write_u8(cell)?;
        }
    }

    for (idx, (table, tuple)) in network.weights().iter().zip(PATTERNS).enumerate() {
        let expected_len = pattern::table_size(tuple.len());
        if table.len() != expected_len {
            return Err(NTupleError::Format(format!(
                "weights[{idx}] length must be {expected_len}, got {}",
                table.len()
            )));
        }
        for &weight in table {
            data.write_f32::<LittleEndian>(weight)?;
        }
    }

    Ok(data)
}

/// Serializes a network into the `weights.bin` byte layout.
pub fn export(network: &NTupleNetwork) -> Result<Vec<u8>> {
    let data = build_data_section(network)?;
    let data_crc32 = crc32fast::hash(&data);

    let mut payload = Vec::with_capacity(HEADER_SIZE + data.len());
    payload.extend_from_slice(&MAGIC);
    payload.write_u32::<LittleEndian>(VERSION)?;
    payload.write_u32::<LittleEndian>(PATTERNS.len() as u32)?;
    payload.write_u32::<LittleEndian>(data_crc32)?;
    payload.write_u32::<LittleEndian>(0)?;
    payload.extend_from_slice(&data);
    Ok(payload)
}

/// Validates an exported payload against the expected tuple patterns.
///
/// Checks the header fields, recomputes the data-section CRC-32, replays the
/// tuple-definition parse against `patterns`, and confirms that exactly the
/// right number of weight bytes follow. Every mismatch reports the offending
/// field with expected and actual values; a corrupt payload is rejected
/// unconditionally.
pub fn verify(payload: &[u8], patterns: &[&[u8]]) -> Result<()> {
    if payload.len() < HEADER_SIZE {
        return Err(NTupleError::Format(format!(
            "model payload too short: expected at least {HEADER_SIZE} bytes, got {}",
            payload.len()
        )));
    }

    let magic = &payload[0..4];
    if magic != MAGIC.as_slice() {
        return Err(NTupleError::Format(format!(
            "invalid magic: expected {MAGIC:?}, got {magic:?}"
        )));
    }

    let version = LittleEndian::read_u32(&payload[4..8]);
    if version != VERSION {
        return Err(NTupleError::Format(format!(
            "unsupported version: expected {VERSION}, got {version}"
        )));
    }

    let num_tuples = LittleEndian::read_u32(&payload[8..12]) as usize;
    if num_tuples != patterns.len() {
        return Err(NTupleError::Format(format!(
            "tuple count mismatch: expected {}, got {num_tuples}",
            patterns.len()
        )));
    }

    let expected_crc32 = LittleEndian::read_u32(&payload[12..16]);
    let reserved = LittleEndian::read_u32(&payload[16..20]);
    if reserved != 0 {
        return Err(NTupleError::Format(format!(
            "reserved field must be 0, got {reserved}"
        )));
    }

    let data = &payload[HEADER_SIZE..];
    let actual_crc32 = crc32fast::hash(data);
    if actual_crc32 != expected_crc32 {
        return Err(NTupleError::Format(format!(
            "CRC32 mismatch: expected {expected_crc32:#010x}, got {actual_crc32:#010x}"
        )));
    }

    let mut offset = 0usize;
    for (idx, tuple) in patterns.iter().enumerate() {
        if offset >= data.len() {
            return Err(NTupleError::Format(format!(
                "missing tuple definition at index {idx}"
            )));
        }

        let tuple_size = data[offset] as usize;
        offset += 1;
        if tuple_size != tuple.len() {
            return Err(NTupleError::Format(format!(
                "tuple size mismatch at index {idx}: expected {}, got {tuple_size}",
                tuple.len()
            )));
        }

        let end = offset + tuple_size;
        if end > data.len() {
            return Err(NTupleError::Format(format!(
                "tuple definition truncated at index {idx}"
            )));
        }

        let cells = &data[offset..end];
        if cells != *tuple {
            return Err(NTupleError::Format(format!(
                "tuple cells mismatch at index {idx}: expected {:?}, got {:?}",
                tuple, cells
            )));
        }
        offset = end;
    }

    for (idx, tuple) in patterns.iter().enumerate() {
        let required = pattern::table_size(tuple.len()) * 4;
        let end = offset + required;
        if end > data.len() {
            return Err(NTupleError::Format(format!(
                "weights truncated at tuple index {idx}"
            )));
        }
        offset = end;
    }

    if offset != data.len() {
        return Err(NTupleError::Format(format!(
            "unexpected trailing bytes in model data: {}",
            data.len() - offset
        )));
    }

    Ok(())
}
