use std::io;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bits::BitString;
use crate::code::CodeTable;
use crate::error::Error;

/// Tag identifying the container layout; an incompatible revision changes it.
pub const MAGIC: [u8; 4] = *b"HUF1";

/// Contents of the table block.
///
/// The exact payload bit count is stored because zero pad bits cannot be told
/// apart from data once a table maps `"0"` to a symbol. bincode's
/// length-prefixed primitives keep every data byte unambiguous, so no escaping
/// is needed anywhere in the block.
#[derive(Serialize, Deserialize)]
struct TableBlock {
    payload_bits: u64,
    codes: CodeTable,
}

/// Result of [`import`]: either a tagged blob's table and payload, or the raw
/// bits of something that never was a container.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub codes: Option<CodeTable>,
    pub payload: BitString,
}

/// Serializes a code table and its payload as a self-describing blob:
/// magic tag, `u32` little-endian table-block length, table block, then the
/// payload packed 8 bits per byte, most significant bit first, with the final
/// byte zero-padded on the right.
pub fn export(codes: &CodeTable, payload: &BitString) -> Result<Vec<u8>, Error> {
    let block = bincode::serialize(&TableBlock {
        payload_bits: payload.len() as u64,
        codes: codes.clone(),
    })
    .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e)))?;

    let mut blob = Vec::with_capacity(8 + block.len() + payload.len() / 8 + 1);
    blob.extend_from_slice(&MAGIC);
    blob.extend_from_slice(&(block.len() as u32).to_le_bytes());
    blob.extend_from_slice(&block);
    blob.extend_from_slice(&pack(payload)?);
    Ok(blob)
}

/// Parses a blob.
///
/// Anything that does not carry a well-formed tag and table block degrades to
/// raw bits, so plain binary input keeps working.
pub fn import(blob: &[u8]) -> Container {
    match parse_tagged(blob) {
        Some(container) => container,
        None => {
            debug!(
                len = blob.len(),
                "no usable container tag; treating input as raw bits"
            );
            Container {
                codes: None,
                payload: unpack(blob),
            }
        }
    }
}

fn parse_tagged(blob: &[u8]) -> Option<Container> {
    if blob.len() < 8 || blob[..4] != MAGIC {
        return None;
    }
    let block_len = u32::from_le_bytes([blob[4], blob[5], blob[6], blob[7]]) as usize;
    let rest = &blob[8..];
    if block_len > rest.len() {
        return None;
    }
    let block: TableBlock = bincode::deserialize(&rest[..block_len]).ok()?;

    let mut payload = unpack(&rest[block_len..]);
    let keep = block.payload_bits.min(payload.len() as u64) as usize;
    payload.truncate(keep);

    Some(Container {
        codes: Some(block.codes),
        payload,
    })
}

fn pack(bits: &BitString) -> Result<Vec<u8>, Error> {
    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    for bit in bits.iter() {
        writer.write_bit(bit)?;
    }
    writer.byte_align()?;
    Ok(writer.into_writer())
}

fn unpack(bytes: &[u8]) -> BitString {
    let mut reader = BitReader::endian(bytes, BigEndian);
    let mut bits = BitString::with_capacity(bytes.len() * 8);
    while let Ok(bit) = reader.read_bit() {
        bits.push(bit);
    }
    bits
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine;

    #[test]
    fn roundtrip_is_exact() {
        let outcome = engine::encode(b"ABBCCC").unwrap();
        let blob = export(&outcome.codes, &outcome.encoded).unwrap();
        assert_eq!(&blob[..4], &MAGIC[..]);

        let container = import(&blob);
        assert_eq!(container.codes.as_ref(), Some(&outcome.codes));
        assert_eq!(container.payload, outcome.encoded);
    }

    #[test]
    fn payload_packs_msb_first_with_zero_padding() {
        let outcome = engine::encode(b"ABBCCC").unwrap();
        let blob = export(&outcome.codes, &outcome.encoded).unwrap();
        // "101111000" packs into 0b1011_1100 0b0000_0000.
        assert_eq!(blob[blob.len() - 2..], [0xbc_u8, 0x00]);
    }

    #[test]
    fn empty_payload_roundtrips() {
        let blob = export(&CodeTable::default(), &BitString::new()).unwrap();
        let container = import(&blob);
        assert_eq!(container.codes, Some(CodeTable::default()));
        assert!(container.payload.is_empty());
    }

    #[test]
    fn zero_padding_never_invents_symbols() {
        let outcome = engine::encode(b"aaaa").unwrap();
        let blob = export(&outcome.codes, &outcome.encoded).unwrap();
        let container = import(&blob);
        assert_eq!(container.payload.len(), 4);
        let codes = container.codes.unwrap();
        assert_eq!(engine::decode(&container.payload, &codes), b"aaaa");
    }

    #[test]
    fn untagged_blob_degrades_to_raw_bits() {
        let container = import(b"plain text, not a container");
        assert!(container.codes.is_none());
        assert_eq!(container.payload.len(), 8 * 27);
    }

    #[test]
    fn truncated_table_block_degrades_to_raw_bits() {
        let outcome = engine::encode(b"ABBCCC").unwrap();
        let mut blob = export(&outcome.codes, &outcome.encoded).unwrap();
        blob.truncate(10);
        let container = import(&blob);
        assert!(container.codes.is_none());
        assert_eq!(container.payload.len(), 8 * 10);
    }

    #[test]
    fn corrupt_table_block_degrades_to_raw_bits() {
        // Valid magic and length framing a block bincode cannot read.
        let mut blob = Vec::from(MAGIC);
        blob.extend_from_slice(&4u32.to_le_bytes());
        blob.extend_from_slice(&[0xff, 0xff, 0xff, 0xff]);
        let container = import(&blob);
        assert!(container.codes.is_none());
        assert_eq!(container.payload.len(), 8 * blob.len());
    }
}
