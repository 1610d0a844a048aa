use serde::Serialize;
use tracing::debug;

use crate::bits::BitString;
use crate::code::CodeTable;
use crate::codec;
use crate::error::Error;
use crate::freq::FrequencyTable;
use crate::tree::{Tree, TreeShape};

/// Default cap on encodable input, enforced before any processing.
pub const DEFAULT_MAX_INPUT: usize = 1 << 20;

/// Everything one encode call produces.
///
/// Each call builds its frequency table, tree, and code table from scratch and
/// hands them back; nothing is shared between calls, so concurrent callers
/// need no coordination.
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    pub encoded: BitString,
    pub codes: CodeTable,
    pub frequencies: FrequencyTable,
    /// Visualization mirror of the coding tree; `None` for empty input.
    pub tree: Option<TreeShape>,
    pub stats: Stats,
}

/// Size accounting for one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub original_bits: u64,
    pub encoded_bits: u64,
    /// Percent saved: `100 * (original - encoded) / original`, 0 for empty
    /// input.
    pub compression_ratio: f64,
    pub unique_symbols: usize,
}

impl Stats {
    fn for_encoding(input_len: usize, encoded_bits: usize, unique_symbols: usize) -> Stats {
        let original_bits = input_len as u64 * 8;
        let encoded_bits = encoded_bits as u64;
        let compression_ratio = if original_bits == 0 {
            0.0
        } else {
            (original_bits as f64 - encoded_bits as f64) / original_bits as f64 * 100.0
        };
        Stats {
            original_bits,
            encoded_bits,
            compression_ratio,
            unique_symbols,
        }
    }
}

/// Encodes `data` under the default input cap.
pub fn encode(data: &[u8]) -> Result<EncodeOutcome, Error> {
    encode_with_limit(data, DEFAULT_MAX_INPUT)
}

/// Encodes `data`, rejecting anything longer than `max_input` up front.
///
/// Empty input is not an error: every field of the outcome is simply empty.
pub fn encode_with_limit(data: &[u8], max_input: usize) -> Result<EncodeOutcome, Error> {
    if data.len() > max_input {
        return Err(Error::CapacityExceeded {
            len: data.len(),
            limit: max_input,
        });
    }

    let frequencies = FrequencyTable::from_bytes(data);
    let tree = Tree::from_frequencies(&frequencies);
    let codes = match &tree {
        Some(tree) => CodeTable::from_tree(tree),
        None => CodeTable::default(),
    };
    let encoded = codec::encode_bits(data, &codes)?;
    let stats = Stats::for_encoding(data.len(), encoded.len(), frequencies.unique_symbols());

    debug!(
        input_bytes = data.len(),
        encoded_bits = stats.encoded_bits,
        unique_symbols = stats.unique_symbols,
        "encoded"
    );

    Ok(EncodeOutcome {
        encoded,
        codes,
        frequencies,
        tree: tree.as_ref().map(Tree::shape),
        stats,
    })
}

/// Decodes a bit sequence with nothing but its code table.
///
/// The coding tree is never rebuilt; a persisted table is enough. Malformed
/// trailing bits are dropped, never fatal.
pub fn decode(bits: &BitString, codes: &CodeTable) -> Vec<u8> {
    codec::decode_table_walk(bits, codes)
}
