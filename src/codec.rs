use tracing::debug;

use crate::bits::BitString;
use crate::code::CodeTable;
use crate::error::Error;
use crate::tree::{Node, Tree};

/// Concatenates the code of every input byte, in input order.
///
/// The table is normally derived from this exact byte sequence, so a missing
/// entry is a fatal input condition rather than something to recover from.
/// No padding is added here; that happens at container-serialization time.
pub fn encode_bits(data: &[u8], table: &CodeTable) -> Result<BitString, Error> {
    let mut out = BitString::with_capacity(data.len());
    for &byte in data {
        let code = table.get(byte).ok_or(Error::UnknownSymbol(byte))?;
        out.extend_from(code);
    }
    Ok(out)
}

/// Decodes by walking the tree: 0 goes left, 1 goes right, a leaf emits its
/// symbol and resets the cursor to the root.
///
/// A bit with no child to follow is stream corruption or trailing padding;
/// the partial code is dropped and the cursor reset, so bytes already decoded
/// survive.
pub fn decode_tree_walk(bits: &BitString, tree: &Tree) -> Vec<u8> {
    let mut out = Vec::new();
    let mut cursor = tree.root();
    for bit in bits.iter() {
        let next = match tree.node(cursor) {
            Node::Internal { left, right, .. } => {
                if bit {
                    *right
                } else {
                    *left
                }
            }
            Node::Leaf { .. } => None,
        };
        let Some(next) = next else {
            debug!("dead end in coding tree; discarding partial code");
            cursor = tree.root();
            continue;
        };
        if let Node::Leaf { symbol, .. } = tree.node(next) {
            out.push(*symbol);
            cursor = tree.root();
        } else {
            cursor = next;
        }
    }
    if cursor != tree.root() {
        debug!("discarded trailing partial code");
    }
    out
}

/// Decodes with only a code table, no tree: bits accumulate in a buffer that
/// emits its symbol and clears whenever it exactly matches a known code.
///
/// Prefix-freedom guarantees at most one match per position. Bits left in the
/// buffer at end of stream are dropped without complaint; container padding
/// lands here.
pub fn decode_table_walk(bits: &BitString, table: &CodeTable) -> Vec<u8> {
    let lookup = table.invert();
    let mut out = Vec::new();
    let mut buffer = BitString::new();
    for bit in bits.iter() {
        buffer.push(bit);
        if let Some(&symbol) = lookup.get(&buffer) {
            out.push(symbol);
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        debug!(
            leftover_bits = buffer.len(),
            "unmatched trailing bits discarded"
        );
    }
    out
}
