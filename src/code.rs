use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::bits::BitString;
use crate::tree::{Node, NodeId, Tree};

/// Symbol → prefix-free code, derived from one tree walk.
///
/// Codes are root-to-leaf paths (0 = left, 1 = right), so no code can be a
/// proper prefix of another. The table covers exactly the symbols of the
/// frequency table that produced the tree, and every code is at least one bit
/// long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitString>,
}

impl CodeTable {
    pub fn from_tree(tree: &Tree) -> CodeTable {
        let mut codes = BTreeMap::new();
        collect(tree, tree.root(), BitString::new(), &mut codes);
        CodeTable { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Code → symbol map for table-only decoding.
    pub(crate) fn invert(&self) -> HashMap<BitString, u8> {
        self.codes
            .iter()
            .map(|(&symbol, code)| (code.clone(), symbol))
            .collect()
    }
}

impl FromIterator<(u8, BitString)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, BitString)>>(iter: I) -> Self {
        CodeTable {
            codes: iter.into_iter().collect(),
        }
    }
}

fn collect(tree: &Tree, id: NodeId, prefix: BitString, codes: &mut BTreeMap<u8, BitString>) {
    match tree.node(id) {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix);
        }
        Node::Internal { left, right, .. } => {
            if let Some(left) = left {
                let mut path = prefix.clone();
                path.push(false);
                collect(tree, *left, path, codes);
            }
            if let Some(right) = right {
                let mut path = prefix;
                path.push(true);
                collect(tree, *right, path, codes);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::freq::FrequencyTable;

    fn table_for(data: &[u8]) -> CodeTable {
        let freq = FrequencyTable::from_bytes(data);
        CodeTable::from_tree(&Tree::from_frequencies(&freq).unwrap())
    }

    #[test]
    fn most_frequent_symbol_gets_the_shortest_code() {
        let table = table_for(b"ABBCCC");
        assert_eq!(table.get(b'C').unwrap().to_string(), "0");
        assert_eq!(table.get(b'A').unwrap().to_string(), "10");
        assert_eq!(table.get(b'B').unwrap().to_string(), "11");
    }

    #[test]
    fn degenerate_alphabet_still_codes_one_bit() {
        let table = table_for(b"aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'a').unwrap().to_string(), "0");
    }

    #[test]
    fn no_code_prefixes_another() {
        let table = table_for(b"the quick brown fox jumps over the lazy dog");
        for (a, code_a) in table.iter() {
            for (b, code_b) in table.iter() {
                if a != b {
                    assert!(
                        !code_b.starts_with(code_a),
                        "{code_a} is a prefix of {code_b}"
                    );
                }
            }
        }
    }

    #[test]
    fn covers_exactly_the_symbols_present() {
        let table = table_for(b"ABBCCC");
        assert_eq!(table.len(), 3);
        assert!(table.get(b'D').is_none());
    }

    #[test]
    fn inversion_swaps_keys_and_values() {
        let table = table_for(b"ABBCCC");
        let lookup = table.invert();
        let zero: BitString = "0".parse().unwrap();
        let one_zero: BitString = "10".parse().unwrap();
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.get(&zero), Some(&b'C'));
        assert_eq!(lookup.get(&one_zero), Some(&b'A'));
    }
}
