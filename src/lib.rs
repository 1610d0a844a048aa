//! # huffcode
//!
//! Byte-oriented Huffman coding: frequency analysis, prefix-free tree
//! construction, bit-level encode/decode, and a persisted container format
//! bundling a code table with its compressed payload.
//!
//! Every operation takes and returns plain values. There is no shared coder
//! state to reset between calls, so concurrent callers can encode and decode
//! freely.
//!
//! ## Quick Start
//!
//! ```
//! let outcome = huffcode::encode(b"abracadabra")?;
//! let decoded = huffcode::decode(&outcome.encoded, &outcome.codes);
//! assert_eq!(decoded, b"abracadabra");
//! # Ok::<(), huffcode::Error>(())
//! ```

pub mod bits;
pub mod code;
pub mod codec;
pub mod container;
pub mod engine;
pub mod freq;
pub mod tree;

mod error;

// Re-export the main types for convenience
pub use bits::BitString;
pub use code::CodeTable;
pub use container::Container;
pub use engine::{DEFAULT_MAX_INPUT, EncodeOutcome, Stats, decode, encode, encode_with_limit};
pub use error::Error;
pub use freq::FrequencyTable;
pub use tree::{Tree, TreeShape};
