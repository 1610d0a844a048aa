use std::fmt;
use std::io;

/// Failures surfaced to callers.
///
/// Stream- and container-level irregularities are not represented here: the
/// decoders recover from malformed bits locally and container parsing degrades
/// to raw bits instead of failing.
#[derive(Debug)]
pub enum Error {
    /// Encode-time byte with no entry in the supplied code table.
    UnknownSymbol(u8),
    /// Input longer than the configured bound; rejected before any processing.
    CapacityExceeded { len: usize, limit: usize },
    /// Serialization or bit-packing failure at the container boundary.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(byte) => {
                write!(f, "byte 0x{byte:02x} has no entry in the code table")
            }
            Error::CapacityExceeded { len, limit } => {
                write!(f, "input is {len} bytes, limit is {limit}")
            }
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            other => {
                let kind = match &other {
                    Error::CapacityExceeded { .. } => io::ErrorKind::InvalidInput,
                    _ => io::ErrorKind::InvalidData,
                };
                io::Error::new(kind, other.to_string())
            }
        }
    }
}
