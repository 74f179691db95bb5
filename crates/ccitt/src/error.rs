use std::io;

use thiserror::Error;

/// An error when decoding a Modified Huffman bitstream
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FaxError {
    /// The bit source ran out of data in the middle of a code
    #[error("Unexpected end of bitstream")]
    UnexpectedEof,
    /// The underlying reader failed
    #[error("IO Error")]
    Io(#[from] io::Error),
    /// No code matched within the maximum code length
    #[error("Invalid code {bits:#b} ({len} bits)")]
    InvalidCode {
        /// The bits read since the last complete code
        bits: u16,
        /// The number of bits in `bits`
        len: u8,
    },
    /// The makeup codes of a single run add up to more than `usize::MAX`
    #[error("Run length overflow")]
    RunOverflow,
    /// The operation is not implemented by this codec
    #[error("{0} not supported")]
    Unsupported(&'static str),
}

/// Type alias for convenience
pub type FaxResult<T> = Result<T, FaxError>;
