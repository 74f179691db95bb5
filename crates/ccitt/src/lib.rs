#![warn(missing_docs)]
//! CCITT fax encodings: Modified Huffman (T.4 Group 3, 1-D) run-length decoding

mod ascii_art;
pub mod bits;
mod color;
mod error;
pub mod g3;
pub mod tables;

pub use ascii_art::{ascii_art, pgm_to_io_writer, BorderDrawing, BoxDrawing, ASCII, UNICODE};
pub use color::Color;
pub use error::{FaxError, FaxResult};
pub use g3::{compress, decompress, decompress_bytes, CodecOptions, Group3Decoder};
