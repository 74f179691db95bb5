//! # CCITT Group 3 1D-encoding (Modified Huffman)
//!
//! Spec: ITU-T Recommendation T.4 (07/03) <https://www.itu.int/rec/T-REC-T.4-200307-I/en>
//!
//! The decoder does not know about the width or height of an image. It
//! expands runs into a flat buffer of [`CodecOptions::max_bytes`] pixels,
//! one byte per pixel (`0` for white, `255` for black).
use log::info;

use crate::{
    bits::{BitIter, BitSource},
    FaxError, FaxResult,
};

mod run;
mod scanline;

pub use run::{decode_run, Run};
pub use scanline::{fill, FillStats};

/// The buffer size used when no options are passed
pub const DEFAULT_MAX_BYTES: usize = 0;

/// Options for fax decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct CodecOptions {
    /// The size of the output buffer in bytes (= pixels)
    pub max_bytes: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl CodecOptions {
    /// Options with an output buffer of `max_bytes`
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

/// # Group 3 (T.4) 1-D Decoder
#[derive(Debug, Default, Clone)]
pub struct Group3Decoder {
    options: CodecOptions,
}

impl Group3Decoder {
    /// Create a new instance
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// The options of this decoder
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Decode a buffer of `max_bytes` pixels from `bits`
    pub fn decode<B: BitSource + ?Sized>(&self, bits: &mut B) -> FaxResult<Vec<u8>> {
        let mut output = vec![0; self.options.max_bytes];
        let stats = fill(bits, &mut output)?;
        info!(
            "Decoded {} pixels in {} runs ({} end-of-line, {} clamped)",
            output.len(),
            stats.runs,
            stats.end_of_lines,
            stats.clamped
        );
        Ok(output)
    }
}

/// Decode a Modified Huffman stream.
///
/// Returns `Ok(None)` if `input` is absent or holds no data, without
/// allocating. Without `options`, [`CodecOptions::default`] applies.
pub fn decompress<B: BitSource + ?Sized>(
    input: Option<&mut B>,
    options: Option<&CodecOptions>,
) -> FaxResult<Option<Vec<u8>>> {
    let bits = match input {
        Some(bits) => bits,
        None => return Ok(None),
    };
    if bits.is_empty()? {
        return Ok(None);
    }
    let options = options.copied().unwrap_or_default();
    Group3Decoder::new(options).decode(bits).map(Some)
}

/// Decode a Modified Huffman stream from bytes, most significant bit first
pub fn decompress_bytes(
    input: Option<&[u8]>,
    options: Option<&CodecOptions>,
) -> FaxResult<Option<Vec<u8>>> {
    let mut bits = input.map(BitIter::new);
    decompress(bits.as_mut(), options)
}

/// Group 3 encoding is not implemented, this always fails
pub fn compress(_input: &[u8], _options: Option<&CodecOptions>) -> FaxResult<Vec<u8>> {
    Err(FaxError::Unsupported("Group 3 fax compression"))
}

#[cfg(test)]
mod tests {
    use super::{compress, decompress, decompress_bytes, CodecOptions, Group3Decoder};
    use crate::{
        bits::{BitIter, BitWriter, ReadBits},
        FaxError,
    };

    #[test]
    fn test_compress_unsupported() {
        assert!(matches!(
            compress(&[], None),
            Err(FaxError::Unsupported(_))
        ));
        let options = CodecOptions::with_max_bytes(16);
        assert!(matches!(
            compress(&[0, 255, 0], Some(&options)),
            Err(FaxError::Unsupported(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let options = CodecOptions::with_max_bytes(16);
        assert!(decompress_bytes(None, Some(&options)).unwrap().is_none());
        assert!(decompress_bytes(Some(&[][..]), Some(&options)).unwrap().is_none());
        assert!(decompress_bytes(Some(&[][..]), None).unwrap().is_none());
        assert!(decompress::<BitIter>(None, None).unwrap().is_none());

        let empty: &[u8] = &[];
        let mut reader = ReadBits::new(empty);
        assert!(decompress(Some(&mut reader), None).unwrap().is_none());
    }

    #[test]
    fn test_default_options() {
        // white 0, black 0
        let data = [0b00110101, 0b00001101, 0b11_000000];
        let output = decompress_bytes(Some(&data[..]), None).unwrap().unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_makeup_run() {
        // white 64 + 3, black 2
        let mut bw = BitWriter::new();
        bw.write_code((5, 0b11011));
        bw.write_code((4, 0b1000));
        bw.write_code((2, 0b11));
        let data = bw.done();

        let options = CodecOptions::with_max_bytes(69);
        let output = decompress_bytes(Some(&data[..]), Some(&options))
            .unwrap()
            .unwrap();
        assert_eq!(output.len(), 69);
        assert!(output[..67].iter().all(|&p| p == 0));
        assert_eq!(&output[67..], &[255, 255]);
    }

    #[test]
    fn test_reader_source() {
        let mut bw = BitWriter::new();
        bw.write_code((4, 0b0111));
        bw.write_code((3, 0b010));
        let data = bw.done();

        let decoder = Group3Decoder::new(CodecOptions::with_max_bytes(3));
        let output = decoder.decode(&mut ReadBits::new(&data[..])).unwrap();
        assert_eq!(output, vec![0, 0, 255]);
    }

    #[test]
    fn test_truncated_stream() {
        let options = CodecOptions::with_max_bytes(100);
        let err = decompress_bytes(Some(&[0b0111_0000][..]), Some(&options)).unwrap_err();
        assert!(matches!(err, FaxError::UnexpectedEof));
    }
}
