//! # Bit sources and writer
//!
//! The decoder only ever asks for one bit at a time through [`BitSource`].
//! [`BitIter`] reads from a byte slice, [`ReadBits`] from any [`BufRead`].

use std::io::{self, BufRead, Read};

use crate::{FaxError, FaxResult};

/// Supplies single bits to the decoder
pub trait BitSource {
    /// Read the next bit.
    ///
    /// Fails with [`FaxError::UnexpectedEof`] when there is no more data.
    fn read_bit(&mut self) -> FaxResult<bool>;

    /// Returns true if there are no bits left to read
    fn is_empty(&mut self) -> FaxResult<bool>;
}

/// Order of writing/reading bits to/from a byte (see TIFF spec)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillOrder {
    /// A byte is iterated from most- to least-significant bit
    MsbToLsb = 1,
    /// A byte is iterated from lest- to most-significant bit
    LsbToMsb = 2,
}

impl Default for FillOrder {
    fn default() -> Self {
        FillOrder::MsbToLsb
    }
}

impl FillOrder {
    /// Take one bit off `buffer`, returning the rest of the buffer and the bit
    fn next(self, buffer: u8) -> (u8, bool) {
        match self {
            FillOrder::MsbToLsb => buffer.overflowing_mul(2),
            FillOrder::LsbToMsb => (buffer >> 1, buffer & 0b1 > 0),
        }
    }
}

/// The bits of one byte that have not been handed out yet
#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    buffer: u8,
    left: u8,
}

impl Pending {
    fn load(&mut self, byte: u8) {
        self.buffer = byte;
        self.left = 8;
    }

    fn take(&mut self, fill_order: FillOrder) -> Option<bool> {
        if self.left == 0 {
            return None;
        }
        let (rest, bit) = fill_order.next(self.buffer);
        self.buffer = rest;
        self.left -= 1;
        Some(bit)
    }
}

/// Read bits from a slice
#[derive(Debug, Clone)]
pub struct BitIter<'a> {
    pending: Pending,
    fill_order: FillOrder,
    inner: std::slice::Iter<'a, u8>,
}

impl<'a> BitIter<'a> {
    /// Creates a new instance
    pub fn new(bytes: &'a [u8]) -> BitIter<'a> {
        BitIter {
            pending: Pending::default(),
            fill_order: FillOrder::MsbToLsb,
            inner: bytes.iter(),
        }
    }

    /// Update the fill order. This should be done before
    /// any call to next, otherwise the resulting stream
    /// may be corrupt, but it's not unsound.
    pub fn set_fill_order(&mut self, fill_order: FillOrder) {
        self.fill_order = fill_order;
    }
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.left == 0 {
            let byte = *self.inner.next()?;
            self.pending.load(byte);
        }
        self.pending.take(self.fill_order)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.inner.len() * 8 + usize::from(self.pending.left);
        (size, Some(size))
    }
}

impl BitSource for BitIter<'_> {
    fn read_bit(&mut self) -> FaxResult<bool> {
        self.next().ok_or(FaxError::UnexpectedEof)
    }

    fn is_empty(&mut self) -> FaxResult<bool> {
        Ok(self.size_hint().0 == 0)
    }
}

/// Read bits from a buffered reader
#[derive(Debug)]
pub struct ReadBits<R> {
    pending: Pending,
    fill_order: FillOrder,
    inner: R,
}

impl<R: BufRead> ReadBits<R> {
    /// Creates a new instance
    pub fn new(inner: R) -> Self {
        Self {
            pending: Pending::default(),
            fill_order: FillOrder::MsbToLsb,
            inner,
        }
    }

    /// Update the fill order, see [`BitIter::set_fill_order`]
    pub fn set_fill_order(&mut self, fill_order: FillOrder) {
        self.fill_order = fill_order;
    }

    /// Return the wrapped reader. Bits of a partially consumed byte are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> BitSource for ReadBits<R> {
    fn read_bit(&mut self) -> FaxResult<bool> {
        if self.pending.left == 0 {
            let mut byte = [0u8];
            match self.inner.read_exact(&mut byte) {
                Ok(()) => self.pending.load(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(FaxError::UnexpectedEof);
                }
                Err(e) => return Err(e.into()),
            }
        }
        self.pending
            .take(self.fill_order)
            .ok_or(FaxError::UnexpectedEof)
    }

    fn is_empty(&mut self) -> FaxResult<bool> {
        if self.pending.left > 0 {
            return Ok(false);
        }
        Ok(self.inner.fill_buf()?.is_empty())
    }
}

/// A bitwise writer, MSB first
#[derive(Debug, Default)]
pub struct BitWriter {
    buffer: Vec<u8>,
    curr: u8,
    filled: u8,
}

impl BitWriter {
    /// Creates a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single bit
    pub fn write(&mut self, b: bool) {
        self.curr = (self.curr << 1) | u8::from(b);
        self.filled += 1;
        if self.filled == 8 {
            self.buffer.push(self.curr);
            self.curr = 0;
            self.filled = 0;
        }
    }

    /// Write the lowest `len` bits of `val`, most significant first
    pub fn write_bits(&mut self, val: usize, len: u8) {
        for i in (0..len).rev() {
            self.write((val >> i) & 1 == 1);
        }
    }

    /// Write a code given as `(bit length, value)`
    pub fn write_code(&mut self, (len, bits): (u8, u16)) {
        self.write_bits(bits.into(), len);
    }

    /// Pad the current byte with zeros and move it to the buffer
    pub fn flush(&mut self) {
        if self.filled > 0 {
            self.buffer.push(self.curr << (8 - self.filled));
            self.curr = 0;
            self.filled = 0;
        }
    }

    /// Flush and return the buffer
    pub fn done(mut self) -> Vec<u8> {
        self.flush();
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, BufReader, Read};

    use super::{BitIter, BitSource, BitWriter, FillOrder, ReadBits};
    use crate::FaxError;

    #[test]
    fn test_fill_order_msb_to_lsb() {
        let msbf = FillOrder::MsbToLsb;
        assert_eq!(msbf.next(0b10000000), (0b00000000, true));
        assert_eq!(msbf.next(0b01000000), (0b10000000, false));
        assert_eq!(msbf.next(0b10100000), (0b01000000, true));
    }

    #[test]
    fn test_fill_order_lsb_to_msb() {
        let lsbf = FillOrder::LsbToMsb;
        assert_eq!(lsbf.next(0b00000001), (0b00000000, true));
        assert_eq!(lsbf.next(0b00000010), (0b00000001, false));
        assert_eq!(lsbf.next(0b00000101), (0b00000010, true));
    }

    #[test]
    fn test_bit_iter() {
        assert_eq!(
            vec![
                false, false, true, false, false, false, false, false, //
                true, true, false, false, true, true, false, true
            ],
            BitIter::new(&[0b0010_0000, 0b1100_1101]).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_bit_iter_lsb_first() {
        let mut iter = BitIter::new(&[0b0000_0110]);
        iter.set_fill_order(FillOrder::LsbToMsb);
        let bits: Vec<bool> = iter.take(3).collect();
        assert_eq!(bits, vec![false, true, true]);
    }

    #[test]
    fn test_bit_iter_source() {
        let mut iter = BitIter::new(&[0b1000_0000]);
        assert!(!iter.is_empty().unwrap());
        assert!(iter.read_bit().unwrap());
        for _ in 0..7 {
            assert!(!iter.read_bit().unwrap());
        }
        assert!(iter.is_empty().unwrap());
        assert!(matches!(iter.read_bit(), Err(FaxError::UnexpectedEof)));
    }

    #[test]
    fn test_read_bits() {
        let data: &[u8] = &[0b1010_0000, 0b0000_0001];
        let mut bits = ReadBits::new(data);
        assert!(!bits.is_empty().unwrap());
        let mut seen = Vec::new();
        for _ in 0..16 {
            seen.push(bits.read_bit().unwrap());
        }
        assert_eq!(seen, BitIter::new(data).collect::<Vec<_>>());
        assert!(bits.is_empty().unwrap());
        assert!(matches!(bits.read_bit(), Err(FaxError::UnexpectedEof)));
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }
    }

    #[test]
    fn test_read_bits_io_error() {
        let mut bits = ReadBits::new(BufReader::new(Broken));
        assert!(matches!(bits.read_bit(), Err(FaxError::Io(_))));
    }

    #[test]
    fn test_bit_writer_write_bits() {
        let mut bw = BitWriter::new();
        bw.write_bits(0b000011110000, 12);
        bw.write_bits(0b1010, 4);
        assert_eq!(&bw.buffer, &[0b00001111, 0b00001010]);

        bw.write_bits(0b111111, 6);
        assert_eq!(bw.curr, 0b111111);
        assert_eq!(bw.filled, 6);

        bw.write_code((4, 0b0011));
        assert_eq!(
            bw.done(),
            vec![0b00001111, 0b00001010, 0b11111100, 0b11000000]
        );
    }

    #[test]
    fn test_bit_writer_write() {
        let mut bw = BitWriter::new();
        for &b in &[true, false, false, true, true, false, true, false] {
            bw.write(b);
        }
        assert_eq!(&bw.buffer, &[0b10011010]);

        bw.write(true);
        bw.write(false);
        bw.write(true);
        bw.flush();
        assert_eq!(&bw.buffer, &[0b10011010, 0b10100000]);

        bw.flush();
        assert_eq!(&bw.buffer, &[0b10011010, 0b10100000]);
    }
}
