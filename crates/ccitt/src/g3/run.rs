//! Decoding of a single run

use log::{debug, trace};

use crate::{
    bits::BitSource,
    tables::{self, Category, MAX_CODE_LEN},
    Color, FaxError, FaxResult,
};

/// Trailing zeros kept when collapsing fill, one short of an end-of-line
const FILL_LEN: u8 = tables::EOL_LEN - 1;
const FILL_MASK: u16 = (1 << FILL_LEN) - 1;

/// The result of decoding one code sequence
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Run {
    /// `length` pixels of `color`
    Span {
        /// The color of the run
        color: Color,
        /// Sum of all make-up codes and the terminating code
        length: usize,
    },
    /// An end-of-line code
    EndOfLine {
        /// Make-up codes read before the end-of-line, normally 0
        pending: usize,
    },
}

impl Run {
    /// The number of pixels in this run
    pub fn length(&self) -> usize {
        match *self {
            Run::Span { length, .. } => length,
            Run::EndOfLine { pending } => pending,
        }
    }

    /// The color of a span, `None` for an end-of-line
    pub fn color(&self) -> Option<Color> {
        match *self {
            Run::Span { color, .. } => Some(color),
            Run::EndOfLine { .. } => None,
        }
    }

    /// Whether this is an end-of-line marker
    pub fn is_eol(&self) -> bool {
        matches!(self, Run::EndOfLine { .. })
    }
}

/// The bits read since the last complete code
#[derive(Debug, Copy, Clone, Default)]
struct Candidate {
    bits: u16,
    len: u8,
}

impl Candidate {
    fn push(&mut self, bit: bool) {
        self.bits = (self.bits << 1) | u16::from(bit);
        self.len += 1;
    }

    fn clear(&mut self) {
        *self = Candidate::default();
    }
}

/// Decode one run of `color` (or an end-of-line) from `bits`.
///
/// Make-up codes are summed until a terminating code of `color` completes
/// the run. An end-of-line is recognized at the end of the bits read since
/// the last complete code, so any fill in front of it is skipped.
pub fn decode_run<B: BitSource + ?Sized>(bits: &mut B, color: Color) -> FaxResult<Run> {
    let mut candidate = Candidate::default();
    let mut length: usize = 0;

    loop {
        candidate.push(bits.read_bit()?);

        if tables::is_eol(candidate.len, candidate.bits) {
            debug!("End of line ({} pending)", length);
            return Ok(Run::EndOfLine { pending: length });
        }

        if let Some(code) = tables::lookup(color, candidate.len, candidate.bits) {
            trace!("{:?}: {}", code.category, code.run);
            length = length
                .checked_add(code.run.into())
                .ok_or(FaxError::RunOverflow)?;
            match code.category {
                Category::Terminating(_) => return Ok(Run::Span { color, length }),
                _ => {
                    candidate.clear();
                    continue;
                }
            }
        }

        if candidate.len >= MAX_CODE_LEN {
            if candidate.bits & FILL_MASK == 0 {
                // only an end-of-line can follow
                candidate.bits = 0;
                candidate.len = FILL_LEN;
            } else {
                return Err(FaxError::InvalidCode {
                    bits: candidate.bits,
                    len: candidate.len,
                });
            }
        }
    }
}
