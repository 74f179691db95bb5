use log::debug;

use super::run::{decode_run, Run};
use crate::{bits::BitSource, Color, FaxResult};

/// Counters collected while filling a buffer
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FillStats {
    /// Number of colored runs decoded
    pub runs: usize,
    /// Number of end-of-line codes seen
    pub end_of_lines: usize,
    /// Pixels dropped because a run was longer than the space left
    pub clamped: usize,
}

/// Fill `output` with the pixels of 1-d encoded runs.
///
/// Runs alternate between white and black, starting with white and again
/// after every end-of-line. The last run is cut off at the end of `output`.
pub fn fill<B: BitSource + ?Sized>(bits: &mut B, output: &mut [u8]) -> FaxResult<FillStats> {
    let mut color = Color::White;
    let mut a0 = 0;
    let mut stats = FillStats::default();

    while a0 < output.len() {
        match decode_run(bits, color)? {
            Run::EndOfLine { .. } => {
                stats.end_of_lines += 1;
                color = Color::White;
            }
            Run::Span { color: run_color, length } => {
                stats.runs += 1;
                color.invert();
                let count = length.min(output.len() - a0);
                if count < length {
                    stats.clamped += length - count;
                    debug!(
                        "Run of {} {:?} pixels clamped to {} at {}",
                        length, run_color, count, a0
                    );
                }
                output[a0..a0 + count].fill(run_color.pixel());
                a0 += count;
            }
        }
    }
    Ok(stats)
}
