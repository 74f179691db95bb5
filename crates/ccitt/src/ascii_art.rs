//! # Draw decoded pixels
//!
//! The decoder output has no width of its own, so all functions here take the
//! width of a row from the caller. A trailing partial row is dropped.
use std::{fmt, io};

use crate::Color;

/// Characters used for the frame corners and edges
pub struct BorderDrawing {
    /// left corner
    pub left: char,
    /// horizontal edge
    pub middle: char,
    /// right corner
    pub right: char,
}

/// Characters used to draw a bitmap
pub struct BoxDrawing {
    /// Top border
    pub top: BorderDrawing,
    /// Left edge
    pub left: char,
    /// Right edge
    pub right: char,
    /// Bottom border
    pub bottom: BorderDrawing,
    /// A black pixel
    pub ink: char,
    /// A white pixel
    pub no_ink: char,
}

const ASCII_BORDER: BorderDrawing = BorderDrawing {
    left: '+',
    middle: '-',
    right: '+',
};

/// Plain ASCII
pub const ASCII: &BoxDrawing = &BoxDrawing {
    top: ASCII_BORDER,
    left: '|',
    right: '|',
    bottom: ASCII_BORDER,
    ink: '#',
    no_ink: ' ',
};

/// Unicode box drawing characters
pub const UNICODE: &BoxDrawing = &BoxDrawing {
    top: BorderDrawing {
        left: '╔',
        middle: '═',
        right: '╗',
    },
    left: '║',
    right: '║',
    bottom: BorderDrawing {
        left: '╚',
        middle: '═',
        right: '╝',
    },
    ink: '█',
    no_ink: ' ',
};

fn border<W: fmt::Write>(w: &mut W, b: &BorderDrawing, width: usize) -> fmt::Result {
    w.write_char(b.left)?;
    for _ in 0..width {
        w.write_char(b.middle)?;
    }
    w.write_char(b.right)?;
    w.write_char('\n')
}

/// Draw the pixels as rows of `width` characters
pub fn ascii_art<W: fmt::Write>(
    w: &mut W,
    b: &BoxDrawing,
    pixels: &[u8],
    width: usize,
    invert: bool,
) -> fmt::Result {
    if width == 0 {
        return Ok(());
    }
    let ink = Color::Black.pixel();
    border(w, &b.top, width)?;
    for row in pixels.chunks_exact(width) {
        w.write_char(b.left)?;
        for &pixel in row {
            w.write_char(if (pixel == ink) ^ invert {
                b.ink
            } else {
                b.no_ink
            })?;
        }
        w.write_char(b.right)?;
        w.write_char('\n')?;
    }
    border(w, &b.bottom, width)
}

/// Write the pixels as a binary 8-bit PGM image.
///
/// Black is written as `0`, so the image looks like the page.
pub fn pgm_to_io_writer<W: io::Write>(
    w: &mut W,
    pixels: &[u8],
    width: usize,
    invert: bool,
) -> io::Result<()> {
    let height = if width == 0 { 0 } else { pixels.len() / width };
    write!(w, "P5\n{} {}\n255\n", width, height)?;
    let rows = pixels.chunks_exact(width.max(1)).take(height);
    for row in rows {
        let gray: Vec<u8> = row
            .iter()
            .map(|&p| if invert { p } else { !p })
            .collect();
        w.write_all(&gray)?;
    }
    Ok(())
}
