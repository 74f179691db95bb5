//! Common structs and enums

/// Black or White Color
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    /// No-Ink
    White,
    /// Ink
    Black,
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl From<bool> for Color {
    fn from(b: bool) -> Color {
        if b {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl Color {
    /// The intensity written to the output buffer for a pixel of this color
    pub const fn pixel(self) -> u8 {
        match self {
            Color::White => 0x00,
            Color::Black => 0xFF,
        }
    }

    /// Invert a color
    pub fn invert(&mut self) {
        match self {
            Color::White => {
                *self = Color::Black;
            }
            Color::Black => {
                *self = Color::White;
            }
        }
    }

    pub(crate) const fn same(self, other: Color) -> bool {
        matches!(
            (self, other),
            (Color::White, Color::White) | (Color::Black, Color::Black)
        )
    }
}
