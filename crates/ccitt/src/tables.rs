//! # Modified Huffman code tables
//!
//! Run-length codes from ITU-T Recommendation T.4 (07/03), section 4.1.
//! <https://www.itu.int/rec/T-REC-T.4-200307-I/en>
//!
//! Every code is stored as `(bit length, value)`. The position of a code in
//! its table determines the number of pixels it stands for, see
//! [`Category::run`].

use crate::Color;

/// The longest code in any of the tables (black make-up codes)
pub const MAX_CODE_LEN: u8 = 13;

/// The length of the end-of-line code
pub const EOL_LEN: u8 = 12;

/// The end-of-line code `000000000001`
pub const EOL: u16 = 0b0000_0000_0001;

const EOL_MASK: u16 = (1 << EOL_LEN) - 1;

/// Table 2/T.4, white terminating codes: index `i` is a run of `i` pixels
#[rustfmt::skip]
const WHITE_TERMINATING: [(u8, u16); 64] = [
    (8, 0b00110101), (6, 0b000111), (4, 0b0111), (4, 0b1000),
    (4, 0b1011), (4, 0b1100), (4, 0b1110), (4, 0b1111),
    (5, 0b10011), (5, 0b10100), (5, 0b00111), (5, 0b01000),
    (6, 0b001000), (6, 0b000011), (6, 0b110100), (6, 0b110101),
    (6, 0b101010), (6, 0b101011), (7, 0b0100111), (7, 0b0001100),
    (7, 0b0001000), (7, 0b0010111), (7, 0b0000011), (7, 0b0000100),
    (7, 0b0101000), (7, 0b0101011), (7, 0b0010011), (7, 0b0100100),
    (7, 0b0011000), (8, 0b00000010), (8, 0b00000011), (8, 0b00011010),
    (8, 0b00011011), (8, 0b00010010), (8, 0b00010011), (8, 0b00010100),
    (8, 0b00010101), (8, 0b00010110), (8, 0b00010111), (8, 0b00101000),
    (8, 0b00101001), (8, 0b00101010), (8, 0b00101011), (8, 0b00101100),
    (8, 0b00101101), (8, 0b00000100), (8, 0b00000101), (8, 0b00001010),
    (8, 0b00001011), (8, 0b01010010), (8, 0b01010011), (8, 0b01010100),
    (8, 0b01010101), (8, 0b00100100), (8, 0b00100101), (8, 0b01011000),
    (8, 0b01011001), (8, 0b01011010), (8, 0b01011011), (8, 0b01001010),
    (8, 0b01001011), (8, 0b00110010), (8, 0b00110011), (8, 0b00110100),
];

/// Table 2/T.4, black terminating codes
#[rustfmt::skip]
const BLACK_TERMINATING: [(u8, u16); 64] = [
    (10, 0b0000110111), (3, 0b010), (2, 0b11), (2, 0b10),
    (3, 0b011), (4, 0b0011), (4, 0b0010), (5, 0b00011),
    (6, 0b000101), (6, 0b000100), (7, 0b0000100), (7, 0b0000101),
    (7, 0b0000111), (8, 0b00000100), (8, 0b00000111), (9, 0b000011000),
    (10, 0b0000010111), (10, 0b0000011000), (10, 0b0000001000), (11, 0b00001100111),
    (11, 0b00001101000), (11, 0b00001101100), (11, 0b00000110111), (11, 0b00000101000),
    (11, 0b00000010111), (11, 0b00000011000), (12, 0b000011001010), (12, 0b000011001011),
    (12, 0b000011001100), (12, 0b000011001101), (12, 0b000001101000), (12, 0b000001101001),
    (12, 0b000001101010), (12, 0b000001101011), (12, 0b000011010010), (12, 0b000011010011),
    (12, 0b000011010100), (12, 0b000011010101), (12, 0b000011010110), (12, 0b000011010111),
    (12, 0b000001101100), (12, 0b000001101101), (12, 0b000011011010), (12, 0b000011011011),
    (12, 0b000001010100), (12, 0b000001010101), (12, 0b000001010110), (12, 0b000001010111),
    (12, 0b000001100100), (12, 0b000001100101), (12, 0b000001010010), (12, 0b000001010011),
    (12, 0b000000100100), (12, 0b000000110111), (12, 0b000000111000), (12, 0b000000100111),
    (12, 0b000000101000), (12, 0b000001011000), (12, 0b000001011001), (12, 0b000000101011),
    (12, 0b000000101100), (12, 0b000001011010), (12, 0b000001100110), (12, 0b000001100111),
];

/// Table 3a/T.4, white make-up codes: index `i` adds `64 * (i + 1)` pixels
#[rustfmt::skip]
const WHITE_MAKEUP: [(u8, u16); 27] = [
    (5, 0b11011), (5, 0b10010), (6, 0b010111), (7, 0b0110111),
    (8, 0b00110110), (8, 0b00110111), (8, 0b01100100), (8, 0b01100101),
    (8, 0b01101000), (8, 0b01100111), (9, 0b011001100), (9, 0b011001101),
    (9, 0b011010010), (9, 0b011010011), (9, 0b011010100), (9, 0b011010101),
    (9, 0b011010110), (9, 0b011010111), (9, 0b011011000), (9, 0b011011001),
    (9, 0b011011010), (9, 0b011011011), (9, 0b010011000), (9, 0b010011001),
    (9, 0b010011010), (6, 0b011000), (9, 0b010011011),
];

/// Table 3a/T.4, black make-up codes
#[rustfmt::skip]
const BLACK_MAKEUP: [(u8, u16); 27] = [
    (10, 0b0000001111), (12, 0b000011001000), (12, 0b000011001001), (12, 0b000001011011),
    (12, 0b000000110011), (12, 0b000000110100), (12, 0b000000110101), (13, 0b0000001101100),
    (13, 0b0000001101101), (13, 0b0000001001010), (13, 0b0000001001011), (13, 0b0000001001100),
    (13, 0b0000001001101), (13, 0b0000001110010), (13, 0b0000001110011), (13, 0b0000001110100),
    (13, 0b0000001110101), (13, 0b0000001110110), (13, 0b0000001110111), (13, 0b0000001010010),
    (13, 0b0000001010011), (13, 0b0000001010100), (13, 0b0000001010101), (13, 0b0000001011010),
    (13, 0b0000001011011), (13, 0b0000001100100), (13, 0b0000001100101),
];

/// Table 3b/T.4, extended make-up codes shared by both colors: index `i`
/// adds `1792 + 64 * i` pixels
#[rustfmt::skip]
const EXTRA_MAKEUP: [(u8, u16); 13] = [
    (11, 0b00000001000), (11, 0b00000001100), (11, 0b00000001101), (12, 0b000000010010),
    (12, 0b000000010011), (12, 0b000000010100), (12, 0b000000010101), (12, 0b000000010110),
    (12, 0b000000010111), (12, 0b000000011100), (12, 0b000000011101), (12, 0b000000011110),
    (12, 0b000000011111),
];

/// What a code stands for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Category {
    /// The final 0..=63 pixels of a run of the given color
    Terminating(Color),
    /// A multiple of 64 pixels of the given color
    Makeup(Color),
    /// A multiple of 64 pixels, starting at 1792, for either color
    ExtraMakeup,
    /// Start of a new coded line
    EndOfLine,
}

impl Category {
    /// The number of pixels contributed by the code at `index` of a table
    pub const fn run(self, index: usize) -> u16 {
        let index = index as u16;
        match self {
            Category::Terminating(_) => index,
            Category::Makeup(_) => 64 * (index + 1),
            Category::ExtraMakeup => 1792 + 64 * index,
            Category::EndOfLine => 0,
        }
    }

    /// Whether codes of this category are looked up for a run of `color`
    pub const fn applies_to(self, color: Color) -> bool {
        match self {
            Category::Terminating(c) | Category::Makeup(c) => c.same(color),
            Category::ExtraMakeup => true,
            Category::EndOfLine => false,
        }
    }
}

/// A list of codes that share a category
#[derive(Debug)]
pub struct CodeTable {
    /// What the codes in this table stand for
    pub category: Category,
    /// `(bit length, value)` of every code, in run-length order
    pub codes: &'static [(u8, u16)],
}

/// The complete table set.
///
/// Within one color (extended make-up, make-up and terminating codes of that
/// color) no code is a prefix of another one.
pub const TABLES: [CodeTable; 6] = [
    CodeTable {
        category: Category::ExtraMakeup,
        codes: &EXTRA_MAKEUP,
    },
    CodeTable {
        category: Category::Makeup(Color::White),
        codes: &WHITE_MAKEUP,
    },
    CodeTable {
        category: Category::Makeup(Color::Black),
        codes: &BLACK_MAKEUP,
    },
    CodeTable {
        category: Category::Terminating(Color::White),
        codes: &WHITE_TERMINATING,
    },
    CodeTable {
        category: Category::Terminating(Color::Black),
        codes: &BLACK_TERMINATING,
    },
    CodeTable {
        category: Category::EndOfLine,
        codes: &[(EOL_LEN, EOL)],
    },
];

/// A matched code
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Code {
    /// The table the code was found in
    pub category: Category,
    /// The number of pixels it contributes
    pub run: u16,
}

const LOOKUP_SIZE: usize = 1 << (MAX_CODE_LEN as usize + 1);

/// Keyed by `(1 << len) | bits`, so codes of different lengths never collide
type Lookup = [Option<Code>; LOOKUP_SIZE];

const fn build_lookup(color: Color) -> Lookup {
    let mut lookup: Lookup = [None; LOOKUP_SIZE];
    let mut t = 0;
    while t < TABLES.len() {
        let category = TABLES[t].category;
        let codes = TABLES[t].codes;
        if category.applies_to(color) {
            let mut i = 0;
            while i < codes.len() {
                let (len, bits) = codes[i];
                let key = (1 << len) | bits as usize;
                // earlier tables take precedence
                if lookup[key].is_none() {
                    lookup[key] = Some(Code {
                        category,
                        run: category.run(i),
                    });
                }
                i += 1;
            }
        }
        t += 1;
    }
    lookup
}

static WHITE_LOOKUP: Lookup = build_lookup(Color::White);
static BLACK_LOOKUP: Lookup = build_lookup(Color::Black);

/// Find the code of exactly `len` bits with value `bits`, for a run of `color`
#[inline]
pub fn lookup(color: Color, len: u8, bits: u16) -> Option<Code> {
    if len == 0 || len > MAX_CODE_LEN {
        return None;
    }
    let key = (1usize << len) | bits as usize;
    match color {
        Color::White => WHITE_LOOKUP[key],
        Color::Black => BLACK_LOOKUP[key],
    }
}

/// Check whether the last 12 of `len` bits are the end-of-line code.
///
/// Anything before that is fill.
#[inline]
pub fn is_eol(len: u8, bits: u16) -> bool {
    len >= EOL_LEN && bits & EOL_MASK == EOL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prefix((la, a): (u8, u16), (lb, b): (u8, u16)) -> bool {
        la < lb && b >> (lb - la) == a
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(WHITE_TERMINATING.len(), 64);
        assert_eq!(BLACK_TERMINATING.len(), 64);
        assert_eq!(WHITE_MAKEUP.len(), 27);
        assert_eq!(BLACK_MAKEUP.len(), 27);
        assert_eq!(EXTRA_MAKEUP.len(), 13);
    }

    #[test]
    fn test_code_values_fit_length() {
        for table in &TABLES {
            for &(len, bits) in table.codes {
                assert!(len <= MAX_CODE_LEN);
                assert!(bits < (1 << len), "{:?}: {:#b}/{}", table.category, bits, len);
            }
        }
    }

    #[test]
    fn test_prefix_free_per_color() {
        for &color in &[Color::White, Color::Black] {
            let codes: Vec<(u8, u16)> = TABLES
                .iter()
                .filter(|t| t.category.applies_to(color))
                .flat_map(|t| t.codes.iter().copied())
                .collect();
            for (i, &a) in codes.iter().enumerate() {
                for (j, &b) in codes.iter().enumerate() {
                    if i != j {
                        assert_ne!(a, b, "duplicate code for {:?}", color);
                        assert!(!is_prefix(a, b), "{:?} is a prefix of {:?}", a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn test_lookup_runs() {
        let white_0 = lookup(Color::White, 8, 0b00110101).unwrap();
        assert_eq!(white_0.category, Category::Terminating(Color::White));
        assert_eq!(white_0.run, 0);

        let black_0 = lookup(Color::Black, 10, 0b0000110111).unwrap();
        assert_eq!(black_0.category, Category::Terminating(Color::Black));
        assert_eq!(black_0.run, 0);

        let white_1664 = lookup(Color::White, 6, 0b011000).unwrap();
        assert_eq!(white_1664.category, Category::Makeup(Color::White));
        assert_eq!(white_1664.run, 1664);

        let black_1728 = lookup(Color::Black, 13, 0b0000001100101).unwrap();
        assert_eq!(black_1728.category, Category::Makeup(Color::Black));
        assert_eq!(black_1728.run, 1728);

        for &color in &[Color::White, Color::Black] {
            let extra = lookup(color, 12, 0b000000011111).unwrap();
            assert_eq!(extra.category, Category::ExtraMakeup);
            assert_eq!(extra.run, 2560);
        }
    }

    #[test]
    fn test_lookup_is_color_specific() {
        // black 2, but not a white code
        assert_eq!(lookup(Color::White, 2, 0b11), None);
        assert_eq!(lookup(Color::Black, 2, 0b11).map(|c| c.run), Some(2));
        // white 2, but the black table has no 4 bit code `0111`
        assert_eq!(lookup(Color::Black, 4, 0b0111), None);
    }

    #[test]
    fn test_lookup_ignores_eol() {
        assert_eq!(lookup(Color::White, EOL_LEN, EOL), None);
        assert_eq!(lookup(Color::Black, EOL_LEN, EOL), None);
        assert_eq!(lookup(Color::White, 0, 0), None);
        assert_eq!(lookup(Color::White, 14, 0), None);
    }

    #[test]
    fn test_is_eol_suffix() {
        assert!(is_eol(12, 0b0000_0000_0001));
        assert!(is_eol(13, 0b0_0000_0000_0001));
        assert!(is_eol(13, 0b1_0000_0000_0001));
        assert!(!is_eol(11, 0b000_0000_0001));
        assert!(!is_eol(12, 0b0000_0000_0011));
    }
}
