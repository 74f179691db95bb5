use std::{borrow::Cow, fmt, io, path::PathBuf, str::FromStr};

use ccitt_t4_mh::{bits::FillOrder, CodecOptions};
use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

/// The format to write the decoded pixels in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// One byte per pixel, 0 for white, 255 for black
    Raw,
    /// Binary 8-bit graymap
    Pgm,
    /// PNG image
    Png,
    /// Print to the console
    Art,
}

#[derive(Debug)]
/// Failed to parse a format name
pub struct FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `raw`, `pgm`, `png` or `art`")
    }
}

impl std::error::Error for FormatError {}

impl Default for Format {
    fn default() -> Self {
        Format::Raw
    }
}

impl FromStr for Format {
    type Err = FormatError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "raw" | "bin" => Ok(Self::Raw),
            "pgm" => Ok(Self::Pgm),
            "png" => Ok(Self::Png),
            "art" | "txt" => Ok(Self::Art),
            _ => Err(FormatError {}),
        }
    }
}

impl Format {
    /// The file extension of this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Pgm => "pgm",
            Self::Png => "png",
            Self::Art => "txt",
        }
    }

    /// Whether this format needs to know the width of a row
    pub fn needs_width(&self) -> bool {
        !matches!(self, Self::Raw)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Art => f.write_str("art"),
            _ => f.write_str(self.extension()),
        }
    }
}

/// Order of the bits in a byte
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitOrder {
    /// Most significant bit first
    Msb,
    /// Least significant bit first
    Lsb,
}

#[derive(Debug)]
/// Failed to parse a bit order
pub struct BitOrderError {}

impl fmt::Display for BitOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use `msb` or `lsb`")
    }
}

impl std::error::Error for BitOrderError {}

impl FromStr for BitOrder {
    type Err = BitOrderError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "msb" | "1" => Ok(Self::Msb),
            "lsb" | "2" => Ok(Self::Lsb),
            _ => Err(BitOrderError {}),
        }
    }
}

impl From<BitOrder> for FillOrder {
    fn from(order: BitOrder) -> Self {
        match order {
            BitOrder::Msb => FillOrder::MsbToLsb,
            BitOrder::Lsb => FillOrder::LsbToMsb,
        }
    }
}

#[derive(Parser)]
/// Decode a Modified Huffman (CCITT Group 3, 1-D) bitstream
pub struct Options {
    /// The file with the encoded data
    pub file: PathBuf,
    /// Where to store the output
    pub out: Option<PathBuf>,
    /// Format of the output. Valid choices are:
    ///
    /// "raw", "pgm", "png" and "art"
    #[clap(default_value_t, long, short = 'F')]
    pub format: Format,
    /// Number of bytes to skip before the encoded data starts
    #[clap(long, default_value_t = 0)]
    pub offset: u64,

    /// Decode parameters passed as command line args
    #[clap(flatten)]
    pub cl_config: DecodeConfig,

    /// Decode parameters as a file
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO Error")]
    Io(#[from] io::Error),
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

impl Options {
    /// The decode parameters, command line args take precedence over the file
    pub fn config(&self) -> Result<Cow<DecodeConfig>, ConfigError> {
        if let Some(config_path) = &self.config {
            let text = std::fs::read_to_string(config_path)?;
            let mut config: DecodeConfig = ron::from_str(&text)?;
            if let Some(max_bytes) = self.cl_config.max_bytes {
                config.max_bytes = Some(max_bytes);
            }
            if let Some(width) = self.cl_config.width {
                config.width = Some(width);
            }
            if let Some(fill_order) = self.cl_config.fill_order {
                config.fill_order = Some(fill_order);
            }
            if self.cl_config.invert {
                config.invert = true;
            }
            Ok(Cow::Owned(config))
        } else {
            Ok(Cow::Borrowed(&self.cl_config))
        }
    }
}

#[derive(Debug, Default, Clone, Parser, Deserialize)]
pub struct DecodeConfig {
    /// Size of the decoded output in pixels
    #[clap(long, short = 'n')]
    #[serde(default)]
    pub max_bytes: Option<usize>,
    /// Pixels per row, needed for image output
    #[clap(long, short = 'w')]
    #[serde(default)]
    pub width: Option<usize>,
    /// Order of the bits in a byte, "msb" (default) or "lsb"
    #[clap(long)]
    #[serde(default)]
    pub fill_order: Option<BitOrder>,
    /// Invert black and white
    #[clap(long, short = 'i')]
    #[serde(default)]
    pub invert: bool,
}

impl DecodeConfig {
    /// Options for the decoder, `None` leaves the choice to the decoder
    pub fn codec_options(&self) -> Option<CodecOptions> {
        self.max_bytes.map(CodecOptions::with_max_bytes)
    }

    /// The fill order of the input
    pub fn fill_order(&self) -> FillOrder {
        self.fill_order.map(FillOrder::from).unwrap_or_default()
    }
}
