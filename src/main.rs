//! # Modified Huffman decoder
#![warn(missing_docs)]

mod cli;

use cli::{
    decode::{decode_file, write_output},
    opt::Options,
};
use color_eyre::eyre;
use log::{info, warn};

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;
    let config = opt.config()?;

    match decode_file(&opt.file, opt.offset, &config)? {
        Some(pixels) => {
            info!("Decoded {} pixels", pixels.len());
            write_output(&pixels, &opt, &config)
        }
        None => {
            warn!("'{}' contains no data", opt.file.display());
            Ok(())
        }
    }
}
