use std::{
    fs::File,
    io::{BufReader, BufWriter, Seek, SeekFrom},
    path::Path,
};

use ccitt_t4_mh::{ascii_art, bits::ReadBits, decompress, pgm_to_io_writer, UNICODE};
use color_eyre::eyre::{self, eyre, WrapErr};
use image::{GrayImage, ImageFormat};
use log::{info, warn};

use super::opt::{DecodeConfig, Format, Options};

/// Decode the input file and return the pixels, `None` if it is empty
pub fn decode_file(
    path: &Path,
    offset: u64,
    config: &DecodeConfig,
) -> eyre::Result<Option<Vec<u8>>> {
    let file = File::open(path).wrap_err_with(|| format!("Failed to open '{}'", path.display()))?;
    let mut reader = BufReader::new(file);
    if offset > 0 {
        reader.seek(SeekFrom::Start(offset))?;
    }

    let mut bits = ReadBits::new(reader);
    bits.set_fill_order(config.fill_order());

    let options = config.codec_options();
    if options.is_none() {
        warn!("No `--max-bytes` given, using the decoder default");
    }
    let pixels = decompress(Some(&mut bits), options.as_ref())
        .wrap_err_with(|| format!("Failed to decode '{}'", path.display()))?;
    Ok(pixels)
}

fn to_image(pixels: &[u8], width: usize, invert: bool) -> eyre::Result<GrayImage> {
    let height = pixels.len() / width;
    let gray = pixels[..width * height]
        .iter()
        .map(|&p| if invert { p } else { !p })
        .collect();
    GrayImage::from_raw(width as u32, height as u32, gray)
        .ok_or_else(|| eyre!("Image of {}x{} pixels is too large", width, height))
}

/// Write the decoded pixels as requested by `opt`
pub fn write_output(pixels: &[u8], opt: &Options, config: &DecodeConfig) -> eyre::Result<()> {
    let format = opt.format;
    let width = match (config.width, format.needs_width()) {
        (Some(0), true) => return Err(eyre!("`--width` must not be 0")),
        (Some(width), _) => width,
        (None, true) => return Err(eyre!("`--width` is required for format `{}`", format)),
        (None, false) => pixels.len(),
    };
    if width > 0 && pixels.len() % width != 0 {
        warn!(
            "Dropping {} pixels after the last full row of {}",
            pixels.len() % width,
            width
        );
    }

    if format == Format::Art && opt.out.is_none() {
        let mut out = String::new();
        ascii_art(&mut out, UNICODE, pixels, width, config.invert)?;
        print!("{}", out);
        return Ok(());
    }

    let out_path = opt
        .out
        .clone()
        .unwrap_or_else(|| opt.file.with_extension(format.extension()));
    match format {
        Format::Raw => {
            std::fs::write(&out_path, pixels)?;
        }
        Format::Pgm => {
            let file = File::create(&out_path)?;
            let mut buf_writer = BufWriter::new(file);
            pgm_to_io_writer(&mut buf_writer, pixels, width, config.invert)?;
        }
        Format::Png => {
            let image = to_image(pixels, width, config.invert)?;
            image.save_with_format(&out_path, ImageFormat::Png)?;
        }
        Format::Art => {
            let mut out = String::new();
            ascii_art(&mut out, UNICODE, pixels, width, config.invert)?;
            std::fs::write(&out_path, out)?;
        }
    }
    info!("Saved {} output as '{}'", format, out_path.display());
    Ok(())
}
