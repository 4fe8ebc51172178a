//! Bitmap import and export.

use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::bitmap::Bitmap;

#[derive(Debug)]
pub enum ImageIoError {
    Io(std::io::Error),
    Decode(image::ImageError),
    Encode(image::ImageError),
    /// Pixel data did not match the dimensions it claimed.
    SizeMismatch {
        width: u32,
        height: u32,
        len: usize,
    },
}

impl fmt::Display for ImageIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageIoError::Io(e) => write!(f, "I/O error: {e}"),
            ImageIoError::Decode(e) => write!(f, "decode error: {e}"),
            ImageIoError::Encode(e) => write!(f, "encode error: {e}"),
            ImageIoError::SizeMismatch { width, height, len } => {
                write!(f, "{len} bytes do not form a {width}x{height} RGBA image")
            }
        }
    }
}

impl std::error::Error for ImageIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageIoError::Io(e) => Some(e),
            ImageIoError::Decode(e) | ImageIoError::Encode(e) => Some(e),
            ImageIoError::SizeMismatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImageIoError {
    fn from(e: std::io::Error) -> Self {
        ImageIoError::Io(e)
    }
}

/// Encodes the bitmap as an RGBA8 PNG.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, ImageIoError> {
    let mut out = Vec::new();
    write_png(bitmap, &mut out)?;
    Ok(out)
}

/// Writes the bitmap to `path` as PNG, replacing any existing file.
pub fn save_png(bitmap: &Bitmap, path: impl AsRef<Path>) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_png(bitmap, &mut writer)?;
    writer.flush()?;

    log::info!("exported {}x{} bitmap to {}", bitmap.size(), bitmap.size(), path.display());
    Ok(())
}

fn write_png<W: Write>(bitmap: &Bitmap, writer: W) -> Result<(), ImageIoError> {
    let size = bitmap.size();
    PngEncoder::new(writer)
        .write_image(bitmap.as_rgba(), size, size, image::ExtendedColorType::Rgba8)
        .map_err(ImageIoError::Encode)
}

/// Decodes an encoded image (any enabled format) and composites it onto the
/// bitmap at the origin.
///
/// Images larger than the bitmap are clipped; smaller ones leave the rest of
/// the bitmap untouched. Returns the decoded image dimensions.
pub fn decode_into(bitmap: &mut Bitmap, bytes: &[u8]) -> Result<(u32, u32), ImageIoError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(ImageIoError::Decode)?
        .into_rgba8();
    let (width, height) = rgba.dimensions();

    if !bitmap.blit_rgba(width, height, rgba.as_raw()) {
        return Err(ImageIoError::SizeMismatch {
            width,
            height,
            len: rgba.as_raw().len(),
        });
    }

    if width != bitmap.size() || height != bitmap.size() {
        log::debug!(
            "imported {width}x{height} image into {0}x{0} bitmap (clipped/partial)",
            bitmap.size()
        );
    }
    Ok((width, height))
}

/// Reads `path` and imports it like [`decode_into`].
pub fn load_into(bitmap: &mut Bitmap, path: impl AsRef<Path>) -> Result<(u32, u32), ImageIoError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let dims = decode_into(bitmap, &bytes)?;
    log::info!("imported {} ({}x{})", path.display(), dims.0, dims.1);
    Ok(dims)
}
