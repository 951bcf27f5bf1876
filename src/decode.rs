//! Decoding boundary: turns encoded image bytes or files into a
//! [`PixelBuffer`]. The analyzers themselves never perform format decoding;
//! callers run one of these (or their own decoder) and hand the buffer over.

use std::path::Path;

use crate::error::Result;
use crate::pixel::PixelBuffer;

pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes)?;
    PixelBuffer::from_image(&image)
}

pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let image = image::open(path)?;
    PixelBuffer::from_image(&image)
}
