use image::DynamicImage;

use crate::error::{DetectError, Result};

/// A decoded RGBA image as supplied by the caller: 4 bytes per pixel,
/// row-major. Only the RGB channels are read during analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DetectError::EmptyImage);
        }

        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(DetectError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::new(width, height, rgba.into_raw())
    }

    pub fn total_pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The buffer is readable when its byte length is consistent with the
    /// stated dimensions. An inconsistent buffer degrades the image analysis
    /// instead of failing it.
    pub fn is_readable(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * 4
    }

    /// Copies the top-left region of at most `max` x `max` pixels. All
    /// statistical scans run over this crop to bound their cost.
    pub(crate) fn region(&self, max: u32) -> Region {
        let width = self.width.min(max) as usize;
        let height = self.height.min(max) as usize;
        let stride = self.width as usize * 4;

        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            let start = y * stride;
            data.extend_from_slice(&self.data[start..start + width * 4]);
        }

        Region {
            width,
            height,
            data,
        }
    }
}

/// A contiguous crop of the source buffer, indexed with its own width.
pub(crate) struct Region {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_length() {
        let result = PixelBuffer::new(10, 10, vec![0; 12]);
        assert!(matches!(
            result,
            Err(DetectError::BufferSizeMismatch { expected: 400, .. })
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 5, vec![]),
            Err(DetectError::EmptyImage)
        ));
    }

    #[test]
    fn region_crops_top_left() {
        let mut data = vec![0u8; 8 * 4 * 4];
        // mark pixel (1, 2)
        data[(2 * 8 + 1) * 4] = 200;
        let buffer = PixelBuffer::new(8, 4, data).unwrap();

        let region = buffer.region(3);
        assert_eq!(region.width, 3);
        assert_eq!(region.height, 3);
        assert_eq!(region.data.len(), 3 * 3 * 4);
        assert_eq!(region.data[(2 * 3 + 1) * 4], 200);
    }
}
