use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Image loading error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pixel buffer holds {actual} bytes but {width}x{height} RGBA requires {expected}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Image must be at least 1x1 pixels")]
    EmptyImage,
}

pub type Result<T> = std::result::Result<T, DetectError>;
