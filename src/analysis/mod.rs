pub mod image;
pub mod pixel_stats;
pub mod resolution;
pub mod text;
