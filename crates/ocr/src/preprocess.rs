use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

// BT.601 luma weights in 14-bit fixed point (0.299, 0.587, 0.114).
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Single-channel luma. Recognition is markedly more reliable on grayscale.
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b] = img.get_pixel(x, y).0;
        let weighted = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
        Luma([((weighted + (1 << (SHIFT - 1))) >> SHIFT) as u8])
    })
}

/// Backends take encoded bytes rather than raw buffers.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
