use base64::{engine::general_purpose, Engine};
use image::RgbImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode a base64 image (PNG / JPEG / …) into 3-channel RGB.
///
/// Whitespace anywhere in the payload is ignored, as is a leading
/// `data:<mime>;base64,` prefix. Alpha is dropped, not composited.
pub fn decode_base64_image(payload: &str) -> Result<RgbImage, DecodeError> {
    let bytes = decode_payload(payload)?;
    let img = image::load_from_memory(&bytes)?;
    Ok(img.to_rgb8())
}

fn decode_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let body = strip_data_uri(payload.trim_start());
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    general_purpose::STANDARD.decode(compact)
}

fn strip_data_uri(payload: &str) -> &str {
    if !payload.starts_with("data:") {
        return payload;
    }
    match payload.find(";base64,") {
        Some(idx) => &payload[idx + ";base64,".len()..],
        None => payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_base64(img: DynamicImage) -> String {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        general_purpose::STANDARD.encode(buf)
    }

    #[test]
    fn decodes_png_to_rgb() {
        let img: image::RgbImage = ImageBuffer::from_fn(5, 3, |x, _| Rgb([x as u8 * 10, 20, 30]));
        let decoded = decode_base64_image(&png_base64(DynamicImage::ImageRgb8(img))).unwrap();
        assert_eq!(decoded.dimensions(), (5, 3));
        assert_eq!(decoded.get_pixel(4, 0), &Rgb([40, 20, 30]));
    }

    #[test]
    fn grayscale_source_expands_to_three_channels() {
        let img: GrayImage = ImageBuffer::from_fn(2, 2, |_, _| Luma([77u8]));
        let decoded = decode_base64_image(&png_base64(DynamicImage::ImageLuma8(img))).unwrap();
        assert_eq!(decoded.get_pixel(1, 1), &Rgb([77, 77, 77]));
    }

    #[test]
    fn alpha_is_dropped() {
        let img: RgbaImage = ImageBuffer::from_fn(1, 1, |_, _| Rgba([10, 20, 30, 0]));
        let decoded = decode_base64_image(&png_base64(DynamicImage::ImageRgba8(img))).unwrap();
        assert_eq!(decoded.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn tolerates_data_uri_and_line_breaks() {
        let img: GrayImage = ImageBuffer::from_fn(3, 3, |_, _| Luma([200u8]));
        let plain = png_base64(DynamicImage::ImageLuma8(img));
        let (head, tail) = plain.split_at(plain.len() / 2);
        let wrapped = format!("data:image/png;base64,{head}\n{tail}\n");

        let a = decode_base64_image(&plain).unwrap();
        let b = decode_base64_image(&wrapped).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_base64_is_a_base64_error() {
        let err = decode_base64_image("not*base64!").unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn non_image_bytes_are_an_image_error() {
        let payload = general_purpose::STANDARD.encode(b"hello, not an image");
        let err = decode_base64_image(&payload).unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }

    #[test]
    fn empty_payload_is_an_image_error() {
        let err = decode_base64_image("").unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }
}
