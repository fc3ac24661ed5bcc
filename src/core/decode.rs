use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed data URL: {reason}")]
    InvalidDataUrl { reason: String },

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Decode an encoded image (PNG, JPEG, ...) into an RGB pixel grid.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    let image = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }
    Ok(image)
}

/// Decode a bare base64 string holding an encoded image.
pub fn decode_base64(data: &str) -> Result<RgbImage, DecodeError> {
    let cleaned: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(cleaned)?;
    decode_bytes(&bytes)
}

/// Decode a `data:image/...;base64,<data>` URL, or bare base64 when there is
/// no `data:` prefix.
pub fn decode_payload(payload: &str) -> Result<RgbImage, DecodeError> {
    let payload = payload.trim();
    let Some(rest) = payload.strip_prefix("data:") else {
        return decode_base64(payload);
    };

    let (header, data) = rest.split_once(',').ok_or_else(|| DecodeError::InvalidDataUrl {
        reason: "missing ',' separator".to_string(),
    })?;

    if !header.ends_with(";base64") {
        return Err(DecodeError::InvalidDataUrl {
            reason: format!("unsupported encoding in '{}'", header),
        });
    }

    decode_base64(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(color));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png_bytes() {
        let img = decode_bytes(&png_bytes(8, 6, [10, 20, 30])).unwrap();
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.get_pixel(3, 3).0, [10, 20, 30]);
    }

    #[test]
    fn test_decode_data_url() {
        let encoded = STANDARD.encode(png_bytes(4, 4, [200, 100, 50]));
        let payload = format!("data:image/png;base64,{}", encoded);

        let img = decode_payload(&payload).unwrap();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50]);
    }

    #[test]
    fn test_decode_bare_base64_with_line_breaks() {
        let encoded = STANDARD.encode(png_bytes(4, 4, [1, 2, 3]));
        let (head, tail) = encoded.split_at(10);
        let wrapped = format!("{}\n{}\n", head, tail);

        assert!(decode_payload(&wrapped).is_ok());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            decode_bytes(b"not an image at all"),
            Err(DecodeError::Image(_))
        ));
        assert!(matches!(
            decode_payload("data:image/png;base64,@@@@"),
            Err(DecodeError::Base64(_))
        ));
        assert!(matches!(
            decode_payload("data:image/png;base64"),
            Err(DecodeError::InvalidDataUrl { .. })
        ));
        assert!(matches!(
            decode_payload("data:text/plain,hello"),
            Err(DecodeError::InvalidDataUrl { .. })
        ));
    }
}
