//! Slot portraits and team logos
//!
//! Images are stored inside boards as `data:` URIs so a board serializes to a
//! single self-contained JSON value. Only PNG is accepted.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::images::PNG_DATA_URI_PREFIX;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("unsupported image format (only PNG is accepted)")]
    Unsupported,

    #[error("failed to decode PNG: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("malformed image reference")]
    MalformedRef,
}

/// A binary image embedded as a data URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        Self(format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(bytes)))
    }

    pub fn png_bytes(&self) -> Result<Vec<u8>, ImageError> {
        let encoded = self
            .0
            .strip_prefix(PNG_DATA_URI_PREFIX)
            .ok_or(ImageError::MalformedRef)?;
        STANDARD.decode(encoded).map_err(|_| ImageError::MalformedRef)
    }

    pub fn decode(&self) -> Result<DecodedImage, ImageError> {
        decode_png(&self.png_bytes()?)
    }
}

/// RGBA8 pixels, not premultiplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Sample a pixel at normalized coordinates (nearest neighbour)
    pub fn sample(&self, u: f32, v: f32) -> [u8; 4] {
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        let idx = ((y * self.width + x) * 4) as usize;
        [self.rgba[idx], self.rgba[idx + 1], self.rgba[idx + 2], self.rgba[idx + 3]]
    }
}

/// Decode PNG bytes to RGBA8, expanding palettes and stripping 16-bit depth
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, ImageError> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(ImageError::Unsupported);
    }

    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width == 0 || height == 0 {
        return Err(ImageError::Unsupported);
    }
    let (color_type, _) = reader.output_color_type();
    let mut buf = vec![0; width as usize * height as usize * color_type.samples()];
    let frame = reader.next_frame(&mut buf)?;
    let data = &buf[..frame.buffer_size()];

    let rgba = match color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 0xFF])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 0xFF]).collect(),
        png::ColorType::Indexed => return Err(ImageError::Unsupported),
    };

    Ok(DecodedImage { width, height, rgba })
}

/// Read a picked file, check it is a decodable PNG within `max_bytes`
pub fn load_image_file(path: &Path, max_bytes: u64) -> Result<ImageRef, ImageError> {
    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(ImageError::TooLarge { size, limit: max_bytes });
    }
    let bytes = fs::read(path)?;
    let decoded = decode_png(&bytes)?;
    info!(
        path = %path.display(),
        width = decoded.width,
        height = decoded.height,
        "Loaded image file"
    );
    Ok(ImageRef::from_png_bytes(&bytes))
}

/// Encode RGBA8 pixels as PNG
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, png::EncodingError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
        writer.finish()?;
    }
    debug!(width, height, bytes = out.len(), "Encoded PNG");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Vec<u8> {
        let rgba = [
            255, 0, 0, 255, /**/ 0, 255, 0, 255, //
            0, 0, 255, 255, /**/ 255, 255, 255, 128,
        ];
        encode_png(2, 2, &rgba).unwrap()
    }

    #[test]
    fn test_encode_then_decode_png() {
        let decoded = decode_png(&checker()).unwrap();
        assert_eq!((decoded.width, decoded.height), (2, 2));
        assert_eq!(decoded.sample(0.0, 0.0), [255, 0, 0, 255]);
        assert_eq!(decoded.sample(0.99, 0.99), [255, 255, 255, 128]);
    }

    #[test]
    fn test_image_ref_data_uri() {
        let bytes = checker();
        let image = ImageRef::from_png_bytes(&bytes);
        assert!(image.0.starts_with("data:image/png;base64,"));
        assert_eq!(image.png_bytes().unwrap(), bytes);
        assert_eq!(image.decode().unwrap().width, 2);
    }

    #[test]
    fn test_non_png_rejected() {
        assert!(matches!(decode_png(b"GIF89a......"), Err(ImageError::Unsupported)));
    }

    #[test]
    fn test_malformed_ref() {
        let image: ImageRef = serde_json::from_str("\"data:image/jpeg;base64,AAAA\"").unwrap();
        assert!(matches!(image.png_bytes(), Err(ImageError::MalformedRef)));
    }

    #[test]
    fn test_load_image_file_limits() {
        let dir = std::env::temp_dir().join(format!("roster-board-img-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("portrait.png");
        fs::write(&path, checker()).unwrap();

        assert!(load_image_file(&path, 1024 * 1024).is_ok());
        assert!(matches!(
            load_image_file(&path, 8),
            Err(ImageError::TooLarge { limit: 8, .. })
        ));
        assert!(matches!(
            load_image_file(&dir.join("missing.png"), 1024),
            Err(ImageError::Io(_))
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
