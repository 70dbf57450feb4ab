use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// An image picked by the user, validated and ready for submission.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub data_url: String,
}

impl SelectedImage {
    /// Read and validate a file. Anything that does not decode as an
    /// image is rejected here, before it can touch any other state.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = ::image::guess_format(&bytes).context("not an image file")?;
        ::image::load_from_memory(&bytes).context("corrupt or unsupported image")?;

        let mime = format.to_mime_type();
        let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(&bytes));
        Ok(Self {
            bytes,
            mime,
            data_url,
        })
    }

    /// RGBA pixels scaled down to fit the given box, for on-screen
    /// preview.
    pub fn preview_rgba(&self, max_width: u32, max_height: u32) -> Result<(u16, u16, Vec<u8>)> {
        let img = ::image::load_from_memory(&self.bytes).context("failed to decode image")?;
        let img = img.thumbnail(max_width, max_height);
        let rgba = img.to_rgba8();
        Ok((rgba.width() as u16, rgba.height() as u16, rgba.into_raw()))
    }
}

/// Extract the raw bytes from a `data:*;base64,...` URL. Bare base64
/// payloads are accepted too, matching what the backend emits.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let payload = match data_url.split_once("base64,") {
        Some((_, rest)) => rest,
        None => data_url,
    };
    STANDARD
        .decode(payload.trim())
        .context("invalid base64 image payload")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = ::image::RgbaImage::from_pixel(4, 4, ::image::Rgba([255, 0, 0, 255]));
        let mut buf = std::io::Cursor::new(Vec::new());
        ::image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ::image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_accepts_png() {
        let selected = SelectedImage::from_bytes(tiny_png()).unwrap();
        assert_eq!(selected.mime, "image/png");
        assert!(selected.data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_rejects_non_image() {
        let result = SelectedImage::from_bytes(b"definitely not an image".to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SelectedImage::from_path(dir.path().join("nope.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("santa.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let selected = SelectedImage::from_path(&path).unwrap();
        let decoded = decode_data_url(&selected.data_url).unwrap();
        assert_eq!(decoded, selected.bytes);
    }

    #[test]
    fn test_decode_bare_base64() {
        let bytes = tiny_png();
        let encoded = STANDARD.encode(&bytes);
        assert_eq!(decode_data_url(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_preview_fits_box() {
        let selected = SelectedImage::from_bytes(tiny_png()).unwrap();
        let (w, h, rgba) = selected.preview_rgba(2, 2).unwrap();
        assert!(w <= 2 && h <= 2);
        assert_eq!(rgba.len(), w as usize * h as usize * 4);
    }
}
