use std::fmt;
use std::path::{Path, PathBuf};

/// Failure to read or decode an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureError {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load texture {}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for TextureError {}

/// Decoded RGB8 pixels, stored bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl TextureImage {
    /// Reads and decodes an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| TextureError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let image = Self::decode(&bytes).map_err(|message| TextureError {
            path: path.to_path_buf(),
            message,
        })?;

        log::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        Ok(image)
    }

    /// Decodes an in-memory image (any format enabled on the `image` crate).
    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        let decoded = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
        let rgb = decoded.flipv().to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err("image has zero size".to_string());
        }

        Ok(Self {
            width,
            height,
            rgb: rgb.into_raw(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGB8 rows, bottom to top.
    #[inline]
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Expands to opaque RGBA8.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.rgb.len() / 3 * 4);
        for px in self.rgb.chunks_exact(3) {
            out.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};

    fn png(img: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = TextureImage::load("definitely/not/here/plano.png").unwrap_err();
        assert_eq!(err.path, PathBuf::from("definitely/not/here/plano.png"));
        assert!(!err.message.is_empty());
        assert!(err.to_string().contains("plano.png"));
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(TextureImage::decode(b"not an image").is_err());
    }

    #[test]
    fn rows_are_flipped() {
        // top row red, bottom row blue
        let img = RgbImage::from_fn(2, 2, |_, y| {
            if y == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });

        let tex = TextureImage::decode(&png(img)).expect("decode");
        assert_eq!((tex.width(), tex.height()), (2, 2));
        assert_eq!(&tex.rgb()[0..3], &[0, 0, 255]);
        assert_eq!(&tex.rgb()[6..9], &[255, 0, 0]);
    }

    #[test]
    fn rgba_expansion_is_opaque() {
        let img = RgbImage::from_pixel(3, 1, image::Rgb([10, 20, 30]));
        let tex = TextureImage::decode(&png(img)).expect("decode");
        let rgba = tex.to_rgba();
        assert_eq!(rgba.len(), 3 * 4);
        assert!(rgba.chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
    }
}
