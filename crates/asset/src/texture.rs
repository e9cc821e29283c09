//! Texture loading and data structures.
//! RGBA8 textures from PNG files, or a generated checkerboard for meshes
//! shipped without one.

use std::path::Path;

use anyhow::{Context, Result, ensure};

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Wrap RGBA8 pixels, checking the byte count against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        ensure!(
            data.len() == expected,
            "RGBA8 texture {}x{} needs {} bytes, got {}",
            width,
            height,
            expected,
            data.len()
        );
        ensure!(width > 0 && height > 0, "texture has zero size");
        Ok(Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        })
    }

    /// Load texture from PNG file.
    pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path).with_context(|| format!("Failed to open image {:?}", path))?;

        // Image rows run top-down while OBJ v=0 is the bottom edge.
        let rgba = image::imageops::flip_vertical(&img.to_rgba8());
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::info!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Self::from_rgba8(width, height, data)
    }

    /// Square checkerboard with `cell`-pixel squares.
    pub fn checkerboard(size: u32, cell: u32) -> Self {
        let size = size.max(1);
        let cell = cell.max(1);
        let mut data = Vec::with_capacity(size as usize * size as usize * 4);

        for y in 0..size {
            for x in 0..size {
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    data.extend_from_slice(&[255, 255, 255, 255]);
                } else {
                    data.extend_from_slice(&[128, 128, 128, 255]);
                }
            }
        }

        Self {
            data,
            width: size,
            height: size,
            format: TextureFormat::Rgba8,
        }
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size =
            self.width as usize * self.height as usize * self.bytes_per_pixel() as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = TextureData::checkerboard(16, 8);
        assert!(tex.is_valid());
        assert_eq!(&tex.data[0..4], &[255, 255, 255, 255]);
        let px = |x: u32, y: u32| {
            let i = ((y * tex.width + x) * 4) as usize;
            tex.data[i]
        };
        assert_eq!(px(8, 0), 128);
        assert_eq!(px(8, 8), 255);
    }

    #[test]
    fn rgba8_size_mismatch_is_an_error() {
        assert!(TextureData::from_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(TextureData::from_rgba8(2, 2, vec![0; 16]).is_ok());
        assert!(TextureData::from_rgba8(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn huge_dimensions_are_invalid_not_overflowing() {
        let tex = TextureData {
            data: Vec::new(),
            width: 70_000,
            height: 70_000,
            format: TextureFormat::Rgba8,
        };
        assert!(!tex.is_valid());
    }

    #[test]
    fn missing_png_is_an_error() {
        assert!(TextureData::load_png("/definitely/not/here.png").is_err());
    }
}
