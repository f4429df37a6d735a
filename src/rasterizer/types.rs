//! Core types for the rasterizer

use serde::{Serialize, Deserialize};

use super::error::RasterError;
use super::math::Vec2;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha test: zero alpha never reaches the destination
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Error type for texture loading
#[derive(Debug)]
pub enum TextureError {
    ImageError(image::ImageError),
    RasterError(RasterError),
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::ImageError(e)
    }
}

impl From<RasterError> for TextureError {
    fn from(e: RasterError) -> Self {
        TextureError::RasterError(e)
    }
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::ImageError(e) => write!(f, "Image error: {}", e),
            TextureError::RasterError(e) => write!(f, "Texture error: {}", e),
        }
    }
}

impl std::error::Error for TextureError {}

/// Read-only sprite image, row-major, indexed `x + y * width`
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::WHITE; width * height],
            name: String::new(),
        }
    }

    /// Wrap existing pixel data, checking it matches the dimensions
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self, RasterError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(RasterError::PixelCountMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels, name: String::new() })
    }

    /// Load texture from an image file (PNG, JPEG or BMP)
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_image(img, name)
    }

    /// Load texture from raw encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(img, name)
    }

    fn from_image(img: image::DynamicImage, name: String) -> Result<Self, TextureError> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        let mut texture = Self::from_pixels(width as usize, height as usize, pixels)?;
        texture.name = name;
        Ok(texture)
    }

    /// Checkerboard with `cell`-sized squares; the second color may be
    /// transparent to punch holes through the sprite
    pub fn checkerboard(width: usize, height: usize, cell: usize, color1: Color, color2: Color) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / cell) + (y / cell)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self { width, height, pixels, name: "checkerboard".to_string() }
    }

    /// Texel at (x, y), or None outside the texture
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.pixels.get(x as usize + y as usize * self.width).copied()
    }
}

/// Point in texture space that the transform's origin is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Pivot {
    /// `(width / 2, height / 2)` using integer division
    #[default]
    Center,
    TopLeft,
    Custom(Vec2),
}

impl Pivot {
    /// Pivot position in texels for a texture of the given size
    pub fn offset(self, width: usize, height: usize) -> Vec2 {
        match self {
            Pivot::Center => Vec2::new((width / 2) as f32, (height / 2) as f32),
            Pivot::TopLeft => Vec2::ZERO,
            Pivot::Custom(p) => p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_checks_length() {
        let err = Texture::from_pixels(3, 2, vec![Color::WHITE; 5]).unwrap_err();
        assert_eq!(err, RasterError::PixelCountMismatch { expected: 6, actual: 5 });
        assert!(Texture::from_pixels(3, 2, vec![Color::WHITE; 6]).is_ok());
    }

    #[test]
    fn test_empty_texture_is_valid() {
        let tex = Texture::from_pixels(0, 5, Vec::new()).unwrap();
        assert_eq!(tex.get(0, 0), None);
    }

    #[test]
    fn test_get_is_row_major() {
        let pixels = (0..6).map(|i| Color::new(i as u8, 0, 0)).collect();
        let tex = Texture::from_pixels(3, 2, pixels).unwrap();
        assert_eq!(tex.get(2, 0).unwrap().r, 2);
        assert_eq!(tex.get(0, 1).unwrap().r, 3);
        assert_eq!(tex.get(2, 1).unwrap().r, 5);
    }

    #[test]
    fn test_get_out_of_range() {
        let tex = Texture::new(4, 4);
        assert_eq!(tex.get(-1, 0), None);
        assert_eq!(tex.get(0, -1), None);
        assert_eq!(tex.get(4, 0), None);
        assert_eq!(tex.get(0, 4), None);
    }

    #[test]
    fn test_checkerboard_cells() {
        let tex = Texture::checkerboard(8, 8, 2, Color::RED, Color::TRANSPARENT);
        assert_eq!(tex.get(0, 0), Some(Color::RED));
        assert_eq!(tex.get(1, 1), Some(Color::RED));
        assert_eq!(tex.get(2, 0), Some(Color::TRANSPARENT));
        assert_eq!(tex.get(2, 2), Some(Color::RED));
    }

    #[test]
    fn test_pivot_offsets() {
        assert_eq!(Pivot::Center.offset(5, 4), Vec2::new(2.0, 2.0));
        assert_eq!(Pivot::TopLeft.offset(5, 4), Vec2::ZERO);
        assert_eq!(Pivot::Custom(Vec2::new(1.5, 0.5)).offset(5, 4), Vec2::new(1.5, 0.5));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(Texture::from_bytes(&[1, 2, 3, 4], "junk".to_string()).is_err());
    }
}
