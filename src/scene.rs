//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files: the
//! canvas, a camera, and the sprites the demo draws every frame.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::rasterizer::{
    AffineTransform2D, Color, ForwardRasterizer, InverseRasterizer, Pivot, PixelTarget, Texture,
    TextureError,
};

/// Largest canvas side the window blit can upload
pub const MAX_CANVAS_SIDE: usize = u16::MAX as usize;

/// Which rasterizer the scene draws its sprites with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawStrategy {
    /// Walk source texels (may leave gaps)
    Forward,
    /// Walk destination pixels inside the quad's bounds
    #[default]
    Inverse,
}

impl DrawStrategy {
    pub fn toggled(self) -> Self {
        match self {
            DrawStrategy::Forward => DrawStrategy::Inverse,
            DrawStrategy::Inverse => DrawStrategy::Forward,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrawStrategy::Forward => "Forward",
            DrawStrategy::Inverse => "Inverse",
        }
    }

    /// Dispatch to the selected rasterizer. Returns false only when the
    /// inverse path skipped a degenerate transform.
    pub fn draw<T: PixelTarget + ?Sized>(
        self,
        texture: &Texture,
        transform: &AffineTransform2D,
        pivot: Pivot,
        target: &mut T,
    ) -> bool {
        match self {
            DrawStrategy::Forward => {
                ForwardRasterizer::draw(texture, transform, pivot, target);
                true
            }
            DrawStrategy::Inverse => InverseRasterizer::draw(texture, transform, pivot, target),
        }
    }
}

/// Where a sprite's pixels come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextureSource {
    /// Image file, relative to the working directory
    File(PathBuf),
    /// Generated checkerboard with transparent holes
    Checkerboard { width: usize, height: usize, cell: usize },
}

impl TextureSource {
    pub fn load(&self) -> Result<Texture, TextureError> {
        match self {
            TextureSource::File(path) => Texture::from_file(path),
            TextureSource::Checkerboard { width, height, cell } => Ok(Texture::checkerboard(
                *width,
                *height,
                *cell,
                Color::new(230, 140, 40),
                Color::TRANSPARENT,
            )),
        }
    }
}

/// One drawable sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    pub texture: TextureSource,
    #[serde(default)]
    pub pivot: Pivot,
    /// Sprite space to world space
    #[serde(default)]
    pub transform: AffineTransform2D,
}

/// Complete scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub strategy: DrawStrategy,
    #[serde(default = "default_background")]
    pub background: Color,
    /// World space to screen space
    #[serde(default)]
    pub camera: AffineTransform2D,
    pub sprites: Vec<SpriteConfig>,
}

fn default_background() -> Color {
    Color::new(30, 30, 35)
}

impl Default for SceneConfig {
    /// Three checkerboard sprites stacked on the canvas centre
    fn default() -> Self {
        let (width, height) = (768, 768);
        let centre = AffineTransform2D::translation(width as f32 / 2.0, height as f32 / 2.0);
        let sprite = |w, h, cell| SpriteConfig {
            texture: TextureSource::Checkerboard { width: w, height: h, cell },
            pivot: Pivot::Center,
            transform: centre,
        };
        Self {
            width,
            height,
            strategy: DrawStrategy::Inverse,
            background: default_background(),
            camera: AffineTransform2D::identity(),
            sprites: vec![sprite(128, 96, 16), sprite(64, 64, 8), sprite(200, 40, 10)],
        }
    }
}

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    InvalidCanvas { width: usize, height: usize },
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            SceneError::InvalidCanvas { width, height } => {
                write!(f, "Invalid canvas size {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for SceneError {}

fn validate(scene: SceneConfig) -> Result<SceneConfig, SceneError> {
    let side_ok = |side: usize| side > 0 && side <= MAX_CANVAS_SIDE;
    if !side_ok(scene.width) || !side_ok(scene.height) {
        return Err(SceneError::InvalidCanvas { width: scene.width, height: scene.height });
    }
    Ok(scene)
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneConfig, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<SceneConfig, SceneError> {
    let scene: SceneConfig = ron::from_str(s)?;
    validate(scene)
}

/// Serialize a scene to a pretty-printed RON string
pub fn scene_to_string(scene: &SceneConfig) -> Result<String, SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    Ok(ron::ser::to_string_pretty(scene, config)?)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &SceneConfig, path: P) -> Result<(), SceneError> {
    let contents = scene_to_string(scene)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec2;

    #[test]
    fn test_minimal_scene_uses_defaults() {
        let scene = load_scene_from_str(
            r#"(
                width: 320,
                height: 240,
                sprites: [
                    (texture: Checkerboard(width: 16, height: 8, cell: 4)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(scene.strategy, DrawStrategy::Inverse);
        assert_eq!(scene.background, Color::new(30, 30, 35));
        assert_eq!(scene.camera, AffineTransform2D::identity());
        assert_eq!(scene.sprites.len(), 1);
        assert_eq!(scene.sprites[0].pivot, Pivot::Center);
        assert_eq!(scene.sprites[0].transform, AffineTransform2D::identity());
    }

    #[test]
    fn test_full_sprite_fields() {
        let scene = load_scene_from_str(
            r#"(
                width: 64,
                height: 64,
                strategy: Forward,
                sprites: [
                    (
                        texture: File("assets/ship.png"),
                        pivot: Custom((x: 1.0, y: 2.0)),
                        transform: (
                            basis_x: (x: 0.0, y: 2.0),
                            basis_y: (x: -2.0, y: 0.0),
                            origin: (x: 32.0, y: 16.0),
                        ),
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(scene.strategy, DrawStrategy::Forward);
        let sprite = &scene.sprites[0];
        assert_eq!(sprite.texture, TextureSource::File(PathBuf::from("assets/ship.png")));
        assert_eq!(sprite.pivot, Pivot::Custom(Vec2::new(1.0, 2.0)));
        assert_eq!(sprite.transform.basis_y, Vec2::new(-2.0, 0.0));
        assert_eq!(sprite.transform.origin, Vec2::new(32.0, 16.0));
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let err = load_scene_from_str("(width: 0, height: 10, sprites: [])").unwrap_err();
        assert!(matches!(err, SceneError::InvalidCanvas { width: 0, height: 10 }));
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        let err = load_scene_from_str("(width: 70000, height: 10, sprites: [])").unwrap_err();
        assert!(matches!(err, SceneError::InvalidCanvas { width: 70000, height: 10 }));

        let err = load_scene_from_str("(width: 10, height: 65536, sprites: [])").unwrap_err();
        assert!(matches!(err, SceneError::InvalidCanvas { width: 10, height: 65536 }));

        let scene = load_scene_from_str("(width: 65535, height: 1, sprites: [])").unwrap();
        assert_eq!(scene.width as u16 as usize, scene.width);
    }

    #[test]
    fn test_strategy_toggle() {
        assert_eq!(DrawStrategy::Forward.toggled(), DrawStrategy::Inverse);
        assert_eq!(DrawStrategy::Inverse.toggled(), DrawStrategy::Forward);
    }

    #[test]
    fn test_strategy_dispatch_on_degenerate_transform() {
        let tex = Texture::checkerboard(4, 4, 1, Color::RED, Color::GREEN);
        let mut t = AffineTransform2D::translation(8.0, 8.0);
        t.basis_y = Vec2::ZERO;

        let mut fb = crate::rasterizer::Framebuffer::new(16, 16);
        assert!(!DrawStrategy::Inverse.draw(&tex, &t, Pivot::Center, &mut fb));
        assert!(fb.pixels.iter().all(|b| *b == 0));

        assert!(DrawStrategy::Forward.draw(&tex, &t, Pivot::Center, &mut fb));
        assert!(fb.pixels.iter().any(|b| *b != 0));
    }

    #[test]
    fn test_parse_error_reported() {
        let err = load_scene_from_str("(width: 10").unwrap_err();
        assert!(matches!(err, SceneError::ParseError(_)));
    }

    #[test]
    fn test_default_scene_survives_ron() {
        let scene = SceneConfig::default();
        let text = scene_to_string(&scene).unwrap();
        assert_eq!(load_scene_from_str(&text).unwrap(), scene);
    }

    #[test]
    fn test_bundled_scene_parses() {
        let scene = load_scene_from_str(include_str!("../assets/scene.ron")).unwrap();
        assert_eq!((scene.width, scene.height), (768, 768));
        assert_eq!(scene.sprites.len(), 3);
        assert_eq!(scene.sprites[1].pivot, Pivot::TopLeft);
        assert!(scene.sprites.iter().all(|s| s.transform.is_invertible()));
    }

    #[test]
    fn test_checkerboard_source_loads() {
        let tex = TextureSource::Checkerboard { width: 10, height: 6, cell: 2 }.load().unwrap();
        assert_eq!((tex.width, tex.height), (10, 6));
        assert!(tex.get(2, 0).unwrap().is_transparent());
        assert!(!tex.get(0, 0).unwrap().is_transparent());
    }

    #[test]
    fn test_missing_file_source_fails() {
        let source = TextureSource::File(PathBuf::from("definitely/not/here.png"));
        assert!(source.load().is_err());
    }
}
