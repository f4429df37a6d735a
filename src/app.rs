//! Demo application state
//!
//! Owns the loaded sprites and the per-frame editing state. Input arrives as
//! a [`FrameInput`] snapshot so the window loop stays thin and everything
//! here can run headless.

use crate::rasterizer::{
    AffineTransform2D, Color, Framebuffer, Pivot, Texture, TransformedQuad, Vec2,
};
use crate::scene::{DrawStrategy, SceneConfig, SpriteConfig, TextureSource};

/// Per-step nudge applied to basis_x while auto-rotating
const ROTATE_STEP: f32 = 1.0 / 100.0;

/// Lines further out than this are not worth walking pixel by pixel
const MAX_LINE_COORD: f32 = 65536.0;

/// Everything the demo reads from the keyboard and mouse in one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Mouse position in canvas pixels
    pub mouse: Vec2,
    pub set_origin: bool,
    pub set_basis_x: bool,
    pub set_basis_y: bool,
    pub normalize: bool,
    pub toggle_rotate: bool,
    pub toggle_strategy: bool,
    pub swap_order: bool,
    pub select_prev: bool,
    pub select_next: bool,
    pub reset: bool,
    /// Camera pan in canvas pixels
    pub pan: Vec2,
    /// Multiplicative zoom about the mouse (1.0 = none)
    pub zoom: f32,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            mouse: Vec2::ZERO,
            set_origin: false,
            set_basis_x: false,
            set_basis_y: false,
            normalize: false,
            toggle_rotate: false,
            toggle_strategy: false,
            swap_order: false,
            select_prev: false,
            select_next: false,
            reset: false,
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// How the camera and a sprite's own transform are chained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionOrder {
    /// Sprite to world, then world to screen
    ObjectThenCamera,
    /// Camera first, then the sprite transform
    CameraThenObject,
}

impl CompositionOrder {
    pub fn toggled(self) -> Self {
        match self {
            CompositionOrder::ObjectThenCamera => CompositionOrder::CameraThenObject,
            CompositionOrder::CameraThenObject => CompositionOrder::ObjectThenCamera,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompositionOrder::ObjectThenCamera => "object then camera",
            CompositionOrder::CameraThenObject => "camera then object",
        }
    }
}

/// A texture placed in the world
pub struct Sprite {
    pub texture: Texture,
    pub source: TextureSource,
    pub pivot: Pivot,
    pub transform: AffineTransform2D,
}

pub struct AppState {
    pub width: usize,
    pub height: usize,
    pub background: Color,
    pub sprites: Vec<Sprite>,
    pub selected: usize,
    pub strategy: DrawStrategy,
    pub order: CompositionOrder,
    pub camera: AffineTransform2D,
    pub rotating: bool,
}

impl AppState {
    /// Build the app from a scene, substituting a checkerboard for any
    /// texture that fails to load
    pub fn from_scene(scene: &SceneConfig) -> Self {
        let sprites = scene
            .sprites
            .iter()
            .map(|cfg| {
                let texture = match cfg.texture.load() {
                    Ok(tex) => {
                        log::info!("Loaded texture: {} ({}x{})", tex.name, tex.width, tex.height);
                        tex
                    }
                    Err(e) => {
                        log::warn!("Failed to load {:?}: {}, using a checkerboard", cfg.texture, e);
                        Texture::checkerboard(32, 32, 4, Color::new(255, 0, 255), Color::BLACK)
                    }
                };
                Sprite {
                    texture,
                    source: cfg.texture.clone(),
                    pivot: cfg.pivot,
                    transform: cfg.transform,
                }
            })
            .collect();

        Self {
            width: scene.width,
            height: scene.height,
            background: scene.background,
            sprites,
            selected: 0,
            strategy: scene.strategy,
            order: CompositionOrder::ObjectThenCamera,
            camera: scene.camera,
            rotating: false,
        }
    }

    /// Snapshot of the current state as a saveable scene
    pub fn to_scene(&self) -> SceneConfig {
        SceneConfig {
            width: self.width,
            height: self.height,
            strategy: self.strategy,
            background: self.background,
            camera: self.camera,
            sprites: self
                .sprites
                .iter()
                .map(|s| SpriteConfig {
                    texture: s.source.clone(),
                    pivot: s.pivot,
                    transform: s.transform,
                })
                .collect(),
        }
    }

    pub fn selected_sprite(&self) -> Option<&Sprite> {
        self.sprites.get(self.selected)
    }

    /// Canvas position to world position. Falls back to the raw position
    /// while the camera is degenerate.
    pub fn mouse_world(&self, mouse: Vec2) -> Vec2 {
        match self.camera.inverse() {
            Ok(inv) => inv.transform(mouse),
            Err(_) => mouse,
        }
    }

    /// Full sprite-space to canvas transform for sprite `index`
    pub fn sprite_to_screen(&self, index: usize) -> Option<AffineTransform2D> {
        let sprite = self.sprites.get(index)?;
        Some(match self.order {
            CompositionOrder::ObjectThenCamera => sprite.transform.then(&self.camera),
            CompositionOrder::CameraThenObject => self.camera.then(&sprite.transform),
        })
    }

    pub fn update(&mut self, input: &FrameInput) {
        if input.select_prev {
            self.selected = self.selected.saturating_sub(1);
        }
        if input.select_next {
            self.selected += 1;
        }
        self.selected = self.selected.min(self.sprites.len().saturating_sub(1));

        if input.toggle_strategy {
            self.strategy = self.strategy.toggled();
            log::debug!("strategy: {}", self.strategy.label());
        }
        if input.swap_order {
            self.order = self.order.toggled();
            log::debug!("composition: {}", self.order.label());
        }
        if input.toggle_rotate {
            self.rotating = !self.rotating;
        }

        self.update_camera(input);

        let mouse = self.mouse_world(input.mouse);
        let centre = Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0);
        let rotating = self.rotating;

        let Some(sprite) = self.sprites.get_mut(self.selected) else {
            return;
        };
        let m = &mut sprite.transform;

        if input.reset {
            *m = AffineTransform2D::translation(centre.x, centre.y);
        }
        if input.set_origin {
            m.origin = mouse;
        }
        if input.set_basis_x {
            let half = (sprite.texture.width / 2).max(1) as f32;
            m.basis_x = (mouse - m.origin) * (1.0 / half);
        }
        if input.set_basis_y {
            let half = (sprite.texture.height / 2).max(1) as f32;
            m.basis_y = (mouse - m.origin) * (1.0 / half);
        }
        if input.normalize {
            *m = m.normalized();
        }
        if rotating {
            m.basis_x = (m.basis_x + m.basis_y * ROTATE_STEP).normalize();
            m.basis_y = m.basis_x.perp();
        }
    }

    fn update_camera(&mut self, input: &FrameInput) {
        if input.pan != Vec2::ZERO {
            self.camera.origin += input.pan;
        }
        if input.zoom > 0.0 && input.zoom != 1.0 {
            let about = input.mouse;
            self.camera = self
                .camera
                .then(&AffineTransform2D::translation(-about.x, -about.y))
                .then(&AffineTransform2D::scale(input.zoom, input.zoom))
                .then(&AffineTransform2D::translation(about.x, about.y));
        }
    }

    /// Draw every sprite plus overlays for the selected one.
    ///
    /// Returns, per sprite, whether it was drawn (false when the inverse
    /// strategy skipped a degenerate transform).
    pub fn render(&self, fb: &mut Framebuffer) -> Vec<bool> {
        fb.clear(self.background);

        let drawn: Vec<bool> = (0..self.sprites.len())
            .map(|i| {
                let sprite = &self.sprites[i];
                let to_screen = self.sprite_to_screen(i).unwrap_or_default();
                self.strategy.draw(&sprite.texture, &to_screen, sprite.pivot, fb)
            })
            .collect();

        if let (Some(sprite), Some(to_screen)) = (self.selected_sprite(), self.sprite_to_screen(self.selected)) {
            let tex = &sprite.texture;
            let pivot = sprite.pivot.offset(tex.width, tex.height);
            let quad = TransformedQuad::new(tex.width, tex.height, pivot, &to_screen);
            for i in 0..4 {
                draw_segment(fb, quad.corners[i], quad.corners[(i + 1) % 4], 1, Color::BLACK);
            }

            let origin = to_screen.origin;
            let half_w = (tex.width / 2) as f32;
            let half_h = (tex.height / 2) as f32;
            if to_screen.basis_x != Vec2::ZERO {
                draw_segment(fb, origin, origin + to_screen.basis_x * half_w, 2, Color::RED);
            }
            if to_screen.basis_y != Vec2::ZERO {
                draw_segment(fb, origin, origin + to_screen.basis_y * half_h, 2, Color::GREEN);
            }
            if origin != self.camera.origin {
                draw_segment(fb, self.camera.origin, origin, 1, Color::WHITE);
            }
        }

        drawn
    }
}

/// Canvas point to integer pixel, or None when it is too far out to draw
fn line_point(p: Vec2) -> Option<(i32, i32)> {
    if !p.x.is_finite() || !p.y.is_finite() || p.x.abs() > MAX_LINE_COORD || p.y.abs() > MAX_LINE_COORD {
        return None;
    }
    Some(p.round_to_pixel())
}

fn draw_segment(fb: &mut Framebuffer, from: Vec2, to: Vec2, thickness: i32, color: Color) {
    if let (Some((x0, y0)), Some((x1, y1))) = (line_point(from), line_point(to)) {
        fb.draw_thick_line(x0, y0, x1, y1, thickness, color);
    }
}
