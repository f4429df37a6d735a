//! Sprite Raster demo: interactive affine sprite rasterization
//!
//! Controls:
//! - 0 / 1 / 2: copy the mouse into basis X / basis Y / origin of the selected sprite
//! - N: normalize the basis, R: toggle auto-rotation
//! - I: toggle forward / inverse rasterization
//! - S: swap camera / object composition order
//! - Left / Right: select sprite, Backspace: reset sprite
//! - Right drag: pan camera, wheel: zoom camera
//! - F5: save scene, Escape: quit

use std::path::PathBuf;

use macroquad::prelude::*;
use sprite_raster::app::{AppState, FrameInput};
use sprite_raster::rasterizer::{Framebuffer, Vec2};
use sprite_raster::scene::{load_scene, save_scene, SceneConfig};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_SCENE_FILE: &str = "scene.ron";
const ZOOM_STEP: f32 = 1.1;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Sprite Raster v{}", VERSION),
        window_width: 768,
        window_height: 768,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Largest canvas-aspect rectangle centred in the window: (x, y, w, h)
fn fit_canvas(canvas_w: usize, canvas_h: usize) -> (f32, f32, f32, f32) {
    let screen_w = screen_width();
    let screen_h = screen_height();
    let scale = (screen_w / canvas_w as f32).min(screen_h / canvas_h as f32);
    let w = canvas_w as f32 * scale;
    let h = canvas_h as f32 * scale;
    ((screen_w - w) / 2.0, (screen_h - h) / 2.0, w, h)
}

fn read_input(app: &AppState, draw_rect: (f32, f32, f32, f32), last_mouse: Vec2) -> FrameInput {
    let (draw_x, draw_y, draw_w, draw_h) = draw_rect;
    let (mx, my) = mouse_position();
    let mouse = Vec2::new(
        (mx - draw_x) * app.width as f32 / draw_w,
        (my - draw_y) * app.height as f32 / draw_h,
    );

    let pan = if is_mouse_button_down(MouseButton::Right) {
        mouse - last_mouse
    } else {
        Vec2::ZERO
    };

    let wheel = mouse_wheel().1;
    let zoom = if wheel > 0.0 {
        ZOOM_STEP
    } else if wheel < 0.0 {
        1.0 / ZOOM_STEP
    } else {
        1.0
    };

    FrameInput {
        mouse,
        set_origin: is_key_pressed(KeyCode::Key2),
        set_basis_x: is_key_pressed(KeyCode::Key0),
        set_basis_y: is_key_pressed(KeyCode::Key1),
        normalize: is_key_pressed(KeyCode::N),
        toggle_rotate: is_key_pressed(KeyCode::R),
        toggle_strategy: is_key_pressed(KeyCode::I),
        swap_order: is_key_pressed(KeyCode::S),
        select_prev: is_key_pressed(KeyCode::Left),
        select_next: is_key_pressed(KeyCode::Right),
        reset: is_key_pressed(KeyCode::Backspace),
        pan,
        zoom,
    }
}

fn draw_readouts(app: &AppState, mouse: Vec2, drawn: &[bool]) {
    let Some(sprite) = app.selected_sprite() else {
        return;
    };
    let m = sprite.transform;

    let rows = [
        (format!("R0={{ {:.2}, {:.2} }}", m.basis_x.x, m.basis_x.y), RED),
        (format!("R1={{ {:.2}, {:.2} }}", m.basis_y.x, m.basis_y.y), GREEN),
        (format!("R2={{ {:.2}, {:.2} }}", m.origin.x, m.origin.y), WHITE),
    ];
    for (i, (text, color)) in rows.iter().enumerate() {
        draw_text(text, 20.0, 30.0 + i as f32 * 30.0, 30.0, *color);
    }

    let world = app.mouse_world(mouse);
    draw_text(&format!("Mouse = {{ {:.2}, {:.2} }}", world.x, world.y), 420.0, 30.0, 30.0, WHITE);

    let status = if drawn.get(app.selected).copied().unwrap_or(true) {
        format!("{} | det {:.3}", app.strategy.label(), m.determinant())
    } else {
        format!("{} | degenerate, not drawn", app.strategy.label())
    };
    draw_text(&status, 420.0, 60.0, 30.0, YELLOW);

    draw_text(
        &format!(
            "Sprite {}/{} | {} | 0/1/2 set rows, L/R change sprite",
            app.selected + 1,
            app.sprites.len(),
            app.order.label()
        ),
        20.0,
        screen_height() - 20.0,
        24.0,
        LIGHTGRAY,
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene_path = std::env::args().nth(1).map(PathBuf::from);
    let scene = match &scene_path {
        Some(path) => match load_scene(path) {
            Ok(scene) => {
                log::info!("Loaded scene {} ({} sprites)", path.display(), scene.sprites.len());
                scene
            }
            Err(e) => {
                log::error!("Failed to load scene {}: {}, using the default", path.display(), e);
                SceneConfig::default()
            }
        },
        None => SceneConfig::default(),
    };

    let mut app = AppState::from_scene(&scene);
    let mut fb = Framebuffer::new(app.width, app.height);
    let mut last_mouse = Vec2::ZERO;

    log::info!("=== Sprite Raster ===");

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let draw_rect = fit_canvas(app.width, app.height);
        let input = read_input(&app, draw_rect, last_mouse);
        last_mouse = input.mouse;
        app.update(&input);

        if is_key_pressed(KeyCode::F5) {
            let path = scene_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_SCENE_FILE));
            match save_scene(&app.to_scene(), &path) {
                Ok(()) => log::info!("Saved scene to {}", path.display()),
                Err(e) => log::error!("Failed to save scene: {}", e),
            }
        }

        let drawn = app.render(&mut fb);

        clear_background(BLACK);

        // Convert framebuffer to texture and draw it scaled to the window
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);

        let (draw_x, draw_y, draw_w, draw_h) = draw_rect;
        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(draw_w, draw_h)),
                ..Default::default()
            },
        );

        draw_readouts(&app, input.mouse, &drawn);

        next_frame().await;
    }
}
