//! Inverse mapping: for every destination pixel under the sprite, look up
//! the source texel through the inverted transform
//!
//! Every destination pixel inside the transformed bounds is visited exactly
//! once, so there are no gaps at any scale or angle. Costs one matrix
//! inversion per draw and refuses singular transforms.
//!
//! Rows are independent (read-only texture, disjoint destination rows), so
//! the walk could be split into horizontal strips across threads.

use super::bounds::TransformedQuad;
use super::math::{AffineTransform2D, Vec2};
use super::render::{write_pixel, PixelTarget};
use super::types::{Pivot, Texture};

pub struct InverseRasterizer;

impl InverseRasterizer {
    /// Draw `texture` through `transform`, with texture-space `pivot` mapped
    /// to the transform's origin.
    ///
    /// Returns false, leaving the target untouched, when the transform is
    /// degenerate. Returns true otherwise, even if nothing ended up visible.
    pub fn draw<T: PixelTarget + ?Sized>(
        texture: &Texture,
        transform: &AffineTransform2D,
        pivot: Pivot,
        target: &mut T,
    ) -> bool {
        let w = texture.width;
        let h = texture.height;
        let pivot = pivot.offset(w, h);

        let quad = TransformedQuad::new(w, h, pivot, transform);

        let inverse = match transform.inverse() {
            Ok(inverse) => inverse,
            Err(e) => {
                log::debug!("skipping draw of '{}': {}", texture.name, e);
                return false;
            }
        };

        // Pixels outside the target would be discarded by write_pixel anyway
        let bounds = match quad.bounds().clamp_to(target.width(), target.height()) {
            Some(bounds) => bounds,
            None => return true,
        };

        let cols = (bounds.max_x - bounds.min_x + 1) as f32;
        let step_x = inverse.basis_x;
        // Back to the first column, then down one row
        let step_row = inverse.basis_y - inverse.basis_x * cols;

        let mut src = inverse.transform(Vec2::new(bounds.min_x as f32, bounds.min_y as f32)) + pivot;

        for dy in bounds.min_y..=bounds.max_y {
            for dx in bounds.min_x..=bounds.max_x {
                let (sx, sy) = src.round_to_pixel();
                if let Some(color) = texture.get(sx, sy) {
                    write_pixel(target, dx, dy, color);
                }
                src += step_x;
            }
            src += step_row;
        }

        true
    }
}
