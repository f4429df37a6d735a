//! Forward mapping: project every source texel into the destination
//!
//! Cheap and simple, but a texel lands on exactly one destination pixel, so
//! any scale above 1 or a rotation leaves holes between neighbouring texels.
//! That is the known trade-off of this strategy; use
//! [`InverseRasterizer`](super::InverseRasterizer) for gap-free output.

use super::math::{AffineTransform2D, Vec2};
use super::render::{write_pixel, PixelTarget};
use super::types::{Pivot, Texture};

pub struct ForwardRasterizer;

impl ForwardRasterizer {
    /// Draw `texture` through `transform`, with texture-space `pivot` mapped
    /// to the transform's origin.
    ///
    /// Texels are visited in scan order, so where several land on the same
    /// pixel the last one wins. A degenerate transform is drawn as-is.
    pub fn draw<T: PixelTarget + ?Sized>(
        texture: &Texture,
        transform: &AffineTransform2D,
        pivot: Pivot,
        target: &mut T,
    ) {
        let w = texture.width;
        let h = texture.height;
        if w == 0 || h == 0 {
            return;
        }

        let pivot = pivot.offset(w, h);
        let step_x = transform.basis_x;
        // Back to the start of the row, then down one
        let step_row = transform.basis_y - transform.basis_x * w as f32;

        let mut dest = transform.transform(-pivot);
        let mut texels = texture.pixels.iter();

        for _ in 0..h {
            for _ in 0..w {
                if let Some(&color) = texels.next() {
                    let (x, y) = dest.round_to_pixel();
                    write_pixel(target, x, y, color);
                }
                dest += step_x;
            }
            dest += step_row;
        }
    }
}
