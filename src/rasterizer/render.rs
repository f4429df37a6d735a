//! Destination buffers and the shared pixel write

use super::types::Color;

/// Anything the rasterizers can draw into
pub trait PixelTarget {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Overwrite the pixel at (x, y). Callers guarantee the position is in range.
    fn put_pixel(&mut self, x: usize, y: usize, color: Color);
}

/// Alpha-tested, bounds-checked write shared by both rasterizers.
///
/// Returns false when the pixel was skipped (outside the target or alpha 0).
#[inline]
pub fn write_pixel<T: PixelTarget + ?Sized>(target: &mut T, x: i32, y: i32, color: Color) -> bool {
    if x < 0 || y < 0 || x as usize >= target.width() || y as usize >= target.height() {
        return false;
    }
    if color.is_transparent() {
        return false;
    }
    target.put_pixel(x as usize, y as usize, color);
    true
}

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&bytes);
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let p = &self.pixels[idx..idx + 4];
            Some(Color::with_alpha(p[0], p[1], p[2], p[3]))
        } else {
            None
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            write_pixel(self, x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a thick line by drawing multiple parallel lines
    pub fn draw_thick_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: Color) {
        if thickness <= 1 {
            self.draw_line(x0, y0, x1, y1, color);
            return;
        }

        // Perpendicular offset
        let dx = (x1 - x0) as f32;
        let dy = (y1 - y0) as f32;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 0.001 {
            return;
        }

        let px = -dy / len;
        let py = dx / len;

        let half_thickness = thickness / 2;
        for i in -half_thickness..=half_thickness {
            let offset = i as f32;
            let ox0 = (x0 as f32 + px * offset) as i32;
            let oy0 = (y0 as f32 + py * offset) as i32;
            let ox1 = (x1 as f32 + px * offset) as i32;
            let oy1 = (y1 as f32 + py * offset) as i32;
            self.draw_line(ox0, oy0, ox1, oy1, color);
        }
    }
}

impl PixelTarget for Framebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.set_pixel(x, y, color);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Target that records every write and fails loudly on an out-of-range one
    pub(crate) struct RecordingTarget {
        pub width: usize,
        pub height: usize,
        pub writes: Vec<(usize, Color)>,
    }

    impl RecordingTarget {
        pub fn new(width: usize, height: usize) -> Self {
            Self { width, height, writes: Vec::new() }
        }
    }

    impl PixelTarget for RecordingTarget {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
            assert!(x < self.width && y < self.height, "write at ({}, {}) is out of range", x, y);
            let idx = x + y * self.width;
            assert!(idx < self.width * self.height);
            self.writes.push((idx, color));
        }
    }
}
