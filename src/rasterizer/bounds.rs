//! Transformed sprite quads and their integer bounding boxes

use super::math::{AffineTransform2D, Vec2};

/// Integer axis-aligned box, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> i32 {
        self.max_y.saturating_sub(self.min_y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x as f32
            && p.x <= self.max_x as f32
            && p.y >= self.min_y as f32
            && p.y <= self.max_y as f32
    }

    /// Intersection with the pixel grid `[0, width) x [0, height)`,
    /// or None when they do not overlap
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<Bounds> {
        if width == 0 || height == 0 {
            return None;
        }
        let last_x = i32::try_from(width - 1).unwrap_or(i32::MAX);
        let last_y = i32::try_from(height - 1).unwrap_or(i32::MAX);

        let clamped = Bounds {
            min_x: self.min_x.max(0),
            min_y: self.min_y.max(0),
            max_x: self.max_x.min(last_x),
            max_y: self.max_y.min(last_y),
        };
        if clamped.min_x > clamped.max_x || clamped.min_y > clamped.max_y {
            return None;
        }
        Some(clamped)
    }
}

/// Floor-of-min / ceil-of-max box around a quad. Nothing is clipped here.
pub struct BoundsComputer;

impl BoundsComputer {
    pub fn compute(corners: &[Vec2; 4]) -> Bounds {
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }

        // float -> int casts saturate, so huge or non-finite corners cannot panic
        Bounds {
            min_x: min.x.floor() as i32,
            min_y: min.y.floor() as i32,
            max_x: max.x.ceil() as i32,
            max_y: max.y.ceil() as i32,
        }
    }
}

/// A texture's footprint mapped through a transform.
///
/// The footprint covers whole texels, `[-0.5, w - 0.5] x [-0.5, h - 0.5]`
/// relative to the pivot, so every destination pixel whose nearest texel is
/// inside the texture falls within the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedQuad {
    /// Top-left, top-right, bottom-right, bottom-left (in texture space)
    pub corners: [Vec2; 4],
}

impl TransformedQuad {
    pub fn new(width: usize, height: usize, pivot: Vec2, transform: &AffineTransform2D) -> Self {
        let left = -0.5 - pivot.x;
        let top = -0.5 - pivot.y;
        let right = width as f32 - 0.5 - pivot.x;
        let bottom = height as f32 - 0.5 - pivot.y;

        Self {
            corners: [
                transform.transform(Vec2::new(left, top)),
                transform.transform(Vec2::new(right, top)),
                transform.transform(Vec2::new(right, bottom)),
                transform.transform(Vec2::new(left, bottom)),
            ],
        }
    }

    pub fn bounds(&self) -> Bounds {
        BoundsComputer::compute(&self.corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_minimal(b: &Bounds, corners: &[Vec2; 4]) {
        // Shrinking any edge by one pixel must exclude at least one corner
        let shrunk = [
            Bounds { min_x: b.min_x + 1, ..*b },
            Bounds { min_y: b.min_y + 1, ..*b },
            Bounds { max_x: b.max_x - 1, ..*b },
            Bounds { max_y: b.max_y - 1, ..*b },
        ];
        for s in &shrunk {
            assert!(corners.iter().any(|c| !s.contains(*c)), "{:?} is not minimal", b);
        }
    }

    #[test]
    fn test_bounds_floor_and_ceil() {
        let corners = [
            Vec2::new(1.2, 3.7),
            Vec2::new(5.5, 2.1),
            Vec2::new(4.0, 9.01),
            Vec2::new(-0.3, 6.0),
        ];
        let b = BoundsComputer::compute(&corners);
        assert_eq!(b, Bounds { min_x: -1, min_y: 2, max_x: 6, max_y: 10 });
    }

    #[test]
    fn test_bounds_contain_all_corners() {
        let quads = [
            [Vec2::new(0.5, 0.5), Vec2::new(10.5, 0.5), Vec2::new(10.5, 7.5), Vec2::new(0.5, 7.5)],
            [Vec2::new(-3.3, 2.0), Vec2::new(4.0, -8.9), Vec2::new(12.1, 1.0), Vec2::new(5.0, 11.4)],
            [Vec2::new(100.0, -50.25), Vec2::new(99.5, -49.0), Vec2::new(101.75, -48.0), Vec2::new(100.0, -51.0)],
        ];
        for corners in &quads {
            let b = BoundsComputer::compute(corners);
            for c in corners {
                assert!(b.contains(*c));
            }
            assert_minimal(&b, corners);
        }
    }

    #[test]
    fn test_bounds_of_integer_corners_are_tight() {
        let corners = [Vec2::new(2.0, 3.0), Vec2::new(6.0, 3.0), Vec2::new(6.0, 5.0), Vec2::new(2.0, 5.0)];
        let b = BoundsComputer::compute(&corners);
        assert_eq!(b, Bounds { min_x: 2, min_y: 3, max_x: 6, max_y: 5 });
        assert_eq!(b.width(), 4);
        assert_eq!(b.height(), 2);
    }

    #[test]
    fn test_bounds_survive_non_finite_corners() {
        let corners = [Vec2::new(f32::INFINITY, 0.0), Vec2::new(f32::NEG_INFINITY, 1.0), Vec2::new(0.0, f32::NAN), Vec2::ZERO];
        let b = BoundsComputer::compute(&corners);
        assert_eq!(b.min_x, i32::MIN);
        assert_eq!(b.max_x, i32::MAX);
        assert_eq!(b.width(), i32::MAX);
    }

    #[test]
    fn test_clamp_to_target() {
        let b = Bounds { min_x: -5, min_y: 2, max_x: 40, max_y: 3 };
        assert_eq!(b.clamp_to(10, 10), Some(Bounds { min_x: 0, min_y: 2, max_x: 9, max_y: 3 }));
        assert_eq!(b.clamp_to(10, 2), None);
        assert_eq!(b.clamp_to(0, 10), None);
    }

    #[test]
    fn test_quad_corners_identity_top_left_pivot() {
        let quad = TransformedQuad::new(4, 3, Vec2::ZERO, &AffineTransform2D::identity());
        assert_eq!(quad.corners[0], Vec2::new(-0.5, -0.5));
        assert_eq!(quad.corners[2], Vec2::new(3.5, 2.5));
        assert_eq!(quad.bounds(), Bounds { min_x: -1, min_y: -1, max_x: 4, max_y: 3 });
    }

    #[test]
    fn test_quarter_turn_swaps_extents() {
        let (w, h) = (40, 12);
        let upright = TransformedQuad::new(w, h, Vec2::new(20.0, 6.0), &AffineTransform2D::identity()).bounds();
        let turned = AffineTransform2D::from_basis(Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0), Vec2::ZERO);
        let rotated = TransformedQuad::new(w, h, Vec2::new(20.0, 6.0), &turned).bounds();

        assert!((rotated.width() - upright.height()).abs() <= 1);
        assert!((rotated.height() - upright.width()).abs() <= 1);
        assert!((rotated.width() - h as i32).abs() <= 1);
        assert!((rotated.height() - w as i32).abs() <= 1);
    }
}
