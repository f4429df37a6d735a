//! Vector and affine matrix math for 2D sprite rendering
//!
//! Transforms are stored as two basis vectors plus an origin, i.e. the
//! rows of a 2x3 matrix:
//!
//! ```text
//! | basis_x.x  basis_x.y |
//! | basis_y.x  basis_y.y |
//! | origin.x   origin.y  |
//! ```
//!
//! A point `p` maps to `p.x * basis_x + p.y * basis_y + origin`.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Serialize, Deserialize};

use super::error::RasterError;

/// 2D Vector (positions, offsets and basis axes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const X: Vec2 = Vec2 { x: 1.0, y: 0.0 };
    pub const Y: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec2 {
        let l = self.len();
        if l == 0.0 {
            return Vec2::ZERO;
        }
        Vec2 {
            x: self.x / l,
            y: self.y / l,
        }
    }

    /// Counter-clockwise perpendicular `(-y, x)`
    pub fn perp(self) -> Vec2 {
        Vec2 { x: -self.y, y: self.x }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Round both components to the nearest integer (halfway cases away from zero)
    pub fn round_to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2 { x: -self.x, y: -self.y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Vec2) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

/// 2D affine transform: rotation, scale and shear in the basis vectors,
/// translation in the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform2D {
    pub basis_x: Vec2,
    pub basis_y: Vec2,
    pub origin: Vec2,
}

impl Default for AffineTransform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform2D {
    pub fn identity() -> Self {
        Self {
            basis_x: Vec2::X,
            basis_y: Vec2::Y,
            origin: Vec2::ZERO,
        }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            origin: Vec2::new(tx, ty),
            ..Self::identity()
        }
    }

    pub fn from_basis(basis_x: Vec2, basis_y: Vec2, origin: Vec2) -> Self {
        Self { basis_x, basis_y, origin }
    }

    /// Rotation about the origin. Positive angles turn +X towards +Y
    /// (clockwise on screen, where Y points down).
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            basis_x: Vec2::new(cos, sin),
            basis_y: Vec2::new(-sin, cos),
            origin: Vec2::ZERO,
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            basis_x: Vec2::new(sx, 0.0),
            basis_y: Vec2::new(0.0, sy),
            origin: Vec2::ZERO,
        }
    }

    /// Map a point: `p.x * basis_x + p.y * basis_y + origin`
    pub fn transform(&self, p: Vec2) -> Vec2 {
        self.basis_x * p.x + self.basis_y * p.y + self.origin
    }

    /// Map a direction (linear part only, no translation)
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        self.basis_x * v.x + self.basis_y * v.y
    }

    pub fn determinant(&self) -> f32 {
        self.basis_x.x * self.basis_y.y - self.basis_x.y * self.basis_y.x
    }

    /// True when the determinant is nonzero and its reciprocal is finite
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det != 0.0 && (1.0 / det).is_finite()
    }

    /// Closed-form inverse. Refuses a zero determinant, and a subnormal one
    /// whose reciprocal overflows. Nearly singular transforms otherwise
    /// invert to very large bases.
    pub fn inverse(&self) -> Result<Self, RasterError> {
        if !self.is_invertible() {
            return Err(RasterError::DegenerateTransform);
        }
        let inv_det = 1.0 / self.determinant();

        let basis_x = Vec2::new(self.basis_y.y * inv_det, -self.basis_x.y * inv_det);
        let basis_y = Vec2::new(-self.basis_y.x * inv_det, self.basis_x.x * inv_det);

        // origin' = -M^-1 * origin
        let origin = -(basis_x * self.origin.x + basis_y * self.origin.y);

        Ok(Self { basis_x, basis_y, origin })
    }

    /// Apply `self` first, then `next`
    pub fn then(&self, next: &AffineTransform2D) -> Self {
        Self {
            basis_x: next.transform_vector(self.basis_x),
            basis_y: next.transform_vector(self.basis_y),
            origin: next.transform(self.origin),
        }
    }

    /// Unit-length basis vectors, keeping the origin. A zero axis stays zero.
    pub fn normalized(&self) -> Self {
        Self {
            basis_x: self.basis_x.normalize(),
            basis_y: self.basis_y.normalize(),
            origin: self.origin,
        }
    }

    pub fn approx_eq(&self, other: &AffineTransform2D, eps: f32) -> bool {
        let close = |a: Vec2, b: Vec2| (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps;
        close(self.basis_x, other.basis_x)
            && close(self.basis_y, other.basis_y)
            && close(self.origin, other.origin)
    }
}

/// Matrix product: `a * b` applies `b` first, then `a`
impl Mul for AffineTransform2D {
    type Output = AffineTransform2D;
    fn mul(self, rhs: AffineTransform2D) -> AffineTransform2D {
        rhs.then(&self)
    }
}
