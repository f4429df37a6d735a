//! Software sprite rasterizer for 2D affine transforms
//!
//! Features:
//! - Basis/origin affine transforms (rotation, scale, shear, translation)
//! - Forward mapping (texel -> pixel, fast, leaves gaps when upscaled)
//! - Inverse mapping (pixel -> texel, gap-free, needs an invertible transform)
//! - Nearest-neighbour sampling with a binary alpha test
//!
//! Nothing here owns the texture or the destination; callers pass both in
//! on every draw along with that frame's transform.

mod error;
mod math;
mod types;
mod bounds;
mod render;
mod forward;
mod inverse;

pub use error::*;
pub use math::*;
pub use types::*;
pub use bounds::*;
pub use render::*;
pub use forward::*;
pub use inverse::*;
