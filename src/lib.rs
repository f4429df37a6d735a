//! Sprite Raster: affine sprite drawing into software framebuffers
//!
//! The [`rasterizer`] module is the core: transforms, textures, the two
//! rasterization strategies and the bounding-box helper. [`scene`] and
//! [`app`] drive it from the interactive demo binary.

pub mod rasterizer;
pub mod scene;
pub mod app;
