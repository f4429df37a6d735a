//! Error types for the rasterizer core

/// Failures surfaced by the transform and texture APIs.
///
/// Out-of-range pixels are not errors: they are skipped per pixel while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterError {
    /// Determinant is exactly zero, so the transform has no inverse
    DegenerateTransform,
    /// Pixel data does not match `width * height`
    PixelCountMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::DegenerateTransform => write!(f, "degenerate transform (determinant is zero)"),
            RasterError::PixelCountMismatch { expected, actual } => {
                write!(f, "expected {} pixels, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for RasterError {}
