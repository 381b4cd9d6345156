//! Error types for camera setup and rendering.

use thiserror::Error;

/// A camera configuration that cannot produce a usable view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image width must be at least 1 pixel")]
    ZeroImageWidth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("aperture must be finite and non-negative, got {0}")]
    InvalidAperture(f32),

    #[error("focus distance must be finite and positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("a {width}x{height} image does not fit in memory")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("camera position and target coincide, or world up is parallel to the view direction")]
    DegenerateView,
}

/// Errors reported by the render entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("pixel buffer holds {actual} bytes but the image needs {expected}")]
    BufferSize { expected: usize, actual: usize },
}
