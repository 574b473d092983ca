#![allow(dead_code)]

/// Synthesized image size.
pub const IMAGE_WIDTH: i32 = 1280;
pub const IMAGE_HEIGHT: i32 = 720;

/// Field extent in field units.
pub const FIELD_LENGTH: f64 = 108.0;
pub const FIELD_WIDTH: f64 = 63.0;

/// Number of points synthesized per run.
pub const POINT_COUNT: usize = 10;
/// Dimension of the random descriptor attached to each point.
pub const FEATURE_DIM: usize = 16;

/// Show every rendered frame in a highgui window and wait for a key.
pub const SHOW_IMAGES: bool = false;

/// Rendered frames and synthesized data land here.
pub const OUTPUT_DIR: &str = "output";
