//! Error type shared by every module of the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Only 3-, 6- and 7-sided seed shapes exist.
    #[error("unsupported polygon count {0}: expected 3, 6 or 7")]
    UnsupportedPolygonCount(u32),

    #[error("invalid offset {0}: must be a finite number")]
    InvalidOffset(f64),

    #[error("invalid radius {0}: must be between 1 and {max}", max = crate::seed_catalog::MAX_RADIUS)]
    InvalidRadius(i32),

    /// The canvas side does not fit in 32-bit pixel coordinates, or its
    /// pixel buffer cannot be allocated.
    #[error("canvas side {side} is too large")]
    CanvasTooLarge { side: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
