use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the edges of the renderer: calendar input, fonts,
/// preference files, image export and the window host.
///
/// Drawing itself never fails.
#[derive(Debug, Error)]
pub enum SkyClockError {
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("invalid observation position: {0}")]
    InvalidPosition(String),

    #[error("invalid face configuration: {0}")]
    InvalidConfig(String),

    #[error("could not parse font data from {0}")]
    Font(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, SkyClockError>;
