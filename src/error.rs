use crate::watermark::Dimensions;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid dimensions: canvas {canvas}, tile {tile} (all sides must be positive)")]
    InvalidDimensions { canvas: Dimensions, tile: Dimensions },

    #[error("could not determine dimensions of {what} `{}`", path.display())]
    MissingDimensions { what: &'static str, path: PathBuf },

    #[error("image error for `{}`: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("io error for `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    SubprocessFailure(String),

    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    #[error("invalid object path `{0}`")]
    InvalidObjectPath(String),
}

impl Error {
    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Error::Image {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
