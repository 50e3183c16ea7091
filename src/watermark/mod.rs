mod compositor;
mod gravity;
mod job;
mod tiling;

pub use compositor::{Compositor, ImageCompositor};
pub use gravity::Gravity;
pub use job::{run_watermark_job, run_watermark_job_with, Layout, Preset, WatermarkJob};
pub use tiling::plan_tiles;

use crate::error::{Error, Result};
use image::GenericImageView;
use std::fmt;
use std::path::Path;

/// Width and height of an image, in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of<I: GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Dimensions of a decoded image, failing when either side is unknown.
    pub(crate) fn require<I: GenericImageView>(
        image: &I,
        what: &'static str,
        path: &Path,
    ) -> Result<Self> {
        let dims = Self::of(image);
        if dims.is_empty() {
            return Err(Error::MissingDimensions {
                what,
                path: path.to_path_buf(),
            });
        }
        Ok(dims)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(|c: char| c == 'x' || c == 'X' || c == ':')
            .ok_or_else(|| anyhow::anyhow!("dimensions `{}` are not of the form WxH", s))?;
        Ok(Self::new(w.trim().parse()?, h.trim().parse()?))
    }
}

/// An overlay and where its top-left corner lands on the canvas.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Placement<O> {
    pub overlay: O,
    pub left: i64,
    pub top: i64,
}

impl<O> Placement<O> {
    pub fn new(overlay: O, left: i64, top: i64) -> Self {
        Self { overlay, left, top }
    }
}
