use super::{plan_tiles, Compositor, Dimensions, Gravity, ImageCompositor, Placement};
use crate::error::{Error, Result};
use clap::ArgEnum;
use image::imageops::FilterType;
use image::io::Reader;
use image::{DynamicImage, ImageFormat};
use log::{debug, info};
use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Size every tile is resized to before tiling.
pub const TILE_SIZE: Dimensions = Dimensions::new(100, 100);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Layout {
    /// One overlay anchored to an edge or corner, at its original size.
    Single(Gravity),
    /// The overlay resized to `tile` and repeated over the whole canvas.
    Tiled { tile: Dimensions },
}

/// The two stock watermark configurations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ArgEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Corner,
    Tiled,
}

impl Preset {
    pub fn layout(self) -> Layout {
        match self {
            Preset::Corner => Layout::Single(Gravity::SouthEast),
            Preset::Tiled => Layout::Tiled { tile: TILE_SIZE },
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Preset::Corner => "png",
            Preset::Tiled => "jpg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkJob {
    pub base: PathBuf,
    pub watermark: PathBuf,
    pub output: PathBuf,
    pub layout: Layout,
}

impl WatermarkJob {
    pub fn new(
        base: impl Into<PathBuf>,
        watermark: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        layout: Layout,
    ) -> Self {
        Self {
            base: base.into(),
            watermark: watermark.into(),
            output: output.into(),
            layout,
        }
    }

    /// The preset's stock file names in the working directory.
    pub fn from_preset(preset: Preset) -> Self {
        let ext = preset.extension();
        Self::new(
            format!("temp-image.{}", ext),
            format!("temp-watermark.{}", ext),
            format!("output.{}", ext),
            preset.layout(),
        )
    }
}

/// Watermark `job.base` with the default [`ImageCompositor`].
pub fn run_watermark_job(job: &WatermarkJob) -> Result<()> {
    run_watermark_job_with(job, &ImageCompositor)
}

pub fn run_watermark_job_with<C: Compositor>(job: &WatermarkJob, compositor: &C) -> Result<()> {
    debug!("Loading base image {}", job.base.display());
    let (base, source_format) = open(&job.base)?;
    let canvas = Dimensions::require(&base, "base image", &job.base)?;

    debug!("Loading watermark {}", job.watermark.display());
    let (mut watermark, _) = open(&job.watermark)?;
    if let Layout::Tiled { tile } = job.layout {
        if tile.is_empty() {
            return Err(Error::InvalidDimensions { canvas, tile });
        }
        watermark = watermark.resize_exact(tile.width, tile.height, FilterType::Lanczos3);
    }
    let overlay = Dimensions::require(&watermark, "watermark", &job.watermark)?;

    let placements = plan(job.layout, &watermark, canvas, overlay)?;
    info!(
        "Compositing {} placement(s) of a {} watermark onto a {} image",
        placements.len(),
        overlay,
        canvas
    );
    let composed = compositor.composite(base, &placements);

    save(composed, &job.output, source_format)?;
    info!("Wrote {}", job.output.display());
    Ok(())
}

fn plan<'a>(
    layout: Layout,
    watermark: &'a DynamicImage,
    canvas: Dimensions,
    overlay: Dimensions,
) -> Result<Vec<Placement<&'a DynamicImage>>> {
    match layout {
        Layout::Single(gravity) => Ok(vec![gravity.place(watermark, canvas, overlay)]),
        Layout::Tiled { .. } => plan_tiles(watermark, canvas, overlay),
    }
}

/// Decode by content, so object keys need not carry an extension.
fn open(path: &Path) -> Result<(DynamicImage, Option<ImageFormat>)> {
    let reader = Reader::open(path)
        .and_then(Reader::with_guessed_format)
        .map_err(|e| Error::io(path, e))?;
    let format = reader.format();
    let image = reader.decode().map_err(|e| Error::image(path, e))?;
    Ok((image, format))
}

/// Encode in the format named by the output extension, else the source's format.
fn save(image: DynamicImage, path: &Path, source: Option<ImageFormat>) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .ok()
        .or(source)
        .unwrap_or(ImageFormat::Png);
    // JPEG has no alpha channel.
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.into_rgb8()),
        _ => image,
    };
    image
        .save_with_format(path, format)
        .map_err(|e| Error::image(path, e))
}
