use anyhow::Result;
use clap::Parser;
use image_service::util::init_logging;
use image_service::watermark::{
    run_watermark_job, Dimensions, Gravity, Layout, Preset, WatermarkJob,
};
use log::{error, info};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "watermark", about = "Composite a watermark onto an image, once or tiled")]
struct Opt {
    /// Stock configuration to start from
    #[clap(short, long, arg_enum, default_value = "corner")]
    preset: Preset,

    /// Image to watermark
    #[clap(short, long)]
    base: Option<PathBuf>,

    /// Watermark image
    #[clap(short, long)]
    watermark: Option<PathBuf>,

    /// Where to write the result; the extension picks the format
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Anchor a single watermark here instead of the preset's layout
    #[clap(short, long, conflicts_with = "tile")]
    gravity: Option<Gravity>,

    /// Tile the watermark resized to WxH instead of the preset's layout
    #[clap(short, long)]
    tile: Option<Dimensions>,

    /// Log specification, overridden by RUST_LOG
    #[clap(long, default_value = "info")]
    log: String,
}

impl Opt {
    fn job(&self) -> WatermarkJob {
        let mut job = WatermarkJob::from_preset(self.preset);
        if let Some(base) = &self.base {
            job.base = base.clone();
        }
        if let Some(watermark) = &self.watermark {
            job.watermark = watermark.clone();
        }
        if let Some(output) = &self.output {
            job.output = output.clone();
        }
        if let Some(gravity) = self.gravity {
            job.layout = Layout::Single(gravity);
        }
        if let Some(tile) = self.tile {
            job.layout = Layout::Tiled { tile };
        }
        job
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let _logger = init_logging(&opt.log)?;

    let job = opt.job();
    match run_watermark_job(&job) {
        Ok(()) => {
            info!("Watermark applied successfully");
            Ok(())
        }
        Err(e) => {
            error!("Watermarking {} failed: {}", job.base.display(), e);
            std::process::exit(1);
        }
    }
}
