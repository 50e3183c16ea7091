use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, Parser};
use image_service::service::{ImageService, Request};
use image_service::util::init_logging;
use image_service::Config;
use log::{debug, error};
use std::io::Write;
use try_traits::default::TryDefault;

#[derive(Debug, Parser)]
#[clap(name = "image-service", about = "Store and watermark images, reporting the result as JSON")]
#[clap(group(ArgGroup::new("mode").required(true).args(&["upload", "watermark"])))]
struct Opt {
    /// Store base64 `CONTENT` of MIME `TYPE`
    #[clap(
        long,
        multiple_values = true,
        min_values = 2,
        max_values = 3,
        allow_hyphen_values = true,
        value_names = &["CONTENT", "TYPE", "FILENAME"]
    )]
    upload: Option<Vec<String>>,

    /// Watermark the stored `IMAGE_PATH` with the stored `WATERMARK_PATH`
    #[clap(
        long,
        multiple_values = true,
        min_values = 2,
        max_values = 3,
        value_names = &["IMAGE_PATH", "WATERMARK_PATH", "FILENAME"]
    )]
    watermark: Option<Vec<String>>,
}

impl Opt {
    fn into_request(self) -> Result<Request> {
        fn split(values: Vec<String>) -> Result<(String, String, Option<String>)> {
            let mut values = values.into_iter();
            match (values.next(), values.next(), values.next()) {
                (Some(a), Some(b), filename) => Ok((a, b, filename)),
                _ => Err(anyhow!("expected at least two values")),
            }
        }

        match (self.upload, self.watermark) {
            (Some(values), None) => {
                let (content, kind, filename) = split(values)?;
                Ok(Request::Upload {
                    content,
                    kind,
                    filename,
                })
            }
            (None, Some(values)) => {
                let (image_path, watermark_path, filename) = split(values)?;
                Ok(Request::Watermark {
                    image_path,
                    watermark_path,
                    filename,
                })
            }
            _ => Err(anyhow!("exactly one of --upload or --watermark is required")),
        }
    }
}

fn run(opt: Opt, config: &Config) -> Result<()> {
    let request = opt.into_request()?;
    debug!("Handling {:?}", request);
    let stored = ImageService::from_config(config).handle(request)?;

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    serde_json::to_writer(&mut stdout, &stored).context("Failed to write result")?;
    writeln!(stdout).context("Failed to write result")?;
    Ok(())
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let config = Config::try_default()?;
    let _logger = init_logging(&config.log_spec)?;

    if let Err(e) = run(opt, &config) {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
