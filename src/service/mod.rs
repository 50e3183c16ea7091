//! The image service executable: stores uploads and watermarks stored images.

mod storage;
mod upload;

pub use storage::LocalStore;
pub use upload::{decode_upload, UploadKind};

use crate::error::Result;
use crate::util::object_key;
use crate::watermark::{run_watermark_job, Preset, WatermarkJob};
use crate::Config;
use chrono::Utc;
use image::io::Reader;
use image::ImageFormat;
use log::info;
use serde_derive::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Upload {
        content: String,
        kind: String,
        filename: Option<String>,
    },
    Watermark {
        image_path: String,
        watermark_path: String,
        filename: Option<String>,
    },
}

/// Printed on stdout when a request succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    pub path: String,
    pub success: bool,
}

impl StoredObject {
    fn new(path: String) -> Self {
        Self {
            path,
            success: true,
        }
    }
}

pub struct ImageService {
    store: LocalStore,
    max_upload_bytes: usize,
    preset: Preset,
}

impl ImageService {
    pub fn new(store: LocalStore, max_upload_bytes: usize, preset: Preset) -> Self {
        Self {
            store,
            max_upload_bytes,
            preset,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            LocalStore::new(&config.storage_root),
            config.max_upload_bytes,
            config.watermark_preset,
        )
    }

    pub fn handle(&self, request: Request) -> Result<StoredObject> {
        match request {
            Request::Upload {
                content,
                kind,
                filename,
            } => self.upload(&content, &kind, filename.as_deref()),
            Request::Watermark {
                image_path,
                watermark_path,
                filename,
            } => self.watermark(&image_path, &watermark_path, filename.as_deref()),
        }
    }

    pub fn upload(
        &self,
        content: &str,
        kind: &str,
        filename: Option<&str>,
    ) -> Result<StoredObject> {
        let kind: UploadKind = kind.parse()?;
        let data = decode_upload(content, kind, self.max_upload_bytes)?;

        let key = object_key(filename, "uploaded", kind.extension(), Utc::now());
        self.store.write(&key, &data)?;
        info!("Uploaded {} ({} bytes, {})", key, data.len(), kind.mime());
        Ok(StoredObject::new(key))
    }

    pub fn watermark(
        &self,
        image_path: &str,
        watermark_path: &str,
        filename: Option<&str>,
    ) -> Result<StoredObject> {
        let base = self.store.path_of(image_path)?;
        let watermark = self.store.path_of(watermark_path)?;

        let ext = extension_of(&base);
        let key = object_key(filename, "watermarked", ext, Utc::now());
        let output = self.store.path_of(&key)?;
        self.store.ensure_parent(&output)?;

        let job = WatermarkJob::new(base, watermark, output, self.preset.layout());
        run_watermark_job(&job)?;
        info!("Watermarked {} with {} into {}", image_path, watermark_path, key);
        Ok(StoredObject::new(key))
    }
}

/// Extension for a derived object: the source's own, else its detected format's.
fn extension_of(path: &Path) -> &'static str {
    let format = ImageFormat::from_path(path).ok().or_else(|| {
        Reader::open(path)
            .and_then(Reader::with_guessed_format)
            .ok()?
            .format()
    });
    match format {
        Some(format) if format.can_write() => format.extensions_str()[0],
        _ => ImageFormat::Png.extensions_str()[0],
    }
}
