use crate::watermark::Preset;
use anyhow::{Context, Result};
use dotenv::dotenv;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;
use try_traits::default::TryDefault;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Executable the HTTP functions shell out to.
    pub service_binary: PathBuf,
    /// Arguments placed before the mode flag, e.g. a script for an interpreter.
    pub service_args: Vec<String>,
    /// Root directory of the local object store.
    pub storage_root: PathBuf,
    pub max_upload_bytes: usize,
    pub watermark_preset: Preset,
    pub log_spec: String,
}

impl Config {
    fn defaults() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            service_binary: PathBuf::from("./image-service"),
            service_args: Vec::new(),
            storage_root: PathBuf::from("storage"),
            max_upload_bytes: 10 * 1024 * 1024,
            watermark_preset: Preset::Tiled,
            log_spec: "info".to_string(),
        }
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::defaults()))
            .merge(Toml::file("ImageService.toml"))
            .merge(Env::prefixed("IMAGE_SERVICE_"))
            .merge(Env::raw().only(&["PORT"]))
            .merge(Json::file("ImageService.json"))
            .merge(Yaml::file("ImageService.yaml"))
            .merge(Yaml::file("ImageService.yml"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TryDefault for Config {
    type Error = anyhow::Error;

    fn try_default() -> Result<Self> {
        dotenv().ok();

        Config::figment()
            .extract()
            .context("Failed to load configuration")
    }
}
