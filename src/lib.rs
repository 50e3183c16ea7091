pub mod config;
pub mod error;
pub mod functions;
pub mod service;
pub mod util;
pub mod watermark;

pub use config::Config;
pub use error::{Error, Result};
