use super::outcome::ServiceOutcome;
use crate::error::{Error, Result};
use log::debug;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use tokio::process::Command;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Upload,
    Watermark,
}

impl Mode {
    pub fn flag(self) -> &'static str {
        match self {
            Mode::Upload => "--upload",
            Mode::Watermark => "--watermark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// The external image-processing executable.
#[derive(Debug, Clone)]
pub struct ServiceBinary {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl ServiceBinary {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments passed before the mode flag.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run `<program> <leading args> <mode flag> <args>` to completion and parse its stdout.
    pub async fn invoke(&self, mode: Mode, args: &[String]) -> Result<ServiceOutcome> {
        debug!("Running {} {}", self.program.display(), mode);
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(mode.flag())
            .args(args)
            .output()
            .await
            .map_err(|e| {
                Error::SubprocessFailure(format!(
                    "Failed to execute `{}`: {}",
                    self.program.display(),
                    e
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(Error::SubprocessFailure(format!(
                "Command failed: {} {} ({})\n{}",
                self.program.display(),
                mode,
                output.status,
                stderr.trim_end()
            )));
        }
        if !stderr.trim().is_empty() {
            debug!("{} {} stderr: {}", self.program.display(), mode, stderr.trim_end());
        }

        ServiceOutcome::parse(&output.stdout)
    }
}
