use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use flexi_logger::{Logger, LoggerHandle};

/// Start logging to stderr, honouring `RUST_LOG` over `spec`.
///
/// The returned handle must stay alive for as long as the program logs.
pub fn init_logging(spec: &str) -> Result<LoggerHandle> {
    Logger::try_with_env_or_str(spec)
        .context("Invalid log specification")?
        .start()
        .context("Failed to start logger")
}

/// `image/<year>/<prefix>-<unix seconds>.<ext>`, or `images/<filename>` when one is given.
pub fn object_key(filename: Option<&str>, prefix: &str, ext: &str, now: DateTime<Utc>) -> String {
    match filename.filter(|f| !f.is_empty()) {
        Some(name) => format!("images/{}", name),
        None => format!("image/{}/{}-{}.{}", now.year(), prefix, now.timestamp(), ext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_keys() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(
            object_key(None, "uploaded", "png", now),
            "image/2023/uploaded-1700000000.png"
        );
        assert_eq!(
            object_key(Some(""), "watermarked", "jpg", now),
            "image/2023/watermarked-1700000000.jpg"
        );
        assert_eq!(object_key(Some("cat.png"), "uploaded", "png", now), "images/cat.png");
    }
}
