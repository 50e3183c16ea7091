use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::str::FromStr;

/// Image formats accepted for upload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UploadKind {
    Jpeg,
    Png,
    WebP,
}

impl FromStr for UploadKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        use UploadKind::*;
        match s.trim().to_lowercase().as_ref() {
            "image/jpeg" | "image/jpg" | "jpeg" | "jpg" => Ok(Jpeg),
            "image/png" | "png" => Ok(Png),
            "image/webp" | "webp" => Ok(WebP),
            other => Err(Error::InvalidUpload(format!("unsupported image type `{}`", other))),
        }
    }
}

impl UploadKind {
    pub fn mime(self) -> &'static str {
        match self {
            UploadKind::Jpeg => "image/jpeg",
            UploadKind::Png => "image/png",
            UploadKind::WebP => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            UploadKind::Jpeg => "jpg",
            UploadKind::Png => "png",
            UploadKind::WebP => "webp",
        }
    }

    /// Whether `data` starts with this format's signature.
    pub fn matches(self, data: &[u8]) -> bool {
        if data.len() < 12 {
            return false;
        }
        match self {
            UploadKind::Jpeg => data.starts_with(&[0xFF, 0xD8, 0xFF]),
            UploadKind::Png => data.starts_with(&[0x89, b'P', b'N', b'G']),
            UploadKind::WebP => data.starts_with(b"RIFF") && data[8..].starts_with(b"WEBP"),
        }
    }
}

/// Decode and check an upload's base64 `content` against its declared `kind`.
pub fn decode_upload(content: &str, kind: UploadKind, max_bytes: usize) -> Result<Vec<u8>> {
    if content.is_empty() {
        return Err(Error::InvalidUpload("base64 content required".to_string()));
    }
    let data = STANDARD
        .decode(content)
        .map_err(|e| Error::InvalidUpload(format!("invalid base64: {}", e)))?;
    if data.len() > max_bytes {
        return Err(Error::InvalidUpload(format!(
            "image too large ({} bytes, limit {})",
            data.len(),
            max_bytes
        )));
    }
    if !kind.matches(&data) {
        return Err(Error::InvalidUpload(format!(
            "content is not a valid {} image",
            kind.mime()
        )));
    }
    Ok(data)
}
