//! Video source resolution.
//!
//! The player needs a single `src` string. Remote URLs are used as-is;
//! local files and in-memory bytes are inlined as base64 `data:` URLs.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use vidcoord_common::error::{VidcoordError, VidcoordResult};

/// MIME type used when nothing better is known.
pub const DEFAULT_VIDEO_MIME: &str = "video/mp4";

/// Where a video comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// An `http://` or `https://` URL.
    Url(String),
    /// A file on the local filesystem.
    File(PathBuf),
    /// Raw file contents, optionally with the original file name.
    Bytes { data: Vec<u8>, name: Option<String> },
}

impl VideoSource {
    /// Treat http(s) strings as URLs and everything else as a path.
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::Url(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }

    /// Produce the `src` string for the player.
    pub fn resolve(&self) -> VidcoordResult<String> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::File(path) => {
                if !path.exists() {
                    return Err(VidcoordError::file_not_found(path));
                }
                let data = std::fs::read(path)?;
                let mime = mime_for_path(path);
                tracing::debug!(path = %path.display(), bytes = data.len(), mime, "Inlining video file");
                Ok(data_url(mime, &data))
            }
            Self::Bytes { data, name } => {
                if data.is_empty() {
                    return Err(VidcoordError::source("video bytes are empty"));
                }
                let mime = name
                    .as_deref()
                    .map(|n| mime_for_path(Path::new(n)))
                    .unwrap_or(DEFAULT_VIDEO_MIME);
                Ok(data_url(mime, data))
            }
        }
    }
}

/// Video MIME type for a file name, defaulting to MP4.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    // `.ogg` guesses as audio; here it is always a video container.
    if matches!(ext.as_deref(), Some("ogg" | "ogv")) {
        return "video/ogg";
    }

    mime_guess::from_path(path)
        .iter_raw()
        .find(|m| m.starts_with("video/"))
        .unwrap_or(DEFAULT_VIDEO_MIME)
}

fn data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urls_and_paths() {
        assert_eq!(
            VideoSource::parse("https://example.com/v.mp4"),
            VideoSource::Url("https://example.com/v.mp4".to_string())
        );
        assert_eq!(
            VideoSource::parse("clips/v.webm"),
            VideoSource::File(PathBuf::from("clips/v.webm"))
        );
    }

    #[test]
    fn test_url_passes_through() {
        let src = VideoSource::Url("http://host/v.mp4".to_string())
            .resolve()
            .unwrap();
        assert_eq!(src, "http://host/v.mp4");
    }

    #[test]
    fn test_missing_file() {
        let err = VideoSource::File(PathBuf::from("/definitely/not/here.mp4"))
            .resolve()
            .unwrap_err();
        assert!(matches!(err, VidcoordError::FileNotFound { .. }));
    }

    #[test]
    fn test_file_becomes_data_url() {
        let path = std::env::temp_dir().join(format!("vidcoord-source-{}.webm", std::process::id()));
        std::fs::write(&path, b"abc").unwrap();
        let src = VideoSource::File(path.clone()).resolve().unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(src, "data:video/webm;base64,YWJj");
    }

    #[test]
    fn test_bytes_default_to_mp4() {
        let src = VideoSource::Bytes {
            data: b"abc".to_vec(),
            name: None,
        }
        .resolve()
        .unwrap();
        assert_eq!(src, "data:video/mp4;base64,YWJj");
    }

    #[test]
    fn test_empty_bytes_rejected() {
        let result = VideoSource::Bytes {
            data: Vec::new(),
            name: Some("v.mov".to_string()),
        }
        .resolve();
        assert!(matches!(result, Err(VidcoordError::Source { .. })));
    }

    #[test]
    fn test_mime_table() {
        assert_eq!(mime_for_path(Path::new("a.mp4")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("a.WEBM")), "video/webm");
        assert_eq!(mime_for_path(Path::new("a.ogg")), "video/ogg");
        assert_eq!(mime_for_path(Path::new("a.ogv")), "video/ogg");
        assert_eq!(mime_for_path(Path::new("a.avi")), "video/x-msvideo");
        assert_eq!(mime_for_path(Path::new("a.mov")), "video/quicktime");
        assert_eq!(mime_for_path(Path::new("a.unknown")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("noext")), "video/mp4");
    }
}
