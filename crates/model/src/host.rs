//! Boundary types supplied by the host page and the media element.

use serde::{Deserialize, Serialize};

use crate::geometry::IntrinsicSize;

/// Arguments the host passes on every render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Video source (URL or `data:` URL).
    pub src: String,

    /// Requested player width; doubles as nominal intrinsic width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Requested player height; doubles as nominal intrinsic height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Seek target (seconds) applied when a new source is loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
}

impl HostConfig {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_start_time(mut self, start_time: f64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Nominal intrinsic size, available only when both sides are given.
    pub fn nominal_size(&self) -> Option<IntrinsicSize> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => IntrinsicSize::new(w, h).resolved(),
            _ => None,
        }
    }

    /// Start time worth seeking to, if any.
    pub fn seek_target(&self) -> Option<f64> {
        self.start_time.filter(|t| t.is_finite() && *t > 0.0)
    }
}

/// Snapshot of the media element's playback state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaState {
    pub paused: bool,
    /// Playback position in seconds.
    pub current_time: f64,
    /// Reported intrinsic width, 0 until metadata is loaded.
    #[serde(default)]
    pub video_width: u32,
    /// Reported intrinsic height, 0 until metadata is loaded.
    #[serde(default)]
    pub video_height: u32,
}

impl Default for MediaState {
    fn default() -> Self {
        Self {
            paused: true,
            current_time: 0.0,
            video_width: 0,
            video_height: 0,
        }
    }
}

impl MediaState {
    /// Media-reported size, possibly [`IntrinsicSize::UNKNOWN`].
    pub fn intrinsic(&self) -> IntrinsicSize {
        IntrinsicSize::new(self.video_width, self.video_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_requires_both_sides() {
        assert_eq!(
            HostConfig::new("a.mp4").with_size(640, 360).nominal_size(),
            Some(IntrinsicSize::new(640, 360))
        );
        let mut partial = HostConfig::new("a.mp4");
        partial.width = Some(640);
        assert_eq!(partial.nominal_size(), None);
    }

    #[test]
    fn test_seek_target_ignores_zero() {
        assert_eq!(HostConfig::new("a.mp4").seek_target(), None);
        assert_eq!(
            HostConfig::new("a.mp4").with_start_time(0.0).seek_target(),
            None
        );
        assert_eq!(
            HostConfig::new("a.mp4").with_start_time(4.5).seek_target(),
            Some(4.5)
        );
    }

    #[test]
    fn test_host_config_from_json() {
        let config: HostConfig =
            serde_json::from_str(r#"{"src":"https://example.com/v.mp4","width":640}"#).unwrap();
        assert_eq!(config.width, Some(640));
        assert_eq!(config.height, None);
        assert_eq!(config.start_time, None);
    }

    #[test]
    fn test_media_defaults_to_paused_and_unknown() {
        let media = MediaState::default();
        assert!(media.paused);
        assert!(!media.intrinsic().is_resolved());
    }
}
