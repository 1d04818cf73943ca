//! Derived display markers and the presentation context they paint into.

use serde::{Deserialize, Serialize};

/// Which presentation context is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationContext {
    /// Video laid out in the page; markers paint into the in-flow overlay.
    #[default]
    Normal,
    /// Video on the OS-level fullscreen surface; markers are positioned in
    /// viewport space.
    Fullscreen,
}

impl PresentationContext {
    pub fn from_fullscreen(is_fullscreen: bool) -> Self {
        if is_fullscreen {
            Self::Fullscreen
        } else {
            Self::Normal
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        matches!(self, Self::Fullscreen)
    }
}

/// Overlay surface a marker list is painted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// The overlay that sits on top of the video in the page flow.
    InFlow,
    /// A viewport-fixed overlay held only while fullscreen.
    Fullscreen,
}

impl From<PresentationContext> for SurfaceKind {
    fn from(context: PresentationContext) -> Self {
        match context {
            PresentationContext::Normal => SurfaceKind::InFlow,
            PresentationContext::Fullscreen => SurfaceKind::Fullscreen,
        }
    }
}

/// A dot plus text label in current display coordinates.
///
/// Never stored: regenerated from the click log on every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Position of the source record in the click log.
    pub index: usize,
    /// Horizontal display position.
    pub x: f64,
    /// Vertical display position.
    pub y: f64,
    /// Label text shown next to the dot.
    pub label: String,
}

impl Marker {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// A complete marker list for one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedMarkers {
    pub surface: SurfaceKind,
    pub markers: Vec<Marker>,
}

impl RenderedMarkers {
    pub fn positions(&self) -> Vec<(f64, f64)> {
        self.markers.iter().map(Marker::position).collect()
    }
}
