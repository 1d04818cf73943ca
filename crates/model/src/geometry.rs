//! Display and intrinsic geometry.
//!
//! Display values are CSS-style pixels in whatever space the active
//! presentation context uses: page space normally, viewport space while
//! fullscreen. Intrinsic values are decoded media pixels.

use serde::{Deserialize, Serialize};

/// The on-screen rectangle currently occupied by the video element.
///
/// Ephemeral: hosts recompute it whenever layout changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayGeometry {
    /// Box width in display pixels.
    pub width: f64,
    /// Box height in display pixels.
    pub height: f64,
    /// Left edge of the box in the active coordinate space.
    pub origin_x: f64,
    /// Top edge of the box in the active coordinate space.
    pub origin_y: f64,
}

impl DisplayGeometry {
    pub fn new(width: f64, height: f64, origin_x: f64, origin_y: f64) -> Self {
        Self {
            width,
            height,
            origin_x,
            origin_y,
        }
    }

    /// A box of the given size anchored at `(0, 0)`.
    pub fn at_origin(width: f64, height: f64) -> Self {
        Self::new(width, height, 0.0, 0.0)
    }

    /// Whether the box covers a non-empty, finite area.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Pointer position relative to the box origin.
    pub fn to_local(&self, pointer: PointerPosition) -> (f64, f64) {
        (pointer.client_x - self.origin_x, pointer.client_y - self.origin_y)
    }

    /// The box's own size, rounded to whole pixels, as a last-resort
    /// intrinsic size.
    pub fn rounded_size(&self) -> IntrinsicSize {
        if !self.has_area() {
            return IntrinsicSize::UNKNOWN;
        }
        IntrinsicSize::new(self.width.round() as u32, self.height.round() as u32)
    }
}

/// Native decoded pixel dimensions of the media.
///
/// `0` on either axis means the media has not reported metadata yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntrinsicSize {
    pub width: u32,
    pub height: u32,
}

impl IntrinsicSize {
    /// Size reported before metadata is available.
    pub const UNKNOWN: IntrinsicSize = IntrinsicSize {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are known.
    pub fn is_resolved(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// `Some(self)` when resolved.
    pub fn resolved(self) -> Option<Self> {
        self.is_resolved().then_some(self)
    }

    /// Resolve the authoritative intrinsic size.
    ///
    /// Priority: media-reported size, then the host's nominal size, then
    /// (only when `allow_display_fallback` is set) the display box size.
    /// `None` means no tier could supply a size.
    pub fn resolve(
        media: IntrinsicSize,
        nominal: Option<IntrinsicSize>,
        display: &DisplayGeometry,
        allow_display_fallback: bool,
    ) -> Option<IntrinsicSize> {
        media
            .resolved()
            .or_else(|| nominal.and_then(IntrinsicSize::resolved))
            .or_else(|| {
                if allow_display_fallback {
                    display.rounded_size().resolved()
                } else {
                    None
                }
            })
    }
}

impl std::fmt::Display for IntrinsicSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A pointer event position in the active display coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerPosition {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// An unrounded point in intrinsic video pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntrinsicPoint {
    pub x: f64,
    pub y: f64,
}

impl IntrinsicPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round to the nearest whole pixel, clamping negatives to zero.
    pub fn rounded(&self) -> (u32, u32) {
        (round_to_pixel(self.x), round_to_pixel(self.y))
    }
}

fn round_to_pixel(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}
