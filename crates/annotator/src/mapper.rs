//! Display-space → intrinsic-space click mapping.
//!
//! The media element fits its content inside the display box with one
//! uniform scale factor and centers it, leaving letterbox bars on one
//! axis. Clicks on those bars do not correspond to any video pixel and
//! are rejected.

use serde::Serialize;
use vidcoord_model::geometry::{DisplayGeometry, IntrinsicPoint, IntrinsicSize, PointerPosition};

/// Why a click produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejected {
    /// The click landed on a letterbox bar or outside the box.
    #[error("click is outside the displayed video content")]
    OutsideContent,
    /// Neither the media nor a fallback supplied an intrinsic size.
    #[error("intrinsic video size is not known yet")]
    NoIntrinsicSize,
}

/// Where the intrinsic content sits inside a display box.
///
/// All values are in display pixels relative to the box origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentRect {
    /// Uniform display pixels per intrinsic pixel.
    pub scale: f64,
    pub content_width: f64,
    pub content_height: f64,
    /// Width of the left letterbox bar.
    pub offset_x: f64,
    /// Height of the top letterbox bar.
    pub offset_y: f64,
}

impl ContentRect {
    /// Fit `intrinsic` into `geometry`. `None` if either is degenerate.
    pub fn fit(geometry: &DisplayGeometry, intrinsic: IntrinsicSize) -> Option<Self> {
        if !intrinsic.is_resolved() || !geometry.has_area() {
            return None;
        }

        let iw = intrinsic.width as f64;
        let ih = intrinsic.height as f64;
        let scale = (geometry.width / iw).min(geometry.height / ih);
        let content_width = iw * scale;
        let content_height = ih * scale;

        Some(Self {
            scale,
            content_width,
            content_height,
            offset_x: (geometry.width - content_width) / 2.0,
            offset_y: (geometry.height - content_height) / 2.0,
        })
    }

    /// Map a box-local point into intrinsic pixels. Edges are inclusive.
    pub fn to_intrinsic(&self, local_x: f64, local_y: f64) -> Result<IntrinsicPoint, Rejected> {
        let cx = local_x - self.offset_x;
        let cy = local_y - self.offset_y;

        // NaN fails every comparison, so test for the inside instead.
        let inside = cx >= 0.0 && cy >= 0.0 && cx <= self.content_width && cy <= self.content_height;
        if !inside {
            return Err(Rejected::OutsideContent);
        }

        Ok(IntrinsicPoint::new(cx / self.scale, cy / self.scale))
    }

    /// Inverse of [`ContentRect::to_intrinsic`]: box-local display position.
    pub fn to_display(&self, point: IntrinsicPoint) -> (f64, f64) {
        (
            self.offset_x + point.x * self.scale,
            self.offset_y + point.y * self.scale,
        )
    }
}

/// Map a pointer position to intrinsic video pixels.
///
/// `intrinsic` must already be resolved through the fallback chain; an
/// unresolved size is rejected rather than guessed from the box.
pub fn map(
    pointer: PointerPosition,
    geometry: &DisplayGeometry,
    intrinsic: IntrinsicSize,
) -> Result<IntrinsicPoint, Rejected> {
    if !intrinsic.is_resolved() {
        tracing::warn!("Intrinsic video size unknown; ignoring click");
        return Err(Rejected::NoIntrinsicSize);
    }

    let Some(rect) = ContentRect::fit(geometry, intrinsic) else {
        tracing::debug!(
            width = geometry.width,
            height = geometry.height,
            "Display box has no area; ignoring click"
        );
        return Err(Rejected::OutsideContent);
    };

    let (px, py) = geometry.to_local(pointer);
    match rect.to_intrinsic(px, py) {
        Ok(point) => {
            tracing::debug!(
                display_x = px,
                display_y = py,
                intrinsic_x = point.x,
                intrinsic_y = point.y,
                intrinsic = %intrinsic,
                scale = rect.scale,
                offset_x = rect.offset_x,
                offset_y = rect.offset_y,
                "Mapped click to intrinsic coordinates"
            );
            Ok(point)
        }
        Err(rejected) => {
            tracing::debug!(
                display_x = px,
                display_y = py,
                "Click ignored (outside displayed video content)"
            );
            Err(rejected)
        }
    }
}
