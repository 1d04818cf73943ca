//! Click log ownership and marker projection.
//!
//! Markers are never patched in place. Every render walks the whole log
//! and projects each record from its own reference size into the current
//! display box, so markers cannot drift from the recorded clicks no
//! matter how often the geometry or presentation context changes.

use vidcoord_common::clock::{estimate_frame_index, sanitize_frame_time, WallClock};
use vidcoord_common::config::MarkerProjection;
use vidcoord_model::geometry::{DisplayGeometry, IntrinsicPoint, IntrinsicSize};
use vidcoord_model::marker::{Marker, PresentationContext};
use vidcoord_model::record::{ClickLog, ClickRecord};

use crate::mapper::ContentRect;

/// Owns the click log for one session.
#[derive(Debug, Clone, Default)]
pub struct MarkerStore {
    log: ClickLog,
    projection: MarkerProjection,
}

impl MarkerStore {
    pub fn new(projection: MarkerProjection) -> Self {
        Self {
            log: ClickLog::new(),
            projection,
        }
    }

    /// Build a record for an accepted click and append it.
    ///
    /// `frame_index = floor(frame_time * frame_rate)`; `unix_time` comes
    /// from `clock`. Coordinates are rounded here and nowhere earlier.
    pub fn record(
        &mut self,
        point: IntrinsicPoint,
        frame_time: f64,
        frame_rate: f64,
        reference: IntrinsicSize,
        clock: &dyn WallClock,
    ) -> ClickRecord {
        let frame_time = sanitize_frame_time(frame_time);
        let (x, y) = point.rounded();
        let record = ClickRecord::new(
            x,
            y,
            frame_time,
            estimate_frame_index(frame_time, frame_rate),
            reference,
            clock.now_unix_ms(),
        );

        tracing::debug!(
            x,
            y,
            frame_time,
            frame_index = record.frame_index(),
            reference = %reference,
            total = self.log.len() + 1,
            "Recorded click"
        );

        self.log.push(record.clone());
        record
    }

    /// Drop every record.
    pub fn reset(&mut self) {
        if !self.log.is_empty() {
            tracing::debug!(cleared = self.log.len(), "Click log cleared");
        }
        self.log.clear();
    }

    pub fn log(&self) -> &ClickLog {
        &self.log
    }

    /// Fresh marker list for the current geometry and context.
    pub fn render(
        &self,
        context: PresentationContext,
        geometry: &DisplayGeometry,
        live_intrinsic: IntrinsicSize,
    ) -> Vec<Marker> {
        render_markers(
            &self.log,
            self.projection,
            context,
            geometry,
            live_intrinsic,
        )
    }
}

/// Project every record in `log` into current display coordinates.
///
/// Pure: identical inputs always give identical output. In
/// [`PresentationContext::Fullscreen`] positions are translated by the
/// box origin so they land on the viewport-fixed overlay.
pub fn render_markers(
    log: &ClickLog,
    projection: MarkerProjection,
    context: PresentationContext,
    geometry: &DisplayGeometry,
    live_intrinsic: IntrinsicSize,
) -> Vec<Marker> {
    log.iter()
        .enumerate()
        .map(|(index, record)| {
            let (mut x, mut y) = match projection {
                MarkerProjection::Letterboxed => {
                    project_letterboxed(record, geometry, live_intrinsic)
                }
                MarkerProjection::Stretched => project_stretched(record, geometry),
            };
            if context.is_fullscreen() {
                x += geometry.origin_x;
                y += geometry.origin_y;
            }
            Marker {
                index,
                x,
                y,
                label: record.label(),
            }
        })
        .collect()
}

/// Per-axis rescale from the record's reference size to the box size.
fn project_stretched(record: &ClickRecord, geometry: &DisplayGeometry) -> (f64, f64) {
    let reference = record.reference_size();
    (
        record.x() as f64 * geometry.width / reference.width.max(1) as f64,
        record.y() as f64 * geometry.height / reference.height.max(1) as f64,
    )
}

/// Place the record through the content rectangle the box shows now.
///
/// The live intrinsic size decides the letterboxing; the record is first
/// rescaled from its reference size into that size. Falls back to the
/// reference size when the media has not reported one, and to the
/// stretched projection when the box has no area.
fn project_letterboxed(
    record: &ClickRecord,
    geometry: &DisplayGeometry,
    live_intrinsic: IntrinsicSize,
) -> (f64, f64) {
    let reference = record.reference_size();
    let content = live_intrinsic.resolved().unwrap_or(reference);

    let Some(rect) = ContentRect::fit(geometry, content) else {
        return project_stretched(record, geometry);
    };

    let point = if content == reference {
        IntrinsicPoint::new(record.x() as f64, record.y() as f64)
    } else {
        IntrinsicPoint::new(
            record.x() as f64 * content.width as f64 / reference.width.max(1) as f64,
            record.y() as f64 * content.height as f64 / reference.height.max(1) as f64,
        )
    };
    rect.to_display(point)
}
