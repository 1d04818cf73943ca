//! Click records and the append-only click log.
//!
//! The log is the single source of truth for a session. Serialized field
//! names (`x`, `y`, `frame_time`, `frame_index`, `width`, `height`,
//! `unix_time`) are the contract with whatever consumes the log.

use serde::{Deserialize, Serialize};

use crate::geometry::IntrinsicSize;

/// One accepted click, frozen at capture time.
///
/// `x`/`y` are intrinsic pixels measured against the reference size that
/// was authoritative when the click happened; `width`/`height` echo that
/// reference size so consumers can rescale later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickRecord {
    x: u32,
    y: u32,
    frame_time: f64,
    frame_index: u64,
    width: u32,
    height: u32,
    unix_time: i64,
}

impl ClickRecord {
    /// Build a record. `frame_time` is expected to be finite and non-negative.
    pub fn new(
        x: u32,
        y: u32,
        frame_time: f64,
        frame_index: u64,
        reference: IntrinsicSize,
        unix_time: i64,
    ) -> Self {
        Self {
            x,
            y,
            frame_time,
            frame_index,
            width: reference.width,
            height: reference.height,
            unix_time,
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    /// Playback time in seconds when the click happened.
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    /// Estimated frame index at `frame_time`.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The reference size the coordinates are expressed in.
    pub fn reference_size(&self) -> IntrinsicSize {
        IntrinsicSize::new(self.width, self.height)
    }

    /// Wall-clock capture time in Unix milliseconds.
    pub fn unix_time(&self) -> i64 {
        self.unix_time
    }

    /// Marker label text, e.g. `"12.50s (f:375)"`.
    pub fn label(&self) -> String {
        format!("{:.2}s (f:{})", self.frame_time, self.frame_index)
    }
}

/// Ordered, append-only sequence of click records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickLog {
    records: Vec<ClickRecord>,
}

impl ClickLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Earlier records are never touched.
    pub fn push(&mut self, record: ClickRecord) {
        self.records.push(record);
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClickRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ClickRecord] {
        &self.records
    }

    /// Serialize the whole log as one JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.records)
    }

    /// Parse a log previously produced by [`ClickLog::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<'a> IntoIterator for &'a ClickLog {
    type Item = &'a ClickRecord;
    type IntoIter = std::slice::Iter<'a, ClickRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
