//! vidcoord data model
//!
//! Defines the data contracts shared by the annotator and its hosts:
//! - **Geometry:** the on-screen video box and the media's intrinsic size
//! - **Records:** immutable click records and the append-only click log
//! - **Markers:** derived display-space markers and the presentation context
//! - **Host:** per-render host arguments and media state snapshots
//!
//! Click coordinates are stored in intrinsic video pixels, together with
//! the reference size they were measured against.

pub mod geometry;
pub mod host;
pub mod marker;
pub mod record;

pub use geometry::*;
pub use host::*;
pub use marker::*;
pub use record::*;
