//! vidcoord annotator
//!
//! Turns clicks on a paused video into intrinsic pixel coordinates and
//! keeps the visual markers for those clicks in sync with the click log:
//!
//! - **Mapper:** letterbox-aware display → intrinsic coordinate mapping
//! - **Store:** the append-only click log and its marker projection
//! - **Presentation:** normal/fullscreen overlay surface switching
//! - **Session:** the event-driven state machine tying them together
//! - **Output:** delivery of the full click log to a consumer
//! - **Source:** turning URLs, files, and bytes into a playable `src`
//!
//! Everything runs synchronously on the caller's thread.

pub mod mapper;
pub mod output;
pub mod presentation;
pub mod session;
pub mod source;
pub mod store;

pub use mapper::{map, ContentRect, Rejected};
pub use output::{JsonLinesOutput, LatestValue, OutputChannel};
pub use presentation::{PresentationAdapter, SurfaceChange};
pub use session::{ClickOutcome, Effect, Notification, Session, Transition};
pub use source::VideoSource;
pub use store::{render_markers, MarkerStore};
