//! Wall-clock and frame timing utilities.
//!
//! Click records carry the wall-clock capture time in Unix milliseconds
//! plus an estimated frame index. The media element does not expose its
//! real frame rate, so the index is `floor(time * assumed_rate)`.

/// Frame rate assumed when the media does not report one.
pub const DEFAULT_ASSUMED_FRAME_RATE: f64 = 30.0;

/// Source of wall-clock capture timestamps.
pub trait WallClock {
    /// Milliseconds since the Unix epoch.
    fn now_unix_ms(&self) -> i64;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_unix_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a fixed instant (for tests and replays).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub unix_ms: i64,
}

impl FixedClock {
    pub fn new(unix_ms: i64) -> Self {
        Self { unix_ms }
    }
}

impl WallClock for FixedClock {
    fn now_unix_ms(&self) -> i64 {
        self.unix_ms
    }
}

impl<C: WallClock + ?Sized> WallClock for Box<C> {
    fn now_unix_ms(&self) -> i64 {
        (**self).now_unix_ms()
    }
}

/// Clamp a playback timestamp to a finite, non-negative value.
pub fn sanitize_frame_time(frame_time: f64) -> f64 {
    if frame_time.is_finite() && frame_time > 0.0 {
        frame_time
    } else {
        0.0
    }
}

/// Estimate the frame index at `frame_time` seconds for a given rate.
///
/// This is an approximation: it is only exact for constant-rate media
/// whose real rate equals `frame_rate`. Pass a time already cleaned by
/// [`sanitize_frame_time`]; anything negative or NaN still yields 0.
pub fn estimate_frame_index(frame_time: f64, frame_rate: f64) -> u64 {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return 0;
    }
    (frame_time * frame_rate).floor() as u64
}
