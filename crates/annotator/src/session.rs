//! Session-scoped annotation state machine.
//!
//! A [`Session`] is created when the widget mounts, cleared whenever the
//! video source changes, and consumed by [`Session::teardown`] on unmount.
//! Hosts feed it typed [`Notification`]s in dispatch order; each call to
//! [`Session::handle`] finishes synchronously and reports what changed as
//! a [`Transition`]: the click outcome, the complete marker list for the
//! active surface, and side effects for the host to carry out.

use serde::{Deserialize, Serialize};

use vidcoord_common::clock::{SystemClock, WallClock};
use vidcoord_common::config::AnnotatorDefaults;
use vidcoord_common::error::VidcoordResult;
use vidcoord_model::geometry::{DisplayGeometry, IntrinsicSize, PointerPosition};
use vidcoord_model::host::{HostConfig, MediaState};
use vidcoord_model::marker::{PresentationContext, RenderedMarkers};
use vidcoord_model::record::{ClickLog, ClickRecord};

use crate::mapper::{self, Rejected};
use crate::presentation::{PresentationAdapter, SurfaceChange};
use crate::store::MarkerStore;

/// Inputs from the host page and media element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Host render pass with its current arguments.
    HostRender(HostConfig),
    /// The media element switched to a different source.
    SourceChanged { src: String },
    /// Playback state or metadata changed.
    MediaUpdated(MediaState),
    /// The video box moved or resized.
    GeometryChanged(DisplayGeometry),
    /// The browser entered or left fullscreen.
    FullscreenToggled { is_fullscreen: bool },
    /// The user pressed on the video.
    PointerDown(PointerPosition),
    /// The media failed to load.
    LoadFailed { reason: String },
    /// The media can play again after a failure.
    CanPlay,
}

/// Side effects the host carries out after a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum Effect {
    /// Point the media element at a new source.
    LoadSource(String),
    /// Seek the media element (seconds).
    Seek(f64),
    /// Send the complete click log to the output channel.
    Deliver(Vec<ClickRecord>),
    /// Resize the host frame to the video box height.
    FrameHeight(f64),
    /// Create the viewport-fixed overlay used while fullscreen.
    AcquireFullscreenSurface,
    /// Remove the fullscreen overlay.
    ReleaseFullscreenSurface,
    /// Show (`true`) or clear (`false`) the load-failure indication.
    DegradedDisplay(bool),
}

/// What happened to a pointer press.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum ClickOutcome {
    Recorded(ClickRecord),
    /// Clicks only count while the video is paused.
    IgnoredPlaying,
    Rejected(Rejected),
}

/// Result of handling one notification.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Transition {
    /// Set only for [`Notification::PointerDown`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click: Option<ClickOutcome>,
    /// The full replacement marker list, when markers were re-rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<RenderedMarkers>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
}

impl Transition {
    /// The record appended by this transition, if any.
    pub fn recorded(&self) -> Option<&ClickRecord> {
        match &self.click {
            Some(ClickOutcome::Recorded(record)) => Some(record),
            _ => None,
        }
    }

    /// Every log delivery requested by this transition.
    pub fn deliveries(&self) -> impl Iterator<Item = &[ClickRecord]> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Deliver(log) => Some(log.as_slice()),
            _ => None,
        })
    }

    fn click(outcome: ClickOutcome) -> Self {
        Self {
            click: Some(outcome),
            ..Default::default()
        }
    }
}

/// State for one mounted video widget.
pub struct Session<C: WallClock = SystemClock> {
    settings: AnnotatorDefaults,
    clock: C,
    store: MarkerStore,
    presentation: PresentationAdapter,
    host: Option<HostConfig>,
    media: MediaState,
    geometry: Option<DisplayGeometry>,
    rendered: RenderedMarkers,
    degraded: bool,
}

impl Session<SystemClock> {
    /// Mount a session stamped with the system clock.
    pub fn with_system_clock(settings: AnnotatorDefaults) -> VidcoordResult<Self> {
        Self::new(settings, SystemClock)
    }
}

impl<C: WallClock> Session<C> {
    /// Mount a session.
    pub fn new(settings: AnnotatorDefaults, clock: C) -> VidcoordResult<Self> {
        settings.validate()?;
        let presentation = PresentationAdapter::new();
        let rendered = RenderedMarkers {
            surface: presentation.active_surface(),
            markers: Vec::new(),
        };

        Ok(Self {
            store: MarkerStore::new(settings.projection),
            settings,
            clock,
            presentation,
            host: None,
            media: MediaState::default(),
            geometry: None,
            rendered,
            degraded: false,
        })
    }

    /// Process one notification.
    pub fn handle(&mut self, notification: Notification) -> Transition {
        match notification {
            Notification::HostRender(config) => self.on_host_render(config),
            Notification::SourceChanged { src } => self.on_source_changed(src),
            Notification::MediaUpdated(state) => self.on_media_updated(state),
            Notification::GeometryChanged(geometry) => self.on_geometry_changed(geometry),
            Notification::FullscreenToggled { is_fullscreen } => {
                self.on_fullscreen_toggled(is_fullscreen)
            }
            Notification::PointerDown(pointer) => self.on_pointer_down(pointer),
            Notification::LoadFailed { reason } => self.on_load_failed(reason),
            Notification::CanPlay => self.on_can_play(),
        }
    }

    /// Unmount: release any fullscreen surface and hand back the log.
    pub fn teardown(mut self) -> ClickLog {
        if self.presentation.release().is_some() {
            tracing::debug!("Released fullscreen overlay on teardown");
        }
        tracing::info!(clicks = self.store.log().len(), "Session torn down");
        self.store.log().clone()
    }

    pub fn log(&self) -> &ClickLog {
        self.store.log()
    }

    pub fn context(&self) -> PresentationContext {
        self.presentation.context()
    }

    /// The marker list most recently rendered.
    pub fn rendered(&self) -> &RenderedMarkers {
        &self.rendered
    }

    pub fn media(&self) -> &MediaState {
        &self.media
    }

    /// Current video source, once the host has supplied one.
    pub fn source(&self) -> Option<&str> {
        self.host.as_ref().map(|h| h.src.as_str())
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Intrinsic size after the media → nominal → display fallback chain.
    pub fn resolved_intrinsic(&self) -> Option<IntrinsicSize> {
        IntrinsicSize::resolve(
            self.media.intrinsic(),
            self.host.as_ref().and_then(HostConfig::nominal_size),
            &self.geometry.unwrap_or_default(),
            self.settings.allow_display_fallback,
        )
    }

    fn on_host_render(&mut self, config: HostConfig) -> Transition {
        if self.source() != Some(config.src.as_str()) {
            let seek = config.seek_target();
            let mut transition = self.replace_source(config.src.clone());
            if let Some(start_time) = seek {
                transition.effects.push(Effect::Seek(start_time));
            }
            self.host = Some(config);
            return transition;
        }

        // Same source: keep the log and playback position.
        let before = self.resolved_intrinsic();
        self.host = Some(config);
        if self.resolved_intrinsic() != before {
            return Transition {
                rendered: self.rerender(),
                ..Default::default()
            };
        }
        Transition::default()
    }

    fn on_source_changed(&mut self, src: String) -> Transition {
        if self.source() == Some(src.as_str()) {
            return Transition::default();
        }
        let transition = self.replace_source(src.clone());
        match &mut self.host {
            Some(host) => host.src = src,
            None => self.host = Some(HostConfig::new(src)),
        }
        transition
    }

    /// Clear the log and markers together and point at a new source.
    fn replace_source(&mut self, src: String) -> Transition {
        let had_clicks = !self.store.log().is_empty();
        tracing::info!(src = %truncate_src(&src), cleared = self.store.log().len(), "Video source changed");

        self.store.reset();
        self.media = MediaState::default();
        self.degraded = false;
        self.rendered = RenderedMarkers {
            surface: self.presentation.active_surface(),
            markers: Vec::new(),
        };

        let mut effects = vec![Effect::LoadSource(src)];
        if had_clicks {
            effects.push(Effect::Deliver(Vec::new()));
        }

        Transition {
            click: None,
            rendered: Some(self.rendered.clone()),
            effects,
        }
    }

    fn on_media_updated(&mut self, state: MediaState) -> Transition {
        let before = self.resolved_intrinsic();
        if state.intrinsic().is_resolved() && !self.media.intrinsic().is_resolved() {
            tracing::info!(intrinsic = %state.intrinsic(), "Video metadata loaded");
        }
        self.media = state;

        if self.resolved_intrinsic() != before {
            return Transition {
                rendered: self.rerender(),
                ..Default::default()
            };
        }
        Transition::default()
    }

    fn on_geometry_changed(&mut self, geometry: DisplayGeometry) -> Transition {
        self.geometry = Some(geometry);
        // The fullscreen box is the viewport, not the host frame.
        let effects = match self.presentation.context() {
            PresentationContext::Normal => vec![Effect::FrameHeight(geometry.height)],
            PresentationContext::Fullscreen => Vec::new(),
        };
        Transition {
            click: None,
            rendered: self.rerender(),
            effects,
        }
    }

    fn on_fullscreen_toggled(&mut self, is_fullscreen: bool) -> Transition {
        let Some(change) = self.presentation.on_fullscreen_changed(is_fullscreen) else {
            return Transition::default();
        };

        let effect = match change {
            SurfaceChange::AcquireFullscreen => Effect::AcquireFullscreenSurface,
            SurfaceChange::ReleaseFullscreen => Effect::ReleaseFullscreenSurface,
        };

        let rendered = self.rerender().unwrap_or_else(|| {
            self.rendered = RenderedMarkers {
                surface: self.presentation.active_surface(),
                markers: Vec::new(),
            };
            self.rendered.clone()
        });

        Transition {
            click: None,
            rendered: Some(rendered),
            effects: vec![effect],
        }
    }

    fn on_pointer_down(&mut self, pointer: PointerPosition) -> Transition {
        if !self.media.paused {
            tracing::trace!("Click while playing ignored");
            return Transition::click(ClickOutcome::IgnoredPlaying);
        }

        let Some(reference) = self.resolved_intrinsic() else {
            tracing::warn!("Video metadata not loaded and no fallback size; ignoring click");
            return Transition::click(ClickOutcome::Rejected(Rejected::NoIntrinsicSize));
        };

        let geometry = self.geometry.unwrap_or_default();
        let point = match mapper::map(pointer, &geometry, reference) {
            Ok(point) => point,
            Err(rejected) => return Transition::click(ClickOutcome::Rejected(rejected)),
        };

        let record = self.store.record(
            point,
            self.media.current_time,
            self.settings.assumed_frame_rate,
            reference,
            &self.clock,
        );

        Transition {
            click: Some(ClickOutcome::Recorded(record)),
            rendered: self.rerender(),
            effects: vec![Effect::Deliver(self.store.log().as_slice().to_vec())],
        }
    }

    fn on_load_failed(&mut self, reason: String) -> Transition {
        tracing::warn!(src = ?self.source().map(truncate_src), %reason, "Failed to load video");
        self.degraded = true;
        Transition {
            effects: vec![Effect::DegradedDisplay(true)],
            ..Default::default()
        }
    }

    fn on_can_play(&mut self) -> Transition {
        if !self.degraded {
            return Transition::default();
        }
        tracing::info!("Video ready to play");
        self.degraded = false;
        Transition {
            effects: vec![Effect::DegradedDisplay(false)],
            ..Default::default()
        }
    }

    /// Regenerate every marker. `None` until the box geometry is known.
    fn rerender(&mut self) -> Option<RenderedMarkers> {
        let geometry = self.geometry?;
        let live = self.resolved_intrinsic().unwrap_or(IntrinsicSize::UNKNOWN);
        self.rendered = RenderedMarkers {
            surface: self.presentation.active_surface(),
            markers: self
                .store
                .render(self.presentation.context(), &geometry, live),
        };
        Some(self.rendered.clone())
    }
}

/// Keep `data:` URLs out of log lines.
fn truncate_src(src: &str) -> String {
    const MAX: usize = 64;
    if src.len() <= MAX {
        return src.to_string();
    }
    let cut = (0..=MAX).rev().find(|&i| src.is_char_boundary(i)).unwrap_or(0);
    format!("{}… ({} bytes)", &src[..cut], src.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidcoord_common::clock::FixedClock;
    use vidcoord_model::marker::SurfaceKind;

    fn session() -> Session<FixedClock> {
        Session::new(AnnotatorDefaults::default(), FixedClock::new(1_700_000_000_000)).unwrap()
    }

    fn loaded_session() -> Session<FixedClock> {
        let mut s = session();
        s.handle(Notification::HostRender(HostConfig::new("a.mp4")));
        s.handle(Notification::MediaUpdated(MediaState {
            paused: true,
            current_time: 2.0,
            video_width: 1920,
            video_height: 1080,
        }));
        s.handle(Notification::GeometryChanged(DisplayGeometry::at_origin(
            640.0, 480.0,
        )));
        s
    }

    fn click(s: &mut Session<FixedClock>, x: f64, y: f64) -> Transition {
        s.handle(Notification::PointerDown(PointerPosition::new(x, y)))
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = AnnotatorDefaults {
            assumed_frame_rate: 0.0,
            ..Default::default()
        };
        assert!(Session::new(settings, FixedClock::new(0)).is_err());
    }

    #[test]
    fn test_first_render_loads_source_and_seeks() {
        let mut s = session();
        let t = s.handle(Notification::HostRender(
            HostConfig::new("a.mp4").with_start_time(3.0),
        ));
        assert_eq!(
            t.effects,
            vec![Effect::LoadSource("a.mp4".to_string()), Effect::Seek(3.0)]
        );
        assert_eq!(s.source(), Some("a.mp4"));
    }

    #[test]
    fn test_rerender_with_same_source_keeps_log_and_position() {
        let mut s = loaded_session();
        click(&mut s, 100.0, 100.0);
        let t = s.handle(Notification::HostRender(
            HostConfig::new("a.mp4").with_start_time(3.0),
        ));
        assert!(t.effects.is_empty());
        assert_eq!(s.log().len(), 1);
    }

    #[test]
    fn test_click_records_and_delivers_full_log() {
        let mut s = loaded_session();
        click(&mut s, 100.0, 100.0);
        let t = click(&mut s, 200.0, 200.0);

        let record = t.recorded().unwrap();
        assert_eq!((record.x(), record.y()), (600, 420));
        assert_eq!(record.frame_index(), 60);
        assert_eq!(record.unix_time(), 1_700_000_000_000);

        let deliveries: Vec<_> = t.deliveries().collect();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].len(), 2);
        assert_eq!(t.rendered.unwrap().markers.len(), 2);
    }

    #[test]
    fn test_click_while_playing_ignored() {
        let mut s = loaded_session();
        s.handle(Notification::MediaUpdated(MediaState {
            paused: false,
            current_time: 2.5,
            video_width: 1920,
            video_height: 1080,
        }));
        let t = click(&mut s, 100.0, 100.0);
        assert_eq!(t.click, Some(ClickOutcome::IgnoredPlaying));
        assert!(t.effects.is_empty());
        assert!(s.log().is_empty());
    }

    #[test]
    fn test_rejected_click_has_no_side_effects() {
        let mut s = loaded_session();
        let before = s.rendered().clone();
        let t = click(&mut s, 100.0, 470.0);
        assert_eq!(
            t.click,
            Some(ClickOutcome::Rejected(Rejected::OutsideContent))
        );
        assert!(t.effects.is_empty());
        assert!(t.rendered.is_none());
        assert_eq!(s.rendered(), &before);
    }

    #[test]
    fn test_nominal_size_used_before_metadata() {
        let mut s = session();
        s.handle(Notification::HostRender(
            HostConfig::new("a.mp4").with_size(640, 360),
        ));
        s.handle(Notification::GeometryChanged(DisplayGeometry::at_origin(
            640.0, 360.0,
        )));
        let t = click(&mut s, 320.0, 180.0);
        let record = t.recorded().unwrap();
        assert_eq!((record.width(), record.height()), (640, 360));
        assert_eq!((record.x(), record.y()), (320, 180));
    }

    #[test]
    fn test_display_fallback_only_when_enabled() {
        let settings = AnnotatorDefaults {
            allow_display_fallback: true,
            ..Default::default()
        };
        let mut s = Session::new(settings, FixedClock::new(0)).unwrap();
        s.handle(Notification::HostRender(HostConfig::new("a.mp4")));
        s.handle(Notification::GeometryChanged(DisplayGeometry::at_origin(
            400.0, 300.0,
        )));
        let record = click(&mut s, 10.0, 20.0).recorded().cloned().unwrap();
        assert_eq!(record.reference_size(), IntrinsicSize::new(400, 300));
        assert_eq!((record.x(), record.y()), (10, 20));
    }

    #[test]
    fn test_source_change_clears_atomically() {
        let mut s = loaded_session();
        click(&mut s, 100.0, 100.0);
        let t = s.handle(Notification::SourceChanged {
            src: "b.mp4".to_string(),
        });

        assert!(s.log().is_empty());
        assert!(s.rendered().markers.is_empty());
        assert_eq!(t.rendered.unwrap().markers.len(), 0);
        assert_eq!(
            t.effects,
            vec![
                Effect::LoadSource("b.mp4".to_string()),
                Effect::Deliver(Vec::new())
            ]
        );
        assert_eq!(s.source(), Some("b.mp4"));
        assert!(!s.media().intrinsic().is_resolved());
    }

    #[test]
    fn test_fullscreen_round_trip() {
        let mut s = loaded_session();
        click(&mut s, 100.0, 100.0);
        let normal = s.rendered().clone();

        let t = s.handle(Notification::FullscreenToggled {
            is_fullscreen: true,
        });
        assert_eq!(t.effects, vec![Effect::AcquireFullscreenSurface]);
        assert_eq!(t.rendered.unwrap().surface, SurfaceKind::Fullscreen);

        let t = s.handle(Notification::FullscreenToggled {
            is_fullscreen: false,
        });
        assert_eq!(t.effects, vec![Effect::ReleaseFullscreenSurface]);
        assert_eq!(s.rendered(), &normal);
    }

    #[test]
    fn test_fullscreen_without_geometry_swaps_surface_only() {
        let mut s = session();
        let t = s.handle(Notification::FullscreenToggled {
            is_fullscreen: true,
        });
        let rendered = t.rendered.unwrap();
        assert_eq!(rendered.surface, SurfaceKind::Fullscreen);
        assert!(rendered.markers.is_empty());
    }

    #[test]
    fn test_geometry_change_reports_frame_height() {
        let mut s = loaded_session();
        let t = s.handle(Notification::GeometryChanged(DisplayGeometry::at_origin(
            800.0, 450.0,
        )));
        assert_eq!(t.effects, vec![Effect::FrameHeight(450.0)]);
        assert!(t.rendered.is_some());
    }

    #[test]
    fn test_fullscreen_geometry_leaves_frame_height_alone() {
        let mut s = loaded_session();
        s.handle(Notification::FullscreenToggled {
            is_fullscreen: true,
        });
        let t = s.handle(Notification::GeometryChanged(DisplayGeometry::at_origin(
            1920.0, 1080.0,
        )));
        assert!(t.effects.is_empty());
        assert!(t.rendered.is_some());

        s.handle(Notification::FullscreenToggled {
            is_fullscreen: false,
        });
        let t = s.handle(Notification::GeometryChanged(DisplayGeometry::at_origin(
            640.0, 480.0,
        )));
        assert_eq!(t.effects, vec![Effect::FrameHeight(480.0)]);
    }

    #[test]
    fn test_load_failure_toggles_degraded_display() {
        let mut s = loaded_session();
        let t = s.handle(Notification::LoadFailed {
            reason: "network".to_string(),
        });
        assert_eq!(t.effects, vec![Effect::DegradedDisplay(true)]);
        assert!(s.is_degraded());

        let t = s.handle(Notification::CanPlay);
        assert_eq!(t.effects, vec![Effect::DegradedDisplay(false)]);
        assert!(s.handle(Notification::CanPlay).effects.is_empty());
    }

    #[test]
    fn test_teardown_returns_log() {
        let mut s = loaded_session();
        click(&mut s, 100.0, 100.0);
        s.handle(Notification::FullscreenToggled {
            is_fullscreen: true,
        });
        let log = s.teardown();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_notification_json_shape() {
        let n: Notification =
            serde_json::from_str(r#"{"type":"pointer_down","client_x":1.0,"client_y":2.0}"#)
                .unwrap();
        assert_eq!(
            n,
            Notification::PointerDown(PointerPosition::new(1.0, 2.0))
        );
        let n: Notification = serde_json::from_str(r#"{"type":"can_play"}"#).unwrap();
        assert_eq!(n, Notification::CanPlay);
    }

    #[test]
    fn test_truncate_src() {
        assert_eq!(truncate_src("a.mp4"), "a.mp4");
        let long = format!("data:video/mp4;base64,{}", "A".repeat(200));
        let short = truncate_src(&long);
        assert!(short.starts_with("data:video/mp4;base64,"));
        assert!(short.ends_with("(222 bytes)"));
    }
}
