//! Normal/fullscreen presentation switching.
//!
//! The browser moves the video onto an OS-level fullscreen surface that
//! the in-flow overlay cannot cover, so a second, viewport-fixed overlay
//! is held for as long as fullscreen lasts. Transitions are driven only
//! by fullscreen-change notifications from the host.

use vidcoord_model::marker::{PresentationContext, SurfaceKind};

/// Overlay surface bookkeeping requested by a context transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceChange {
    /// Create the fullscreen overlay; markers move onto it.
    AcquireFullscreen,
    /// Remove the fullscreen overlay; markers move back in-flow.
    ReleaseFullscreen,
}

/// Two-state machine over [`PresentationContext`].
#[derive(Debug, Clone, Default)]
pub struct PresentationAdapter {
    context: PresentationContext,
}

impl PresentationAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> PresentationContext {
        self.context
    }

    /// Surface markers currently paint on.
    pub fn active_surface(&self) -> SurfaceKind {
        SurfaceKind::from(self.context)
    }

    /// Apply a fullscreen-change notification.
    ///
    /// Returns `None` when the notification repeats the current state.
    pub fn on_fullscreen_changed(&mut self, is_fullscreen: bool) -> Option<SurfaceChange> {
        let next = PresentationContext::from_fullscreen(is_fullscreen);
        if next == self.context {
            tracing::trace!(?next, "Fullscreen notification without state change");
            return None;
        }

        self.context = next;
        let change = match next {
            PresentationContext::Fullscreen => SurfaceChange::AcquireFullscreen,
            PresentationContext::Normal => SurfaceChange::ReleaseFullscreen,
        };
        tracing::debug!(context = ?next, ?change, "Presentation context changed");
        Some(change)
    }

    /// Drop back to the normal context, releasing any fullscreen surface.
    pub fn release(&mut self) -> Option<SurfaceChange> {
        self.on_fullscreen_changed(false)
    }
}
