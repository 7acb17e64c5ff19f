//! Reply observer port
//!
//! Defines the callback interface for incremental reply rendering.

/// Callback for reply snapshots during streaming
///
/// Implementations live in the presentation layer and can display the
/// growing reply in various ways (console printer, TUI pane, etc.)
pub trait ReplyObserver: Send + Sync {
    /// Called after each folded event that changed the renderable text,
    /// and once more with `is_final = true` when the stream ends.
    fn on_snapshot(&self, text: &str, is_final: bool);
}

/// No-op observer for when incremental rendering is not needed
pub struct NoReplyObserver;

impl ReplyObserver for NoReplyObserver {
    fn on_snapshot(&self, _text: &str, _is_final: bool) {}
}
