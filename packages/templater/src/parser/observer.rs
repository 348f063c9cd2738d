//! Diagnostic hooks for the parser.
//!
//! The parser never logs on its own; callers that want diagnostics pass an
//! observer.

use super::state::ParserState;

/// Receives notifications as the parser walks a template.
///
/// Every method has a no-op default.
pub trait ParseObserver {
    /// A recognised element was dispatched to its handler.
    fn on_element(&self, _key: &str) {}

    /// An element with no registered handler was passed over.
    fn on_unhandled(&self, _key: &str) {}

    /// A recognised element was deliberately not recorded.
    fn on_ignored(&self, _key: &str, _reason: &str) {}

    /// Text was appended to a message field.
    fn on_text(&self, _target: ParserState, _text: &str) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

/// Observer that forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ParseObserver for TracingObserver {
    fn on_element(&self, key: &str) {
        tracing::trace!(element = key, "Element dispatched");
    }

    fn on_unhandled(&self, key: &str) {
        tracing::trace!(element = key, "No handler for element, passing over");
    }

    fn on_ignored(&self, key: &str, reason: &str) {
        tracing::debug!(element = key, reason, "Element ignored");
    }

    fn on_text(&self, target: ParserState, text: &str) {
        tracing::trace!(?target, bytes = text.len(), "Text appended");
    }
}
