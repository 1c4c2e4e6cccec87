//! Registration metadata and removal filters.

use herald_core::{Context, Priority};

/// Metadata for a registered listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerMeta {
    /// Priority (lower = executed first). Default is 0.
    pub priority: i32,
    /// Remove the listener right before its first invocation.
    pub once: bool,
    /// Optional context used to match the listener on removal.
    pub context: Option<Context>,
}

impl ListenerMeta {
    /// Create default metadata: priority 0, fires on every dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set priority.
    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into().get();
        self
    }

    /// Fire at most once.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Set context.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }
}

/// Narrows which registrations of a callback `unregister` removes.
///
/// A field left as `None` matches every registration. `Some(value)` matches
/// only registrations with exactly that value, so `priority(0)` is a real
/// filter and not the same as leaving priority unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerFilter {
    /// Only remove registrations made with this context.
    pub context: Option<Context>,
    /// Only remove registrations whose once flag equals this value.
    pub once: Option<bool>,
    /// Only remove registrations with this priority.
    pub priority: Option<i32>,
}

impl ListenerFilter {
    /// A filter matching every registration of the callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match on context.
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Match on the once flag.
    pub fn once(mut self, once: bool) -> Self {
        self.once = Some(once);
        self
    }

    /// Match on priority.
    pub fn priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into().get());
        self
    }

    /// Whether a registration with `meta` passes every supplied field.
    pub fn matches(&self, meta: &ListenerMeta) -> bool {
        self.context.is_none_or(|c| meta.context == Some(c))
            && self.once.is_none_or(|o| meta.once == o)
            && self.priority.is_none_or(|p| meta.priority == p)
    }
}
