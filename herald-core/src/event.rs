//! Event identifiers.

use std::{
    fmt,
    hash::Hash,
    sync::atomic::{AtomicU64, Ordering},
};

/// A marker trait for values that can identify an event.
///
/// Any `Eq + Hash + Clone + Debug + 'static` type qualifies through the
/// blanket implementation: strings, integers, enums, or a [`Symbol`].
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Lifecycle { Start, Stop }
///
/// let emitter: Emitter<Lifecycle, ()> = Emitter::new();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an event name",
    label = "must be `Eq + Hash + Clone + Debug + 'static`",
    note = "Event names are map keys; derive `PartialEq, Eq, Hash, Clone, Debug`."
)]
pub trait EventName: Eq + Hash + Clone + fmt::Debug + 'static {}

impl<T> EventName for T where T: Eq + Hash + Clone + fmt::Debug + 'static {}

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(1);

/// A unique event token.
///
/// Two symbols compare equal only if one is a copy of the other, even when
/// their descriptions match.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    id: u64,
    description: Option<&'static str>,
}

impl Symbol {
    /// Create a fresh symbol without a description.
    pub fn new() -> Self {
        Self {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    /// Create a fresh symbol carrying a description for debugging.
    pub fn described(description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..Self::new()
        }
    }

    /// The description given at creation, if any.
    pub fn description(&self) -> Option<&'static str> {
        self.description
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description {
            Some(description) => write!(f, "Symbol({description})"),
            None => write!(f, "Symbol(#{})", self.id),
        }
    }
}
