#![allow(dead_code)]

use herald::{Callback, Emitter, ListenerResult};
use std::rc::Rc;

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocEvent {
    Opened,
    Saved,
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub line: usize,
    pub text: String,
}

impl Edit {
    pub fn new(line: usize, text: &str) -> Self {
        Self {
            line,
            text: text.to_string(),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// A shared emitter, so listeners can reach it through a weak handle.
pub fn shared_emitter<A: 'static>() -> Rc<Emitter<DocEvent, A>> {
    Rc::new(Emitter::new())
}

/// A callback that runs `f` against the emitter it is registered on.
pub fn reentrant<A: 'static>(
    emitter: &Rc<Emitter<DocEvent, A>>,
    f: impl Fn(&Emitter<DocEvent, A>) -> ListenerResult + 'static,
) -> Callback<A> {
    Callback::bound(emitter, move |emitter: &Emitter<DocEvent, A>, _: &A| f(emitter))
}
