//! Listener priorities.

/// The priority of a listener. Lower values fire earlier.
///
/// Any `i32` is a valid priority; the associated constants name the points
/// of a symmetric scale around [`Priority::NORMAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(pub i32);

impl Priority {
    /// Fires before everything else on the scale.
    pub const HIGHEST: Priority = Priority(-1000);
    /// Fires well before normal listeners.
    pub const HIGHER: Priority = Priority(-100);
    /// Fires just before normal listeners.
    pub const HIGH: Priority = Priority(-10);
    /// The default priority.
    pub const NORMAL: Priority = Priority(0);
    /// Fires just after normal listeners.
    pub const LOW: Priority = Priority(10);
    /// Fires well after normal listeners.
    pub const LOWER: Priority = Priority(100);
    /// Fires after everything else on the scale.
    pub const LOWEST: Priority = Priority(1000);

    /// The raw value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority(value)
    }
}

impl From<Priority> for i32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}
