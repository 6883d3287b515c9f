//! Task priorities.

use std::fmt;

/// Scheduling priority. Larger values run first.
///
/// The named bands are conveniences only; any `i32`, negative values
/// included, is a legal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(pub i32);

impl Priority {
    /// Urgent work, e.g. replies to peers.
    pub const HIGH: Priority = Priority(100);
    /// Regular work.
    pub const MEDIUM: Priority = Priority(50);
    /// Background work.
    pub const LOW: Priority = Priority(10);

    /// Wrap a raw priority value.
    pub const fn new(value: i32) -> Self {
        Priority(value)
    }

    /// The raw priority value.
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

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::HIGH > Priority::MEDIUM);
        assert!(Priority::MEDIUM > Priority::LOW);
        assert!(Priority::LOW > Priority::default());
        assert!(Priority::new(-5) < Priority::default());
        assert!(Priority::new(1_000) > Priority::HIGH);
    }

    #[test]
    fn test_priority_conversions() {
        let p: Priority = 42.into();
        assert_eq!(p.get(), 42);
        assert_eq!(i32::from(Priority::MEDIUM), 50);
        assert_eq!(Priority::LOW.to_string(), "10");
    }
}
