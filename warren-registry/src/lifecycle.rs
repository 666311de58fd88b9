//! Binding lifecycles.
//!
//! A lifecycle decides whether resolving a capability builds a fresh
//! instance or hands back a memoized one:
//! - [`Lifecycle::Transient`] — new instance on every resolve
//! - [`Lifecycle::Singleton`] — one instance per registry, built lazily
use std::fmt;

/// Defines how long a resolved instance is shared.
///
/// # Examples
/// ```
/// use warren_registry::lifecycle::Lifecycle;
///
/// assert!(Lifecycle::Singleton.is_singleton());
/// assert!(!Lifecycle::Transient.is_singleton());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// New instance created on every resolve call.
    ///
    /// Never cached; what the caller does with it afterwards is its own
    /// business.
    #[default]
    Transient,

    /// One instance shared by every caller of the registry.
    ///
    /// Built on first resolve, never at bind time, and kept until
    /// [`Registry::reset`](crate::Registry::reset).
    Singleton,
}

impl Lifecycle {
    /// Returns `true` if resolved instances are memoized.
    #[inline]
    pub fn is_singleton(&self) -> bool {
        matches!(self, Lifecycle::Singleton)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Transient => write!(f, "Transient"),
            Lifecycle::Singleton => write!(f, "Singleton"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_singleton_is_memoized() {
        assert!(Lifecycle::Singleton.is_singleton());
        assert!(!Lifecycle::Transient.is_singleton());
    }

    #[test]
    fn default_is_transient() {
        assert_eq!(Lifecycle::default(), Lifecycle::Transient);
    }

    #[test]
    fn lifecycle_display() {
        assert_eq!(format!("{}", Lifecycle::Singleton), "Singleton");
        assert_eq!(format!("{}", Lifecycle::Transient), "Transient");
    }
}
