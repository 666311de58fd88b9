//! The process-wide registry instance.

use once_cell::sync::Lazy;

use crate::registry::Registry;

// Created on first access, lives until the process exits.
static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(|| Registry::with_label("global"));

impl Registry {
    /// Provides a reference to the shared process-wide registry.
    ///
    /// Convenient for call sites far from the composition root. Tests
    /// should build their own [`Registry::new`] instead, so state never
    /// leaks between cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren_registry::{Lifecycle, Registry};
    ///
    /// Registry::global().bind_named("greeting", || String::from("hi"), Lifecycle::Singleton);
    /// let greeting = Registry::global().resolve_named::<String>("greeting");
    /// assert_eq!(greeting.as_str(), "hi");
    /// ```
    pub fn global() -> &'static Registry {
        &GLOBAL_REGISTRY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_is_one_instance() {
        assert!(std::ptr::eq(Registry::global(), Registry::global()));
        assert_eq!(Registry::global().label(), "global");
    }

    #[test]
    fn new_registries_are_isolated_from_global() {
        let local = Registry::new();
        assert!(!std::ptr::eq(&local, Registry::global()));
        assert!(local.is_empty());
    }
}
