//! Module trait — a group of related bindings.
//!
//! Modules let a composition root split its bindings by concern
//! instead of one long block of `bind` calls.
//!
//! # Examples
//! ```rust,ignore
//! struct LoggingModule;
//!
//! impl Module for LoggingModule {
//!     fn bind(&self, registry: &Registry) {
//!         registry.bind::<dyn Logger, _>(|| ConsoleLogger, Lifecycle::Singleton);
//!     }
//! }
//!
//! registry.install(&LoggingModule);
//! ```

use crate::registry::Registry;

/// A set of bindings installed together.
///
/// Installing follows the registry's usual rule: a capability some
/// earlier binding already claimed keeps that binding.
pub trait Module: Send + Sync {
    /// Add this module's bindings to `registry`.
    fn bind(&self, registry: &Registry);

    /// Human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
