//! # Warren — Dependency Injection Registry for Rust
//!
//! Bind an abstract capability to a producer of a concrete type, then
//! resolve the capability anywhere without knowing what builds it.
//!
//! ```rust
//! use std::sync::Arc;
//! use warren::prelude::*;
//!
//! trait Logger: Send + Sync {
//!     fn prefix(&self) -> &'static str;
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn prefix(&self) -> &'static str { "[console]" }
//! }
//!
//! capability!(dyn Logger = [ConsoleLogger]);
//!
//! let registry = Registry::builder()
//!     .singleton::<dyn Logger, _>(|| ConsoleLogger)
//!     .build();
//!
//! let a: Arc<dyn Logger> = registry.resolve();
//! let b: Arc<dyn Logger> = registry.resolve();
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(a.prefix(), "[console]");
//! ```

pub use warren_registry::*;
pub use warren_support as support;
