//! Fluent construction of a [`Registry`].
//!
//! The builder is sugar over [`Registry::bind`] and friends; the
//! resulting registry stays open for further binding.

use tracing::{info, instrument};

use crate::lifecycle::Lifecycle;
use crate::module::Module;
use crate::registry::Registry;

/// Builds a [`Registry`] with bindings registered up front.
///
/// # Examples
/// ```rust,ignore
/// let registry = Registry::builder()
///     .label("app")
///     .singleton::<dyn Logger, _>(|| ConsoleLogger)
///     .transient::<dyn Counter, _>(SimpleCounter::default)
///     .module(&StorageModule)
///     .build();
/// ```
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Set the label used in logs and `Debug` output.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.registry.label = label.into();
        self
    }

    // ── Type-keyed ──

    /// Bind capability `I` to a singleton producer of `C`.
    pub fn singleton<I, C>(self, producer: impl Fn() -> C + Send + Sync + 'static) -> Self
    where
        I: ?Sized + 'static,
        C: Send + Sync + 'static,
    {
        self.registry.bind::<I, C>(producer, Lifecycle::Singleton);
        self
    }

    /// Bind capability `I` to a transient producer of `C`.
    pub fn transient<I, C>(self, producer: impl Fn() -> C + Send + Sync + 'static) -> Self
    where
        I: ?Sized + 'static,
        C: Send + Sync + 'static,
    {
        self.registry.bind::<I, C>(producer, Lifecycle::Transient);
        self
    }

    // ── Name-keyed ──

    /// Bind `name` to a singleton producer of `C`.
    pub fn named_singleton<C: Send + Sync + 'static>(
        self,
        name: impl Into<String>,
        producer: impl Fn() -> C + Send + Sync + 'static,
    ) -> Self {
        self.registry.bind_named(name, producer, Lifecycle::Singleton);
        self
    }

    /// Bind `name` to a transient producer of `C`.
    pub fn named_transient<C: Send + Sync + 'static>(
        self,
        name: impl Into<String>,
        producer: impl Fn() -> C + Send + Sync + 'static,
    ) -> Self {
        self.registry.bind_named(name, producer, Lifecycle::Transient);
        self
    }

    // ── Modules ──

    /// Install a [`Module`].
    pub fn module(self, module: &dyn Module) -> Self {
        self.registry.install(module);
        self
    }

    // ── Build ──

    /// Finish building.
    #[instrument(skip(self), name = "registry_build", fields(label = %self.registry.label))]
    pub fn build(self) -> Registry {
        info!(bound = self.registry.len(), "Registry built");
        self.registry
    }
}

impl Registry {
    /// Create a new builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }
}
