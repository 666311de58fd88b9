//! # The Registry — heart of Warren
//!
//! Maps capability keys to producers and memoizes singleton instances.
//!
//! # Architecture
//! ```text
//!   bind ──>  bindings: key -> Binding { producer, lifecycle }
//!                                   │
//!   resolve ──> singletons hit? ────┤ no
//!                │ yes              ▼
//!                │            run producer ──(Singleton)──> singletons
//!                ▼                  │
//!           Capability::cast <──────┘
//! ```
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use warren_registry::prelude::*;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, msg: &str) -> String;
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, msg: &str) -> String { format!("[console] {msg}") }
//! }
//!
//! capability!(dyn Logger = [ConsoleLogger]);
//!
//! let registry = Registry::new();
//! registry.bind::<dyn Logger, _>(|| ConsoleLogger, Lifecycle::Singleton);
//!
//! let logger: Arc<dyn Logger> = registry.resolve();
//! assert_eq!(logger.log("ready"), "[console] ready");
//! ```

use std::any::type_name;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use tracing::{debug, instrument, trace, warn};
use warren_support::rendering::suggest_similar;

use crate::capability::{Capability, Instance};
use crate::error::{RegistryError, Result, TypeMismatchError, UnboundError};
use crate::key::CapabilityKey;
use crate::lifecycle::Lifecycle;
use crate::module::Module;

/// Type alias for stored producers.
///
/// Wraps the caller's `Fn() -> C` so it returns an erased [`Instance`].
pub(crate) type Producer = Arc<dyn Fn() -> Instance + Send + Sync>;

const MAX_SUGGESTIONS: usize = 3;

/// An instance together with the concrete type that produced it.
#[derive(Clone)]
struct Produced {
    instance: Instance,
    concrete: &'static str,
}

/// Binding entry for a single capability.
struct Binding {
    producer: Producer,
    lifecycle: Lifecycle,
    concrete: &'static str,
    /// Elects the one producer call whose result becomes the singleton.
    elected: OnceCell<Produced>,
}

impl Binding {
    fn produce(&self) -> Produced {
        Produced {
            instance: (self.producer)(),
            concrete: self.concrete,
        }
    }
}

#[derive(Default)]
struct Tables {
    bindings: HashMap<CapabilityKey, Arc<Binding>>,
    singletons: HashMap<CapabilityKey, Produced>,
}

// ═══════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════

/// Thread-safe dependency injection registry.
///
/// Holds two tables behind a single lock: the binding table and the
/// singleton cache. Producers run outside the lock, so a producer may
/// resolve other capabilities from the same registry.
///
/// Use [`Registry::new`] for isolated registries (tests, multiple
/// containers in one process) and [`Registry::global`] for the shared
/// process-wide one.
pub struct Registry {
    pub(crate) label: String,
    tables: RwLock<Tables>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_label("registry")
    }
}

impl Registry {
    /// Creates an empty, isolated registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with a label used in logs and `Debug`.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tables: RwLock::new(Tables::default()),
        }
    }

    /// The label given at construction.
    pub fn label(&self) -> &str {
        &self.label
    }

    // ── Binding ──

    /// Binds capability `I` to a producer of `C`.
    ///
    /// The first binding for a key wins: if `I` is already bound this is a
    /// no-op and returns `false`. The producer is never called here, and
    /// nothing checks that `C` satisfies `I` until resolution.
    ///
    /// ```rust,ignore
    /// registry.bind::<dyn Logger, _>(|| ConsoleLogger, Lifecycle::Singleton);
    /// ```
    pub fn bind<I, C>(
        &self,
        producer: impl Fn() -> C + Send + Sync + 'static,
        lifecycle: Lifecycle,
    ) -> bool
    where
        I: ?Sized + 'static,
        C: Send + Sync + 'static,
    {
        self.bind_key(CapabilityKey::of::<I>(), producer, lifecycle)
    }

    /// Binds an explicit name to a producer of `C`.
    pub fn bind_named<C: Send + Sync + 'static>(
        &self,
        name: impl Into<String>,
        producer: impl Fn() -> C + Send + Sync + 'static,
        lifecycle: Lifecycle,
    ) -> bool {
        self.bind_key(CapabilityKey::named(name), producer, lifecycle)
    }

    /// Binds a prepared [`CapabilityKey`] to a producer of `C`.
    pub fn bind_key<C: Send + Sync + 'static>(
        &self,
        key: impl Into<CapabilityKey>,
        producer: impl Fn() -> C + Send + Sync + 'static,
        lifecycle: Lifecycle,
    ) -> bool {
        let key = key.into();
        let concrete = type_name::<C>();
        let mut tables = self.tables.write();

        match tables.bindings.entry(key) {
            Entry::Occupied(existing) => {
                debug!(
                    registry = %self.label,
                    key = %existing.key(),
                    kept = existing.get().concrete,
                    ignored = concrete,
                    "Capability already bound, keeping first binding"
                );
                false
            }
            Entry::Vacant(slot) => {
                debug!(
                    registry = %self.label,
                    key = %slot.key(),
                    %lifecycle,
                    concrete,
                    "Bound capability"
                );
                slot.insert(Arc::new(Binding {
                    producer: Arc::new(move || Arc::new(producer()) as Instance),
                    lifecycle,
                    concrete,
                    elected: OnceCell::new(),
                }));
                true
            }
        }
    }

    /// Runs a [`Module`]'s bindings against this registry.
    #[instrument(skip_all, fields(registry = %self.label, module = module.name()))]
    pub fn install(&self, module: &dyn Module) {
        let before = self.len();
        module.bind(self);
        debug!(added = self.len().saturating_sub(before), "Installed module");
    }

    // ── Checked resolution ──

    /// Resolves capability `I`, reporting failures as [`RegistryError`].
    pub fn get<I: Capability + ?Sized>(&self) -> Result<Arc<I>> {
        self.get_by(&CapabilityKey::of::<I>())
    }

    /// Resolves the binding under `name` as capability `I`.
    pub fn get_named<I: Capability + ?Sized>(&self, name: &str) -> Result<Arc<I>> {
        self.get_by(&CapabilityKey::named(name))
    }

    /// Resolves the binding under `key` as capability `I`.
    ///
    /// `key` need not be `I`'s own key: any binding whose concrete type
    /// satisfies `I` can be viewed as `I`.
    pub fn get_by<I: Capability + ?Sized>(&self, key: &CapabilityKey) -> Result<Arc<I>> {
        match self.produce(key) {
            Some(produced) => self.cast(key, produced),
            None => Err(self.unbound(key)),
        }
    }

    // ── Strict resolution ──

    /// Resolves capability `I`.
    ///
    /// # Panics
    /// Panics if `I` is unbound or its bound instance does not satisfy
    /// `I`. Both are configuration bugs; use [`try_resolve`](Self::try_resolve)
    /// when absence is acceptable.
    #[track_caller]
    pub fn resolve<I: Capability + ?Sized>(&self) -> Arc<I> {
        match self.get::<I>() {
            Ok(instance) => instance,
            Err(err) => panic!("{err}"),
        }
    }

    /// Resolves the binding under `name` as capability `I`.
    ///
    /// # Panics
    /// Same conditions as [`resolve`](Self::resolve).
    #[track_caller]
    pub fn resolve_named<I: Capability + ?Sized>(&self, name: &str) -> Arc<I> {
        match self.get_named::<I>(name) {
            Ok(instance) => instance,
            Err(err) => panic!("{err}"),
        }
    }

    /// Resolves the binding under `key` as capability `I`.
    ///
    /// # Panics
    /// Same conditions as [`resolve`](Self::resolve).
    #[track_caller]
    pub fn resolve_by<I: Capability + ?Sized>(&self, key: &CapabilityKey) -> Arc<I> {
        match self.get_by::<I>(key) {
            Ok(instance) => instance,
            Err(err) => panic!("{err}"),
        }
    }

    // ── Safe resolution ──

    /// Resolves capability `I`, or `None` if unbound or mismatched.
    pub fn try_resolve<I: Capability + ?Sized>(&self) -> Option<Arc<I>> {
        self.try_resolve_by(&CapabilityKey::of::<I>())
    }

    /// Resolves the binding under `name` as `I`, or `None`.
    pub fn try_resolve_named<I: Capability + ?Sized>(&self, name: &str) -> Option<Arc<I>> {
        self.try_resolve_by(&CapabilityKey::named(name))
    }

    /// Resolves the binding under `key` as `I`, or `None`.
    pub fn try_resolve_by<I: Capability + ?Sized>(&self, key: &CapabilityKey) -> Option<Arc<I>> {
        // absence is expected here, so skip building suggestions
        let produced = self.produce(key)?;
        self.cast(key, produced).ok()
    }

    // ── Reset ──

    /// Removes every binding and every cached singleton.
    pub fn reset(&self) {
        let (bindings, singletons) = {
            let mut tables = self.tables.write();
            (
                std::mem::take(&mut tables.bindings),
                std::mem::take(&mut tables.singletons),
            )
        };
        debug!(
            registry = %self.label,
            bindings = bindings.len(),
            singletons = singletons.len(),
            "Registry reset"
        );
        // instances drop here, after the lock is released
    }

    // ── Introspection ──

    /// Returns `true` if `key` has a binding.
    pub fn is_bound(&self, key: &CapabilityKey) -> bool {
        self.tables.read().bindings.contains_key(key)
    }

    /// Returns the lifecycle `key` was bound with.
    pub fn lifecycle_of(&self, key: &CapabilityKey) -> Option<Lifecycle> {
        self.tables.read().bindings.get(key).map(|b| b.lifecycle)
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.tables.read().bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.tables.read().bindings.is_empty()
    }

    /// Returns every bound key, in no particular order.
    pub fn keys(&self) -> Vec<CapabilityKey> {
        self.tables.read().bindings.keys().cloned().collect()
    }

    // ── Internal ──

    /// Finds or builds the erased instance for `key`, `None` if unbound.
    fn produce(&self, key: &CapabilityKey) -> Option<Produced> {
        let binding = {
            let tables = self.tables.read();

            if let Some(cached) = tables.singletons.get(key) {
                trace!(registry = %self.label, key = %key, "Singleton cache hit");
                return Some(cached.clone());
            }

            Arc::clone(tables.bindings.get(key)?)
        };

        if !binding.lifecycle.is_singleton() {
            trace!(registry = %self.label, key = %key, "Producing transient instance");
            return Some(binding.produce());
        }

        let produced = binding
            .elected
            .get_or_init(|| {
                trace!(registry = %self.label, key = %key, "Producing singleton instance");
                binding.produce()
            })
            .clone();

        let mut tables = self.tables.write();
        // a reset while the producer ran detaches this binding
        let current = tables
            .bindings
            .get(key)
            .is_some_and(|bound| Arc::ptr_eq(bound, &binding));
        if current {
            tables
                .singletons
                .entry(key.clone())
                .or_insert_with(|| produced.clone());
            trace!(registry = %self.label, key = %key, "Cached singleton");
        }
        Some(produced)
    }

    fn cast<I: Capability + ?Sized>(&self, key: &CapabilityKey, produced: Produced) -> Result<Arc<I>> {
        I::cast(produced.instance).ok_or_else(|| {
            let requested = type_name::<I>();
            warn!(
                registry = %self.label,
                key = %key,
                requested,
                concrete = produced.concrete,
                "Bound instance does not satisfy requested capability"
            );
            RegistryError::TypeMismatch(TypeMismatchError {
                key: key.clone(),
                requested,
                concrete: produced.concrete,
            })
        })
    }

    /// Builds the unbound error with "did you mean" suggestions.
    fn unbound(&self, key: &CapabilityKey) -> RegistryError {
        let tables = self.tables.read();
        let labels: Vec<&str> = tables.bindings.keys().map(CapabilityKey::label).collect();
        let suggestions = suggest_similar(key.label(), &labels, MAX_SUGGESTIONS);
        trace!(registry = %self.label, key = %key, "Capability not bound");
        RegistryError::Unbound(UnboundError {
            requested: key.clone(),
            suggestions,
        })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("Registry")
            .field("label", &self.label)
            .field("bindings", &tables.bindings.len())
            .field("singletons", &tables.singletons.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
