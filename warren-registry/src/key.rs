//! Capability identification keys.
//!
//! [`CapabilityKey`] uniquely identifies a capability within a registry.
//! A key is derived either from a Rust type ([`TypeId`]) or from an
//! explicit name chosen by the caller.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Uniquely identifies a capability in a [`Registry`](crate::Registry).
///
/// Type keys compare by [`TypeId`], so every spelling of the same type
/// (`dyn Logger`, `dyn crate::Logger`, a type alias) lands on the same key.
/// Named keys compare by their string. A type key never equals a named key.
///
/// # Examples
/// ```
/// use warren_registry::key::CapabilityKey;
///
/// trait Logger: Send + Sync {}
///
/// let key = CapabilityKey::of::<dyn Logger>();
/// assert!(key.type_name().unwrap().contains("Logger"));
/// assert_eq!(key.name(), None);
///
/// let named = CapabilityKey::named("logger");
/// assert_eq!(named.name(), Some("logger"));
/// assert_ne!(key, named);
/// ```
#[derive(Clone)]
pub struct CapabilityKey {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Type {
        type_id: TypeId,
        type_name: &'static str,
    },
    Named(String),
}

impl CapabilityKey {
    /// Creates the key for type `T`.
    ///
    /// `T` is usually a trait object (`dyn Logger`), but any `'static`
    /// type works.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            repr: Repr::Type {
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
            },
        }
    }

    /// Creates a key from an explicit name, bypassing type derivation.
    #[inline]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            repr: Repr::Named(name.into()),
        }
    }

    /// Returns the full type name for type-derived keys.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        match self.repr {
            Repr::Type { type_name, .. } => Some(type_name),
            Repr::Named(_) => None,
        }
    }

    /// Returns the explicit name for named keys.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        match &self.repr {
            Repr::Type { .. } => None,
            Repr::Named(name) => Some(name.as_str()),
        }
    }

    /// The human-readable label used in logs and error messages.
    pub fn label(&self) -> &str {
        match &self.repr {
            Repr::Type { type_name, .. } => *type_name,
            Repr::Named(name) => name.as_str(),
        }
    }
}

impl PartialEq for CapabilityKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Type { type_id: a, .. }, Repr::Type { type_id: b, .. }) => a == b,
            (Repr::Named(a), Repr::Named(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CapabilityKey {}

// type_name is display-only and must stay out of the hash
impl Hash for CapabilityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.repr {
            Repr::Type { type_id, .. } => {
                0u8.hash(state);
                type_id.hash(state);
            }
            Repr::Named(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

impl From<&str> for CapabilityKey {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for CapabilityKey {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl fmt::Debug for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Type { type_name, .. } => write!(f, "CapabilityKey({type_name})"),
            Repr::Named(name) => write!(f, "CapabilityKey(name={name:?})"),
        }
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Type { type_name, .. } => write!(f, "{type_name}"),
            Repr::Named(name) => write!(f, "{name:?}"),
        }
    }
}
