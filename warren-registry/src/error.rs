//! Error types for registry resolution.
//!
//! Binding never fails, so every error here comes out of a resolve call.
//! Messages name the capability, what was bound, and how to fix it.

use crate::key::CapabilityKey;
use std::fmt;
use warren_support::rendering::shorten_type_name;

/// Main error type for resolution.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Requested capability has no binding.
    #[error("{}", .0)]
    Unbound(UnboundError),

    /// A binding exists and its producer ran, but the instance does not
    /// satisfy the requested capability.
    #[error("{}", .0)]
    TypeMismatch(TypeMismatchError),
}

/// Error when no binding exists for a capability.
#[derive(Debug)]
pub struct UnboundError {
    /// The capability that was requested
    pub requested: CapabilityKey,
    /// Bound keys with a similar label, for "did you mean?" hints
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnboundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability not bound: {}", self.requested)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        match self.requested.type_name() {
            Some(type_name) => write!(
                f,
                "\n  Hint: Did you forget to call .bind::<{}, _>()?",
                shorten_type_name(type_name)
            ),
            None => write!(
                f,
                "\n  Hint: Did you forget to call .bind_named({})?",
                self.requested
            ),
        }
    }
}

/// Error when the bound concrete type does not satisfy the capability.
#[derive(Debug)]
pub struct TypeMismatchError {
    /// The key the binding was found under
    pub key: CapabilityKey,
    /// Type name of the capability the caller asked for
    pub requested: &'static str,
    /// Type name of the concrete instance the producer returned
    pub concrete: &'static str,
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let requested = shorten_type_name(self.requested);
        let concrete = shorten_type_name(self.concrete);
        write!(
            f,
            "Type mismatch resolving {}: {concrete} does not satisfy {requested}",
            self.key,
        )?;
        write!(
            f,
            "\n  Hint: List {concrete} in capability!({requested} = [...]) or bind a different producer"
        )
    }
}

/// Convenient Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    trait Logger: Send + Sync {}
    struct ConsoleLogger;

    #[test]
    fn unbound_error_display() {
        let err = RegistryError::Unbound(UnboundError {
            requested: CapabilityKey::of::<dyn Logger>(),
            suggestions: vec![],
        });

        let msg = format!("{err}");
        assert!(msg.contains("not bound"));
        assert!(msg.contains("Logger"));
        assert!(msg.contains(".bind::<dyn Logger, _>()"));
        assert!(!msg.contains("Did you mean"));
    }

    #[test]
    fn unbound_named_error_mentions_bind_named() {
        let err = RegistryError::Unbound(UnboundError {
            requested: CapabilityKey::named("logger"),
            suggestions: vec!["loggers".to_string()],
        });

        let msg = format!("{err}");
        assert!(msg.contains(".bind_named(\"logger\")"));
        assert!(msg.contains("Did you mean"));
        assert!(msg.contains("- loggers"));
    }

    #[test]
    fn type_mismatch_error_display() {
        let err = RegistryError::TypeMismatch(TypeMismatchError {
            key: CapabilityKey::of::<dyn Logger>(),
            requested: std::any::type_name::<dyn Logger>(),
            concrete: std::any::type_name::<ConsoleLogger>(),
        });

        let msg = format!("{err}");
        assert!(msg.contains("Type mismatch"));
        assert!(msg.contains("ConsoleLogger does not satisfy dyn Logger"));
    }
}
