//! Capability satisfaction.
//!
//! Rust cannot ask at runtime whether a concrete type implements a trait,
//! so each trait-object capability lists the concrete types that satisfy
//! it. The [`capability!`](crate::capability) macro writes that list into a
//! [`Capability`] impl, and resolution calls [`Capability::cast`] to turn
//! a type-erased [`Instance`] into the typed view the caller asked for.
//!
//! Every sized type is a capability of itself, so concrete values (including
//! foreign ones such as `String`) resolve without any declaration.

use std::any::Any;
use std::sync::Arc;

/// A type-erased instance as stored by the registry.
///
/// Always wraps the concrete type the producer returned, never a trait
/// object, so downcasting to the concrete type is exact.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Something callers can resolve from a [`Registry`](crate::Registry).
///
/// Sized types get it for free; trait objects implement it with
/// [`capability!`](crate::capability) rather than by hand.
pub trait Capability: Send + Sync + 'static {
    /// Converts an erased instance into this capability.
    ///
    /// Returns `None` when the concrete type behind `instance` does not
    /// satisfy `Self`. The returned `Arc` shares the allocation of
    /// `instance`.
    fn cast(instance: Instance) -> Option<Arc<Self>>;
}

impl<T: Send + Sync + 'static> Capability for T {
    fn cast(instance: Instance) -> Option<Arc<Self>> {
        instance.downcast::<T>().ok()
    }
}

/// Declares which concrete types satisfy a trait-object capability.
///
/// Each listed type must implement the trait, directly or through a
/// subtrait. Concrete capabilities need no declaration.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use warren_registry::{Capability, capability};
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String { "hello".into() }
/// }
///
/// struct Rock;
///
/// capability!(dyn Greeter = [English]);
///
/// let erased: warren_registry::Instance = Arc::new(English);
/// let greeter = <dyn Greeter>::cast(erased).unwrap();
/// assert_eq!(greeter.greet(), "hello");
///
/// let rock: warren_registry::Instance = Arc::new(Rock);
/// assert!(<dyn Greeter>::cast(rock).is_none());
///
/// let english: warren_registry::Instance = Arc::new(English);
/// assert!(English::cast(english).is_some());
/// ```
#[macro_export]
macro_rules! capability {
    ($capability:ty = [$($concrete:ty),+ $(,)?]) => {
        impl $crate::Capability for $capability {
            fn cast(
                instance: $crate::Instance,
            ) -> ::core::option::Option<::std::sync::Arc<Self>> {
                $(
                    let instance = match instance.downcast::<$concrete>() {
                        ::core::result::Result::Ok(concrete) => {
                            return ::core::option::Option::Some(
                                concrete as ::std::sync::Arc<Self>,
                            );
                        }
                        ::core::result::Result::Err(instance) => instance,
                    };
                )+
                ::core::mem::drop(instance);
                ::core::option::Option::None
            }
        }
    };
}
