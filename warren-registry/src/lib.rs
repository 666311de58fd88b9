//! Core registry implementation for Warren DI.

pub mod builder;
pub mod capability;
pub mod error;
pub mod global;
pub mod key;
pub mod lifecycle;
pub mod module;
pub mod registry;

pub use builder::RegistryBuilder;
pub use capability::{Capability, Instance};
pub use error::{RegistryError, Result};
pub use key::CapabilityKey;
pub use lifecycle::Lifecycle;
pub use module::Module;
pub use registry::Registry;

pub mod prelude {
    pub use crate::capability;
    pub use crate::{
        Capability, CapabilityKey, Lifecycle, Module, Registry, RegistryBuilder, RegistryError,
    };
}
