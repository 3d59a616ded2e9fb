//! Core binding registry for Rabita.

pub mod binder;
pub mod error;
pub mod host;
pub mod resolve;

pub use binder::Binder;
pub use binder::prelude;
pub use error::{BinderError, Result};
pub use host::{BindingFactory, Factory, HostContainer, StaticTypeSource, TypeSource};
