//! # Rabita — contextual bindings for host IoC containers
//!
//! A small registry for declaring short aliases, interface-to-implementation
//! bindings and per-consumer dependency rules, then committing them to a host
//! dependency-injection container in one pass. Inspired by Laravel's
//! contextual binding API.

pub use rabita_binder::*;
pub use rabita_support::*;
