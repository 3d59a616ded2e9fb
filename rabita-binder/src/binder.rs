//! # The Binder — heart of Rabita
//!
//! Collects aliases, interface bindings and per-consumer dependency lists
//! during bootstrap, then pushes the fully resolved rules into the host
//! container in one pass.
//!
//! # Architecture
//! ```text
//! set_alias / set_binding / set_needs        (configuration phase)
//!                   │
//!              register()  ── when/needs/give per dependency ──▶
//!              solidify()  ── direct bind + alias factory    ──▶  HostContainer
//! ```
//!
//! A binder is built fresh for each bootstrap run and discarded once the
//! rules are applied; there is no process-wide instance.
//!
//! # Examples
//! ```rust
//! use rabita_binder::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Rules(Vec<(String, String, String)>);
//!
//! impl HostContainer for Rules {
//!     fn bind(&mut self, _name: &str, _target: &str) {}
//!     fn bind_factory(&mut self, _name: &str, _factory: BindingFactory) {}
//!     fn bind_contextual(&mut self, consumer: &str, dependency: &str, implementation: &str) {
//!         self.0.push((consumer.into(), dependency.into(), implementation.into()));
//!     }
//! }
//!
//! let types = Arc::new(
//!     StaticTypeSource::new()
//!         .with("app::http::ReportController")
//!         .with("app::contracts::Cache")
//!         .with("app::cache::RedisCache"),
//! );
//!
//! let mut rules = Rules::default();
//! let mut binder = Binder::new(&mut rules, types);
//! binder.set_alias("reports", "app::http::ReportController")?;
//! binder.set_alias("cache", "app::contracts::Cache")?;
//! binder.set_binding("redis", "cache", "app::cache::RedisCache")?;
//! binder.set_needs("reports", ["redis"])?;
//! binder.register()?;
//!
//! assert_eq!(rules.0.len(), 1);
//! # Ok::<(), BinderError>(())
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::{BinderError, Result, UnknownBindingError};
use crate::host::{Factory, HostContainer, TypeSource};
use crate::resolve::AliasResolver;

/// An interface-to-concrete pair declared under an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Binding {
    pub interface: String,
    pub concrete: String,
}

/// The most recently declared binding, kept for [`Binder::solidify`].
#[derive(Debug, Clone)]
struct LastBinding {
    alias: String,
    interface: String,
    concrete: String,
}

/// Manages a set of contextual bindings on top of a host container.
///
/// Three tables are filled during the configuration phase:
/// - alias → fully qualified name
/// - binding alias → interface/concrete pair
/// - requester alias → ordered dependency aliases
///
/// [`register`](Binder::register) and [`solidify`](Binder::solidify) read
/// them and emit instructions to the host. Requesters are walked in sorted
/// order so the emitted instruction stream is stable across runs.
pub struct Binder<C: HostContainer> {
    container: C,
    types: Arc<dyn TypeSource>,
    aliases: HashMap<String, String>,
    bindings: HashMap<String, Binding>,
    needs: BTreeMap<String, Vec<String>>,
    last_binding: Option<LastBinding>,
}

impl<C: HostContainer> Binder<C> {
    /// Creates a binder over the given host container and type source.
    ///
    /// Pass `&mut container` to keep ownership on the application side.
    pub fn new(container: C, types: Arc<dyn TypeSource>) -> Self {
        Self {
            container,
            types,
            aliases: HashMap::new(),
            bindings: HashMap::new(),
            needs: BTreeMap::new(),
            last_binding: None,
        }
    }

    /// Declares an alias for a class or interface name.
    ///
    /// The last write for a given alias wins.
    ///
    /// # Errors
    /// [`BinderError::InvalidAlias`] if `alias` is empty.
    pub fn set_alias(&mut self, alias: &str, fqn: impl Into<String>) -> Result<&mut Self> {
        let alias = checked_alias(alias)?;
        let fqn = fqn.into();

        debug!(alias = %alias, fqn = %fqn, "Declared alias");
        self.aliases.insert(alias, fqn);
        Ok(self)
    }

    /// Declares a binding from an interface to a concrete implementation.
    ///
    /// Both sides may be aliases or fully qualified names; they are resolved
    /// lazily by [`register`](Binder::register). The entry is also recorded
    /// as the "last binding" for [`solidify`](Binder::solidify).
    ///
    /// # Errors
    /// [`BinderError::InvalidAlias`] if `alias` is empty.
    pub fn set_binding(
        &mut self,
        alias: &str,
        interface: impl Into<String>,
        concrete: impl Into<String>,
    ) -> Result<&mut Self> {
        let alias = checked_alias(alias)?;
        let interface = interface.into();
        let concrete = concrete.into();

        debug!(alias = %alias, interface = %interface, concrete = %concrete, "Declared binding");
        self.bindings.insert(
            alias.clone(),
            Binding {
                interface: interface.clone(),
                concrete: concrete.clone(),
            },
        );
        self.last_binding = Some(LastBinding {
            alias,
            interface,
            concrete,
        });
        Ok(self)
    }

    /// Declares the dependencies of a requester.
    ///
    /// Each entry in `needs` must name a binding alias by the time
    /// [`register`](Binder::register) runs; nothing is checked here.
    ///
    /// # Errors
    /// [`BinderError::InvalidAlias`] if `alias` is empty.
    pub fn set_needs<I, S>(&mut self, alias: &str, needs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let alias = checked_alias(alias)?;
        let needs: Vec<String> = needs.into_iter().map(Into::into).collect();

        debug!(alias = %alias, count = needs.len(), "Declared dependencies");
        self.needs.insert(alias, needs);
        Ok(self)
    }

    /// Pushes every declared dependency rule into the host container.
    ///
    /// For each requester and each of its dependency aliases, emits one
    /// `when(requester).needs(interface).give(concrete)` instruction with
    /// all three names fully resolved.
    ///
    /// Instructions emitted before a failure are NOT rolled back; re-running
    /// after a fix re-emits everything (see the [`HostContainer`] contract).
    ///
    /// # Errors
    /// - [`BinderError::UnknownBinding`] — a listed dependency alias has no
    ///   binding entry
    /// - [`BinderError::UnknownAlias`] / [`BinderError::AliasCycle`] — a
    ///   requester or binding side fails to resolve
    #[instrument(skip(self), name = "binder_register")]
    pub fn register(&mut self) -> Result<()> {
        info!(requesters = self.needs.len(), "Registering contextual bindings");

        let resolver = AliasResolver::new(&self.aliases, &self.bindings, self.types.as_ref());

        for (requester, dependencies) in &self.needs {
            let requester_fqn = resolver.resolve(requester)?;

            for dependency in dependencies {
                let binding = self.bindings.get(dependency).ok_or_else(|| {
                    BinderError::UnknownBinding(UnknownBindingError {
                        requester: requester.clone(),
                        dependency: dependency.clone(),
                    })
                })?;

                let interface_fqn = resolver.resolve(&binding.interface)?;
                let concrete_fqn = resolver.resolve(&binding.concrete)?;

                debug!(
                    consumer = %requester_fqn,
                    needs = %interface_fqn,
                    give = %concrete_fqn,
                    "Contextual binding"
                );
                self.container
                    .when(&requester_fqn)
                    .needs(&interface_fqn)
                    .give(&concrete_fqn);
            }
        }

        info!("Contextual bindings registered ✓");
        Ok(())
    }

    /// Commits the most recently declared binding into the host container.
    ///
    /// Emits two instructions, using the recorded names verbatim:
    /// a direct interface → concrete bind, and a factory bind for the alias
    /// that asks the container to produce the interface. Later code can then
    /// request the short alias and transparently get the implementation.
    ///
    /// # Errors
    /// [`BinderError::NoPriorBinding`] if no binding has been declared.
    #[instrument(skip(self), name = "binder_solidify")]
    pub fn solidify(&mut self) -> Result<()> {
        let last = self.last_binding.clone().ok_or(BinderError::NoPriorBinding)?;

        debug!(
            alias = %last.alias,
            interface = %last.interface,
            concrete = %last.concrete,
            "Solidifying last binding"
        );

        self.container.bind(&last.interface, &last.concrete);

        let interface = last.interface;
        self.container.bind_factory(
            &last.alias,
            Arc::new(move |app: &dyn Factory| app.make(&interface)),
        );

        Ok(())
    }

    /// Consumes the binder, returning the host container handle.
    pub fn into_container(self) -> C {
        self.container
    }
}

impl<C: HostContainer> fmt::Debug for Binder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("aliases", &self.aliases.len())
            .field("bindings", &self.bindings.len())
            .field("requesters", &self.needs.len())
            .finish()
    }
}

/// Validates an alias key: non-empty, returned owned.
fn checked_alias(alias: &str) -> Result<String> {
    if alias.is_empty() {
        return Err(BinderError::InvalidAlias {
            alias: alias.to_owned(),
        });
    }
    Ok(alias.to_owned())
}

pub mod prelude {
    pub use super::Binder;
    pub use crate::error::{BinderError, Result};
    pub use crate::host::{BindingFactory, Factory, HostContainer, StaticTypeSource, TypeSource};
}
