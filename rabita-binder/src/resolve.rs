//! Alias-to-FQN resolution.
//!
//! Walks the alias and binding tables until a token lands on a name the
//! host runtime recognises:
//! 1. Token names a known class or interface: terminal, returned as-is
//! 2. Token is a declared alias: follow its target
//! 3. Token is a binding alias: follow the binding's interface side
//! 4. Otherwise the token is unresolvable
//!
//! The walk carries a visited set, so a misconfigured alias cycle fails
//! fast with the full chain instead of recursing forever.

use std::collections::{HashMap, HashSet};

use tracing::{trace, warn};

use rabita_support::rendering::suggest_similar;

use crate::binder::Binding;
use crate::error::{AliasCycleError, BinderError, Result, UnknownAliasError};
use crate::host::TypeSource;

/// Read-only view over the binder's tables for one resolution pass.
pub(crate) struct AliasResolver<'a> {
    aliases: &'a HashMap<String, String>,
    bindings: &'a HashMap<String, Binding>,
    types: &'a dyn TypeSource,
}

impl<'a> AliasResolver<'a> {
    pub fn new(
        aliases: &'a HashMap<String, String>,
        bindings: &'a HashMap<String, Binding>,
        types: &'a dyn TypeSource,
    ) -> Self {
        Self {
            aliases,
            bindings,
            types,
        }
    }

    /// Resolves `token` to a fully qualified name.
    ///
    /// # Errors
    /// - [`BinderError::AliasCycle`] — the chain loops back on itself
    /// - [`BinderError::UnknownAlias`] — the chain dead-ends on a token
    ///   that is neither a known type nor a declared alias or binding
    pub fn resolve(&self, token: &str) -> Result<String> {
        let mut visiting = HashSet::new();
        let mut path = Vec::new();
        self.step(token, &mut visiting, &mut path)
    }

    fn step(
        &self,
        token: &str,
        visiting: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) -> Result<String> {
        if self.types.contains(token) {
            trace!(token, "Terminal type");
            return Ok(token.to_owned());
        }

        if visiting.contains(token) {
            let cycle_start = path.iter().position(|t| t == token).unwrap_or(0);

            let mut chain: Vec<String> = path[cycle_start..].to_vec();
            chain.push(token.to_owned());

            warn!(cycle = ?chain, "Alias cycle detected!");

            return Err(BinderError::AliasCycle(AliasCycleError { chain }));
        }

        visiting.insert(token.to_owned());
        path.push(token.to_owned());

        if let Some(target) = self.aliases.get(token) {
            trace!(from = token, to = %target, "Following alias");
            return self.step(target, visiting, path);
        }

        if let Some(binding) = self.bindings.get(token) {
            // A binding alias stands for its interface side.
            trace!(from = token, to = %binding.interface, "Following binding");
            return self.step(&binding.interface, visiting, path);
        }

        Err(BinderError::UnknownAlias(UnknownAliasError {
            token: token.to_owned(),
            chain: path.clone(),
            suggestions: self.find_suggestions(token),
        }))
    }

    /// Finds declared keys and alias targets close to the failed token
    /// (for "did you mean?" suggestions).
    fn find_suggestions(&self, token: &str) -> Vec<String> {
        let known: Vec<&str> = self
            .aliases
            .keys()
            .chain(self.aliases.values())
            .chain(self.bindings.keys())
            .map(String::as_str)
            .filter(|name| *name != token)
            .collect();

        suggest_similar(token, &known, 3)
    }
}
