//! Error types for binder operations.
//!
//! Configuration mistakes surface synchronously at the offending call,
//! with enough context to fix them without a debugger.

use std::fmt;

use rabita_support::rendering::render_chain;

/// Main error type for all binder operations.
#[derive(Debug, thiserror::Error)]
pub enum BinderError {
    /// Alias argument is not a usable key.
    #[error("The alias [{alias}] is invalid. Aliases must be non-empty strings")]
    InvalidAlias { alias: String },

    /// A token could not be resolved to a known class or interface.
    #[error("{}", .0)]
    UnknownAlias(UnknownAliasError),

    /// A needs-list references a dependency alias with no binding entry.
    #[error("{}", .0)]
    UnknownBinding(UnknownBindingError),

    /// `solidify()` invoked before any binding was declared.
    #[error("No binding to solidify. Declare one with set_binding() before calling solidify()")]
    NoPriorBinding,

    /// An alias chain loops back on itself.
    #[error("{}", .0)]
    AliasCycle(AliasCycleError),

    /// The host container failed to produce an instance.
    ///
    /// Raised by [`Factory`](crate::host::Factory) implementations,
    /// never by the binder itself.
    #[error("Failed to produce {fqn}: {source}")]
    MakeFailed {
        fqn: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Error when a token never reaches a known class or interface.
#[derive(Debug)]
pub struct UnknownAliasError {
    /// The token that failed to resolve
    pub token: String,
    /// The lookup chain walked from the root token
    pub chain: Vec<String>,
    /// Similar keys that ARE declared (for "did you mean?" suggestions)
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnknownAliasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The class or alias [{}] does not exist", self.token)?;

        if self.chain.len() > 1 {
            write!(f, "\n  Reached via: {}", render_chain(&self.chain))?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: Did you forget to call set_alias(\"{}\", ..)?",
            self.token
        )
    }
}

/// Error when a needs-list names a dependency that was never bound.
#[derive(Debug)]
pub struct UnknownBindingError {
    /// The requester whose needs-list triggered the lookup
    pub requester: String,
    /// The dependency alias with no binding entry
    pub dependency: String,
}

impl fmt::Display for UnknownBindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No binding declared for dependency [{}]",
            self.dependency
        )?;
        write!(f, "\n  Required by: {}", self.requester)?;
        write!(
            f,
            "\n  Hint: Did you forget to call set_binding(\"{}\", ..)?",
            self.dependency
        )
    }
}

/// Error when alias resolution loops back on itself.
///
/// Shows the full chain so you can see WHERE the cycle is.
#[derive(Debug)]
pub struct AliasCycleError {
    /// The chain of tokens that forms the cycle.
    /// Example: ["a", "b", "a"]
    pub chain: Vec<String>,
}

impl fmt::Display for AliasCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alias cycle detected:\n  ")?;
        write!(f, "{}", render_chain(&self.chain))?;
        write!(
            f,
            "\n  Hint: Point one of these aliases at a real class or interface"
        )
    }
}

/// Convenient Result type for binder operations.
pub type Result<T> = std::result::Result<T, BinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_alias_display() {
        let err = BinderError::InvalidAlias { alias: String::new() };
        let msg = format!("{err}");
        assert!(msg.contains("invalid"));
        assert!(msg.contains("non-empty"));
    }

    #[test]
    fn unknown_alias_error_display() {
        let err = BinderError::UnknownAlias(UnknownAliasError {
            token: "app::NotThere".into(),
            chain: vec!["reports".into(), "app::NotThere".into()],
            suggestions: vec!["report".into()],
        });

        let msg = format!("{err}");
        assert!(msg.contains("does not exist"));
        assert!(msg.contains("app::NotThere"));
        assert!(msg.contains("reports → app::NotThere"));
        assert!(msg.contains("Did you mean"));
    }

    #[test]
    fn unknown_alias_short_chain_has_no_via_line() {
        let err = UnknownAliasError {
            token: "ghost".into(),
            chain: vec!["ghost".into()],
            suggestions: vec![],
        };

        let msg = format!("{err}");
        assert!(!msg.contains("Reached via"));
        assert!(!msg.contains("Did you mean"));
    }

    #[test]
    fn unknown_binding_error_display() {
        let err = BinderError::UnknownBinding(UnknownBindingError {
            requester: "reports".into(),
            dependency: "redis".into(),
        });

        let msg = format!("{err}");
        assert!(msg.contains("No binding declared"));
        assert!(msg.contains("redis"));
        assert!(msg.contains("Required by: reports"));
    }

    #[test]
    fn make_failed_display_includes_source() {
        let err = BinderError::MakeFailed {
            fqn: "app::contracts::Cache".into(),
            source: "connection refused".into(),
        };

        let msg = format!("{err}");
        assert!(msg.contains("app::contracts::Cache"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn alias_cycle_error_display() {
        let err = BinderError::AliasCycle(AliasCycleError {
            chain: vec!["a".into(), "b".into(), "a".into()],
        });

        let msg = format!("{err}");
        assert!(msg.contains("cycle"));
        assert!(msg.contains("a → b → a"));
    }
}
