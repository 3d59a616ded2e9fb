//! The host container seam.
//!
//! The binder never talks to a concrete IoC implementation. It is written
//! against the three capabilities below, so it can be exercised with a
//! recording mock in tests and bolted onto any real container at the edge.
//!
//! Separated from [`Binder`](crate::binder::Binder) to keep the registry
//! pure: no runtime reflection, no global state, just trait calls.

use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;

/// Type alias for factory-backed bindings.
///
/// A factory receives the host's make-capability (to build further names)
/// and returns a type-erased instance or an error.
///
/// # Why `Arc` and not `Box`?
/// Factories are handed to the host container, which may be `Send + Sync`
/// and clone them across resolution sites.
pub type BindingFactory =
    Arc<dyn Fn(&dyn Factory) -> Result<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// The make-capability handed to [`BindingFactory`] closures.
///
/// This is the narrow slice of the host container a factory may touch:
/// produce an instance for a fully qualified name.
pub trait Factory {
    fn make(&self, fqn: &str) -> Result<Box<dyn Any + Send + Sync>>;
}

/// The host dependency-injection container, reduced to what the binder needs.
///
/// # Contract
/// `register()` and `solidify()` may be invoked more than once and will
/// re-issue their instructions each time. Implementations must treat a
/// redundant re-registration as an overwrite, not an error.
pub trait HostContainer {
    /// Register a direct resolution rule: `name` resolves to the type
    /// named `target`.
    fn bind(&mut self, name: &str, target: &str);

    /// Register a factory-backed resolution rule for `name`.
    fn bind_factory(&mut self, name: &str, factory: BindingFactory);

    /// Register a contextual override: while constructing `consumer`,
    /// `dependency` resolves to `implementation` instead of its default.
    fn bind_contextual(&mut self, consumer: &str, dependency: &str, implementation: &str);

    /// Start a fluent contextual rule: `when(consumer).needs(dep).give(impl)`.
    fn when(&mut self, consumer: &str) -> ContextualBuilder<'_, Self>
    where
        Self: Sized,
    {
        ContextualBuilder {
            container: self,
            consumer: consumer.to_owned(),
        }
    }
}

// Lets the binder borrow an application-owned container for the
// duration of the bootstrap phase.
impl<T: HostContainer> HostContainer for &mut T {
    fn bind(&mut self, name: &str, target: &str) {
        (**self).bind(name, target);
    }

    fn bind_factory(&mut self, name: &str, factory: BindingFactory) {
        (**self).bind_factory(name, factory);
    }

    fn bind_contextual(&mut self, consumer: &str, dependency: &str, implementation: &str) {
        (**self).bind_contextual(consumer, dependency, implementation);
    }
}

/// First stage of the fluent contextual rule. See [`HostContainer::when`].
pub struct ContextualBuilder<'a, C> {
    container: &'a mut C,
    consumer: String,
}

impl<'a, C: HostContainer> ContextualBuilder<'a, C> {
    /// Name the dependency being overridden for this consumer.
    pub fn needs(self, dependency: &str) -> ContextualNeeds<'a, C> {
        ContextualNeeds {
            container: self.container,
            consumer: self.consumer,
            dependency: dependency.to_owned(),
        }
    }
}

/// Second stage of the fluent contextual rule.
pub struct ContextualNeeds<'a, C> {
    container: &'a mut C,
    consumer: String,
    dependency: String,
}

impl<C: HostContainer> ContextualNeeds<'_, C> {
    /// Commit the rule to the container.
    pub fn give(self, implementation: &str) {
        self.container
            .bind_contextual(&self.consumer, &self.dependency, implementation);
    }
}

/// The existence-check capability used during alias resolution.
///
/// Answers "does this fully qualified name refer to a class or interface
/// the host runtime can construct?". Injected so the binder stays testable
/// without a real container behind it.
pub trait TypeSource: Send + Sync {
    fn contains(&self, fqn: &str) -> bool;
}

/// A fixed universe of known type names.
///
/// The obvious [`TypeSource`] for hosts that know their full type set up
/// front, and for tests.
///
/// # Examples
/// ```
/// use rabita_binder::host::{StaticTypeSource, TypeSource};
///
/// let types = StaticTypeSource::new()
///     .with("app::contracts::Cache")
///     .with("app::cache::RedisCache");
///
/// assert!(types.contains("app::contracts::Cache"));
/// assert!(!types.contains("app::contracts::Queue"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticTypeSource {
    types: HashSet<String>,
}

impl StaticTypeSource {
    /// Creates an empty type universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a known type name, builder style.
    pub fn with(mut self, fqn: impl Into<String>) -> Self {
        self.types.insert(fqn.into());
        self
    }

    /// Adds a known type name in place.
    pub fn insert(&mut self, fqn: impl Into<String>) {
        self.types.insert(fqn.into());
    }
}

impl TypeSource for StaticTypeSource {
    fn contains(&self, fqn: &str) -> bool {
        self.types.contains(fqn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock container for exercising the fluent builder
    #[derive(Default)]
    struct MockContainer {
        binds: Vec<(String, String)>,
        factory_count: usize,
        contextual: Vec<(String, String, String)>,
    }

    impl HostContainer for MockContainer {
        fn bind(&mut self, name: &str, target: &str) {
            self.binds.push((name.to_owned(), target.to_owned()));
        }

        fn bind_factory(&mut self, _name: &str, _factory: BindingFactory) {
            self.factory_count += 1;
        }

        fn bind_contextual(&mut self, consumer: &str, dependency: &str, implementation: &str) {
            self.contextual.push((
                consumer.to_owned(),
                dependency.to_owned(),
                implementation.to_owned(),
            ));
        }
    }

    #[test]
    fn fluent_rule_forwards_to_bind_contextual() {
        let mut container = MockContainer::default();

        container
            .when("app::http::ReportController")
            .needs("app::contracts::Cache")
            .give("app::cache::RedisCache");

        assert_eq!(
            container.contextual,
            vec![(
                "app::http::ReportController".to_owned(),
                "app::contracts::Cache".to_owned(),
                "app::cache::RedisCache".to_owned(),
            )]
        );
    }

    #[test]
    fn fluent_rule_through_mut_reference() {
        let mut container = MockContainer::default();
        let mut borrowed = &mut container;

        borrowed.when("consumer").needs("dep").give("impl");
        borrowed.bind("name", "target");

        assert_eq!(container.contextual.len(), 1);
        assert_eq!(container.binds.len(), 1);
    }

    #[test]
    fn static_type_source_builder() {
        let types = StaticTypeSource::new()
            .with("app::A")
            .with("app::B");

        assert!(types.contains("app::A"));
        assert!(types.contains("app::B"));
        assert!(!types.contains("app::C"));
    }

    #[test]
    fn static_type_source_insert() {
        let mut types = StaticTypeSource::new();
        assert!(!types.contains("app::A"));

        types.insert("app::A");
        assert!(types.contains("app::A"));
    }
}
