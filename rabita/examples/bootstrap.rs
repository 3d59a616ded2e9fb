//! Bootstrap example: wiring a toy IoC container through the binder.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use rabita::prelude::*;

// === A minimal host container ===
//
// Real applications adapt their framework's container here. This one keeps
// name-based rules in maps and "instantiates" by returning the resolved
// type name, which is enough to watch the binder at work.

#[derive(Default)]
struct MiniContainer {
    direct: HashMap<String, String>,
    factories: HashMap<String, BindingFactory>,
    contextual: Vec<(String, String, String)>,
}

impl HostContainer for MiniContainer {
    fn bind(&mut self, name: &str, target: &str) {
        self.direct.insert(name.to_owned(), target.to_owned());
    }

    fn bind_factory(&mut self, name: &str, factory: BindingFactory) {
        self.factories.insert(name.to_owned(), factory);
    }

    fn bind_contextual(&mut self, consumer: &str, dependency: &str, implementation: &str) {
        self.contextual.push((
            consumer.to_owned(),
            dependency.to_owned(),
            implementation.to_owned(),
        ));
    }
}

impl Factory for MiniContainer {
    fn make(&self, fqn: &str) -> Result<Box<dyn Any + Send + Sync>> {
        // Follow direct binds until the name bottoms out.
        let mut name = fqn.to_owned();
        while let Some(target) = self.direct.get(&name) {
            name = target.clone();
        }
        Ok(Box::new(name))
    }
}

fn main() -> Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter("rabita_binder=debug")
        .init();

    let types = Arc::new(
        StaticTypeSource::new()
            .with("app::http::ReportController")
            .with("app::http::InvoiceController")
            .with("app::contracts::Cache")
            .with("app::cache::RedisCache")
            .with("app::cache::MemoryCache"),
    );

    let mut container = MiniContainer::default();

    let mut binder = Binder::new(&mut container, types);
    binder.set_alias("reports", "app::http::ReportController")?;
    binder.set_alias("invoices", "app::http::InvoiceController")?;
    binder.set_alias("cache", "app::contracts::Cache")?;
    binder.set_binding("redis", "cache", "app::cache::RedisCache")?;
    binder.set_binding("memory", "cache", "app::cache::MemoryCache")?;
    binder.set_needs("reports", ["redis"])?;
    binder.set_needs("invoices", ["memory"])?;
    binder.register()?;
    binder.solidify()?;
    drop(binder);

    println!("Contextual rules:");
    for (consumer, dependency, implementation) in &container.contextual {
        println!("  when {consumer} needs {dependency} give {implementation}");
    }

    // The last binding was solidified, so the short alias "memory" now
    // resolves through the container: memory -> cache -> MemoryCache.
    let factory = container
        .factories
        .get("memory")
        .cloned()
        .expect("alias was solidified");
    let produced = factory(&container)?
        .downcast::<String>()
        .expect("MiniContainer makes type names");

    println!("make(\"memory\") -> {produced}");
    Ok(())
}
