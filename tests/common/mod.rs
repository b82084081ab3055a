#![allow(dead_code)]

use std::sync::Once;
use swaggen::registry::{ModelSource, Relation, SchemaIntrospector};

static TRACING: Once = Once::new();

/// Install a fmt subscriber once per test binary; `RUST_LOG` controls level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// In-memory model used by integration tests
pub struct TestModel {
    name: String,
    table: String,
    hidden: Vec<String>,
    relations: Vec<Relation>,
}

impl TestModel {
    pub fn new(name: &str, table: &str) -> Self {
        TestModel {
            name: name.to_string(),
            table: table.to_string(),
            hidden: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn hidden(mut self, columns: &[&str]) -> Self {
        self.hidden = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn relation(mut self, name: &str, related: &str) -> Self {
        self.relations.push(Relation::new(name, related));
        self
    }
}

impl ModelSource for TestModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn hidden(&self) -> Vec<String> {
        self.hidden.clone()
    }

    fn relations(&self) -> Vec<Relation> {
        self.relations.clone()
    }
}

/// In-memory column listing keyed by table name
#[derive(Default)]
pub struct TestSchema {
    tables: Vec<(String, Vec<String>)>,
}

impl TestSchema {
    pub fn new() -> Self {
        TestSchema::default()
    }

    pub fn table(mut self, name: &str, columns: &[&str]) -> Self {
        self.tables.push((
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }
}

impl SchemaIntrospector for TestSchema {
    fn column_listing(&self, table: &str) -> Vec<String> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, columns)| columns.clone())
            .unwrap_or_default()
    }
}
