//! Declaration registries threaded through an emission run.
//!
//! Controller metadata and registered models are explicit values, built once
//! per emission run and passed through the call chain rather than held as
//! process-wide state: a [`ControllerRegistry`] of per-controller
//! declarations and a [`ModelRegistry`] of the data models eligible for
//! definition emission and reference normalization.

use crate::annotation::AnnotationNode;
use crate::binder::DynamicBinder;
use crate::matcher::{BinderFactory, RouteRule, RouteTarget};
use crate::resolver::ValueSource;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A controller's static schema declarations
///
/// Carries everything the binding flow reads for one controller: the direct
/// placeholder values, the optional fallback values container, the ordered
/// route map, and the binder factory used to wrap matched templates.
#[derive(Clone)]
pub struct ControllerDecl {
    name: String,
    values: Vec<(String, AnnotationNode)>,
    values_container: Option<Arc<dyn ValueSource>>,
    route_map: Vec<RouteRule>,
    binder_factory: BinderFactory,
}

impl ControllerDecl {
    pub fn new(name: impl Into<String>) -> Self {
        ControllerDecl {
            name: name.into(),
            values: Vec::new(),
            values_container: None,
            route_map: Vec::new(),
            binder_factory: DynamicBinder::new,
        }
    }

    /// Declare a direct placeholder value
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<AnnotationNode>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    /// Attach the conventional values container consulted when no direct
    /// value exists for a key
    #[must_use]
    pub fn with_container(mut self, container: Arc<dyn ValueSource>) -> Self {
        self.values_container = Some(container);
        self
    }

    /// Append a route-map entry; declaration order is matching order
    #[must_use]
    pub fn with_route(mut self, pattern: impl Into<String>, target: RouteTarget) -> Self {
        self.route_map.push(RouteRule::new(pattern, target));
        self
    }

    /// Override the factory that wraps matched templates
    #[must_use]
    pub fn with_binder_factory(mut self, factory: BinderFactory) -> Self {
        self.binder_factory = factory;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&AnnotationNode> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn values_container(&self) -> Option<&dyn ValueSource> {
        self.values_container.as_deref()
    }

    #[must_use]
    pub fn route_map(&self) -> &[RouteRule] {
        &self.route_map
    }

    #[must_use]
    pub fn binder_factory(&self) -> BinderFactory {
        self.binder_factory
    }
}

impl std::fmt::Debug for ControllerDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerDecl")
            .field("name", &self.name)
            .field("values", &self.values.len())
            .field("has_container", &self.values_container.is_some())
            .field("routes", &self.route_map.len())
            .finish()
    }
}

/// Controller declarations for one emission run, keyed by controller name
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, ControllerDecl>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        ControllerRegistry::default()
    }

    pub fn register(&mut self, decl: ControllerDecl) {
        debug!(
            controller = decl.name(),
            routes = decl.route_map().len(),
            "controller registered"
        );
        self.controllers.insert(decl.name().to_string(), decl);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ControllerDecl> {
        self.controllers.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

/// An eager-load relation exposed by a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Accessor name on the owning model, used as the property name
    pub name: String,
    /// Fully-qualified related model name
    pub related: String,
}

impl Relation {
    pub fn new(name: impl Into<String>, related: impl Into<String>) -> Self {
        Relation {
            name: name.into(),
            related: related.into(),
        }
    }
}

/// ORM-side reflection over one registered data model
///
/// Implemented by the model layer; the emitter only reads names, table,
/// hidden columns, and eager-load relations.
pub trait ModelSource: Send + Sync {
    /// Fully-qualified model name, used as the definition name
    fn name(&self) -> &str;
    /// Backing table, handed to the schema introspector for columns
    fn table(&self) -> &str;
    /// Columns excluded from the emitted definition
    fn hidden(&self) -> Vec<String> {
        Vec::new()
    }
    /// Eager-load relations emitted as reference-typed properties
    fn relations(&self) -> Vec<Relation> {
        Vec::new()
    }
}

/// Database-side schema reflection
pub trait SchemaIntrospector {
    /// Column names of `table`, in schema order
    fn column_listing(&self, table: &str) -> Vec<String>;
}

/// The models registered for one emission run
///
/// Membership drives two behaviors: each member gets a Definition emitted,
/// and resolved string values naming a member are normalized into
/// `#/definitions/...` references.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: Vec<Arc<dyn ModelSource>>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        ModelRegistry::default()
    }

    pub fn register(&mut self, model: Arc<dyn ModelSource>) {
        debug!(model = model.name(), "model registered");
        self.models.push(model);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.models.iter().any(|m| m.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ModelSource>> {
        self.models.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.models.iter().map(|m| m.name()))
            .finish()
    }
}
