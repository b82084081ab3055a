//! Placeholder value resolution.
//!
//! Controllers declare the concrete values their templates reference, either
//! directly by key or through a shared values container registered on the
//! declaration (the container replaces the original convention of naming a
//! container class to instantiate). Resolved strings that name a registered
//! model are normalized into schema-reference form.

use crate::annotation::AnnotationNode;
use crate::registry::{ControllerDecl, ModelRegistry};
use tracing::trace;

/// A conventional values container attached to a controller declaration
///
/// Looked up only when the controller declares no direct value for a key.
pub trait ValueSource: Send + Sync {
    fn value(&self, key: &str) -> Option<AnnotationNode>;
}

/// An order-preserving key/value container, the common [`ValueSource`]
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
    entries: Vec<(String, AnnotationNode)>,
}

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        ValueMap::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnnotationNode>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }
}

impl ValueSource for ValueMap {
    fn value(&self, key: &str) -> Option<AnnotationNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

/// Resolves placeholder keys against controller declarations
///
/// Pure lookups; the only state is the registered-model set consulted by
/// [`normalize`](ValueResolver::normalize).
pub struct ValueResolver<'a> {
    models: &'a ModelRegistry,
}

impl<'a> ValueResolver<'a> {
    #[must_use]
    pub fn new(models: &'a ModelRegistry) -> Self {
        ValueResolver { models }
    }

    /// Look up `key` on a controller declaration
    ///
    /// Direct declared values win; the controller's values container is the
    /// fallback; anything else is absent.
    #[must_use]
    pub fn resolve(&self, controller: &ControllerDecl, key: &str) -> Option<AnnotationNode> {
        if let Some(value) = controller.value(key) {
            trace!(controller = controller.name(), key, "resolved direct value");
            return Some(value.clone());
        }
        if let Some(container) = controller.values_container() {
            if let Some(value) = container.value(key) {
                trace!(
                    controller = controller.name(),
                    key,
                    "resolved from values container"
                );
                return Some(value);
            }
        }
        None
    }

    /// Rewrite a string naming a registered model into a schema reference
    ///
    /// `"App\Models\Widget"` becomes `"#/definitions/App\Models\Widget"`
    /// when that model is registered; every other value passes through
    /// unchanged.
    #[must_use]
    pub fn normalize(&self, value: AnnotationNode) -> AnnotationNode {
        match value {
            AnnotationNode::Text(name) if self.models.contains(&name) => {
                AnnotationNode::Text(format!("#/definitions/{name}"))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests_support::StubModel;
    use std::sync::Arc;

    fn models() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register(Arc::new(StubModel::new("Widget", "widgets")));
        registry
    }

    #[test]
    fn test_direct_value_wins_over_container() {
        let decl = ControllerDecl::new("WidgetController")
            .with_value("summary", AnnotationNode::text("direct"))
            .with_container(Arc::new(
                ValueMap::new().with("summary", "from container"),
            ));
        let registry = models();
        let resolver = ValueResolver::new(&registry);
        assert_eq!(
            resolver.resolve(&decl, "summary"),
            Some(AnnotationNode::text("direct"))
        );
    }

    #[test]
    fn test_container_fallback() {
        let decl = ControllerDecl::new("WidgetController")
            .with_container(Arc::new(ValueMap::new().with("tags", "widgets")));
        let registry = models();
        let resolver = ValueResolver::new(&registry);
        assert_eq!(
            resolver.resolve(&decl, "tags"),
            Some(AnnotationNode::text("widgets"))
        );
        assert_eq!(resolver.resolve(&decl, "missing"), None);
    }

    #[test]
    fn test_normalize_registered_model() {
        let registry = models();
        let resolver = ValueResolver::new(&registry);
        assert_eq!(
            resolver.normalize(AnnotationNode::text("Widget")),
            AnnotationNode::text("#/definitions/Widget")
        );
    }

    #[test]
    fn test_normalize_passes_other_values_through() {
        let registry = models();
        let resolver = ValueResolver::new(&registry);
        assert_eq!(
            resolver.normalize(AnnotationNode::text("Gadget")),
            AnnotationNode::text("Gadget")
        );
        assert_eq!(
            resolver.normalize(AnnotationNode::Bool(true)),
            AnnotationNode::Bool(true)
        );
    }
}
