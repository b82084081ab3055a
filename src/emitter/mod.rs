//! # Emitter Module
//!
//! The top-level analysis pass. One [`SchemaEmitter::run`] call per pass:
//! first every registered model is reflected into a Definition annotation,
//! then every discovered live route is reconciled against its controller's
//! declarations and materialized into an operation annotation. Models go
//! first because controller operations may reference model definitions by
//! name.
//!
//! The emitter owns nothing long-lived: registries are built once per run
//! and passed in, the live route table and schema introspector come from
//! the external routing and database collaborators, and results accumulate
//! on the caller's [`Analysis`].

mod analysis;

pub use analysis::{Analysis, AnnotationRecord};

use crate::annotation::{AnnotationNode, AnnotationObject, Context};
use crate::error::EmitterError;
use crate::matcher::resolve_route;
use crate::registry::{ControllerRegistry, ModelRegistry, SchemaIntrospector};
use http::Method;
use std::sync::Arc;
use tracing::{debug, info};

/// One route discovered from the live routing table
///
/// The routing collaborator supplies these; `name` is the route's declared
/// name (absent for anonymous routes) and `controller` the controller
/// reference derived from the route's handler.
#[derive(Debug, Clone)]
pub struct LiveRoute {
    pub method: Method,
    pub uri: String,
    pub name: Option<String>,
    pub controller: Option<String>,
}

impl LiveRoute {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        LiveRoute {
            method,
            uri: uri.into(),
            name: None,
            controller: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }
}

/// Drives one schema-emission pass over models and routes
pub struct SchemaEmitter {
    models: ModelRegistry,
    controllers: ControllerRegistry,
}

impl SchemaEmitter {
    #[must_use]
    pub fn new(models: ModelRegistry, controllers: ControllerRegistry) -> Self {
        SchemaEmitter {
            models,
            controllers,
        }
    }

    #[must_use]
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Run one full analysis pass
    ///
    /// # Errors
    ///
    /// Propagates [`EmitterError::MissingBinding`] and
    /// [`EmitterError::InvalidRouteEntry`] from the controller pass; both
    /// indicate a bug in the static declarations and abort the pass.
    pub fn run(
        &self,
        routes: &[LiveRoute],
        schema: &dyn SchemaIntrospector,
        analysis: &mut Analysis,
    ) -> Result<(), EmitterError> {
        info!(
            models = self.models.len(),
            controllers = self.controllers.len(),
            routes = routes.len(),
            "schema emission pass started"
        );
        self.emit_models(schema, analysis);
        self.emit_controllers(routes, analysis)?;
        info!(annotations = analysis.len(), "schema emission pass complete");
        Ok(())
    }

    /// Reflect every registered model into a Definition annotation
    ///
    /// Columns minus hidden columns become string-typed properties;
    /// eager-load relations become reference-typed properties pointing at
    /// the related model's definition.
    fn emit_models(&self, schema: &dyn SchemaIntrospector, analysis: &mut Analysis) {
        for model in self.models.iter() {
            let hidden = model.hidden();
            let columns: Vec<String> = schema
                .column_listing(model.table())
                .into_iter()
                .filter(|column| !hidden.contains(column))
                .collect();

            let mut properties = Vec::with_capacity(columns.len());
            for column in &columns {
                properties.push(AnnotationNode::Object(
                    AnnotationObject::new("property")
                        .with_field("property", AnnotationNode::text(column))
                        .with_field("type", AnnotationNode::text("string")),
                ));
            }
            let relations = model.relations();
            for relation in &relations {
                properties.push(AnnotationNode::Object(
                    AnnotationObject::new("property")
                        .with_field("property", AnnotationNode::text(&relation.name))
                        .with_field(
                            "ref",
                            AnnotationNode::text(format!("#/definitions/{}", relation.related)),
                        ),
                ));
            }

            let definition = AnnotationObject::new("definition")
                .with_field("definition", AnnotationNode::text(model.name()))
                .with_field("properties", AnnotationNode::Seq(properties));

            info!(
                model = model.name(),
                columns = columns.len(),
                relations = relations.len(),
                "model definition emitted"
            );
            analysis.add_annotation(definition, Arc::new(Context::root(model.name())));
        }
    }

    /// Reconcile live routes against controller declarations and emit one
    /// operation annotation per matched route
    fn emit_controllers(
        &self,
        routes: &[LiveRoute],
        analysis: &mut Analysis,
    ) -> Result<(), EmitterError> {
        for route in routes {
            let Some(controller_name) = route.controller.as_deref() else {
                debug!(uri = %route.uri, "route has no controller reference, skipping");
                continue;
            };
            let Some(decl) = self.controllers.get(controller_name) else {
                debug!(
                    uri = %route.uri,
                    controller = controller_name,
                    "controller has no declarations, skipping"
                );
                continue;
            };

            let matched = resolve_route(
                decl.route_map(),
                route.name.as_deref(),
                decl.binder_factory(),
            )?;
            let Some(mut binder) = matched else {
                continue;
            };

            binder.handle(decl, &self.models)?;
            binder
                .template_mut()
                .set_extra("path", AnnotationNode::text(&route.uri));

            let ctx = Arc::new(Context::root(controller_name));
            let operation = binder.into_template().materialize(&ctx);
            info!(
                controller = controller_name,
                method = %route.method,
                uri = %route.uri,
                "operation emitted"
            );
            analysis.add_annotation(operation, ctx);
        }
        Ok(())
    }
}
