//! # swaggen
//!
//! **swaggen** is an annotation-driven Swagger schema emitter: it turns
//! statically declared controller and model annotations into schema
//! annotation objects by resolving cross-references between them at
//! analysis time.
//!
//! ## Overview
//!
//! An upstream annotation parser (out of scope here) turns source comments
//! into annotation trees. Those trees are parameterized with `{{id}}`
//! placeholder tokens whose concrete values only exist at analysis time -
//! a controller's summary string, the model a response references, a route's
//! resolved URI. swaggen's job is the binding and reconciliation layer on
//! top:
//!
//! - index every placeholder occurrence in a declared template, including
//!   repeated occurrences of one token inside larger literals;
//! - resolve each token against the declaring controller's values and
//!   normalize model names into `#/definitions/...` references;
//! - bind resolved values back into the tree, substituting into surrounding
//!   literal text or replacing whole fields type-preservingly as
//!   appropriate;
//! - reconcile the statically declared route map against the live route
//!   table by anchored suffix matching, first declared pattern winning;
//! - materialize each bound template into a context-stamped annotation
//!   object and attach it to the analysis result.
//!
//! ## Architecture
//!
//! - **[`annotation`]** - the annotation tree model: nodes, objects,
//!   provenance contexts, and addressable paths
//! - **[`template`]** - placeholder indexing and verb-tagged method
//!   templates
//! - **[`resolver`]** - controller value lookup and model-reference
//!   normalization
//! - **[`binder`]** - drives resolution across a template's keys and
//!   rejects unresolvable placeholders
//! - **[`matcher`]** - suffix-pattern reconciliation of declared route maps
//!   against live route names
//! - **[`registry`]** - per-run controller and model registries plus the
//!   ORM/database collaborator traits
//! - **[`emitter`]** - the top-level analysis pass producing Definition and
//!   operation annotations
//!
//! ## Quick Start
//!
//! ```no_run
//! use swaggen::annotation::AnnotationNode;
//! use swaggen::emitter::{Analysis, LiveRoute, SchemaEmitter};
//! use swaggen::matcher::RouteTarget;
//! use swaggen::registry::{ControllerDecl, ControllerRegistry, ModelRegistry};
//! use swaggen::template::MethodTemplate;
//! use http::Method;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), swaggen::EmitterError> {
//! # struct Db;
//! # impl swaggen::registry::SchemaIntrospector for Db {
//! #     fn column_listing(&self, _: &str) -> Vec<String> { vec![] }
//! # }
//! let template = MethodTemplate::get(AnnotationNode::from(json!({
//!     "summary": "{{summary}}",
//!     "responses": { "200": { "schema": "{{model}}" } },
//! })))?;
//!
//! let mut controllers = ControllerRegistry::new();
//! controllers.register(
//!     ControllerDecl::new("WidgetController")
//!         .with_value("summary", "List widgets")
//!         .with_value("model", "Widget")
//!         .with_route("widgets.index", RouteTarget::Template(template)),
//! );
//!
//! let routes = vec![LiveRoute::new(Method::GET, "/widgets")
//!     .named("api.widgets.index")
//!     .controller("WidgetController")];
//!
//! let emitter = SchemaEmitter::new(ModelRegistry::new(), controllers);
//! let mut analysis = Analysis::new();
//! emitter.run(&routes, &Db, &mut analysis)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Model
//!
//! Declarations are static, so every failure here is a declaration bug:
//! an unresolvable placeholder ([`EmitterError::MissingBinding`]), an empty
//! template declaration ([`EmitterError::InvalidConfiguration`]), or a
//! route-map entry that is neither template nor binder
//! ([`EmitterError::InvalidRouteEntry`]). Nothing is retried and partial
//! binds are not rolled back.

pub mod annotation;
pub mod binder;
pub mod emitter;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod resolver;
pub mod template;

pub use annotation::{AnnotationNode, AnnotationObject, Context};
pub use binder::DynamicBinder;
pub use emitter::{Analysis, AnnotationRecord, LiveRoute, SchemaEmitter};
pub use error::EmitterError;
pub use matcher::{resolve_route, BinderFactory, RouteRule, RouteTarget};
pub use registry::{
    ControllerDecl, ControllerRegistry, ModelRegistry, ModelSource, Relation, SchemaIntrospector,
};
pub use resolver::{ValueMap, ValueResolver, ValueSource};
pub use template::{MethodTemplate, PlaceholderIndex};
