mod common;

use common::{TestModel, TestSchema};
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use swaggen::annotation::AnnotationNode;
use swaggen::emitter::{Analysis, LiveRoute, SchemaEmitter};
use swaggen::matcher::RouteTarget;
use swaggen::registry::{ControllerDecl, ControllerRegistry, ModelRegistry};
use swaggen::template::MethodTemplate;
use swaggen::EmitterError;

fn template(data: serde_json::Value) -> MethodTemplate {
    MethodTemplate::get(AnnotationNode::from(data)).unwrap()
}

fn widget_schema() -> TestSchema {
    TestSchema::new()
        .table("widgets", &["id", "name", "secret"])
        .table("owners", &["id", "email"])
}

#[test]
fn test_models_without_relations() {
    let mut models = ModelRegistry::new();
    models.register(Arc::new(
        TestModel::new("Widget", "widgets").hidden(&["secret"]),
    ));
    let emitter = SchemaEmitter::new(models, ControllerRegistry::new());

    let mut analysis = Analysis::new();
    emitter.run(&[], &widget_schema(), &mut analysis).unwrap();

    let definitions: Vec<_> = analysis.definitions().collect();
    assert_eq!(definitions.len(), 1);
    assert_eq!(
        definitions[0].to_json(),
        json!({
            "definition": "Widget",
            "properties": [
                { "property": "id", "type": "string" },
                { "property": "name", "type": "string" }
            ]
        })
    );
}

#[test]
fn test_model_with_eager_relation() {
    let mut models = ModelRegistry::new();
    models.register(Arc::new(
        TestModel::new("Widget", "widgets")
            .hidden(&["secret"])
            .relation("owner", "Owner"),
    ));
    models.register(Arc::new(TestModel::new("Owner", "owners")));
    let emitter = SchemaEmitter::new(models, ControllerRegistry::new());

    let mut analysis = Analysis::new();
    emitter.run(&[], &widget_schema(), &mut analysis).unwrap();

    let widget = analysis
        .definitions()
        .find(|d| {
            d.field("definition").and_then(AnnotationNode::as_text) == Some("Widget")
        })
        .expect("Widget definition emitted");
    assert_eq!(
        widget.to_json(),
        json!({
            "definition": "Widget",
            "properties": [
                { "property": "id", "type": "string" },
                { "property": "name", "type": "string" },
                { "property": "owner", "ref": "#/definitions/Owner" }
            ]
        })
    );
}

#[test]
fn test_full_pass_emits_models_then_operations() {
    common::init_tracing();
    let mut models = ModelRegistry::new();
    models.register(Arc::new(
        TestModel::new("Widget", "widgets").hidden(&["secret"]),
    ));

    let mut controllers = ControllerRegistry::new();
    controllers.register(
        ControllerDecl::new("WidgetController")
            .with_value("summary", "List widgets")
            .with_value("model", "Widget")
            .with_route(
                "widgets.index",
                RouteTarget::Template(template(json!({
                    "summary": "{{summary}}",
                    "responses": { "200": { "schema": "{{model}}" } }
                }))),
            ),
    );

    let routes = vec![
        LiveRoute::new(Method::GET, "/api/widgets")
            .named("api.widgets.index")
            .controller("WidgetController"),
        // Anonymous and undeclared routes are skipped without error.
        LiveRoute::new(Method::GET, "/health"),
        LiveRoute::new(Method::GET, "/api/gadgets")
            .named("api.gadgets.index")
            .controller("GadgetController"),
    ];

    let emitter = SchemaEmitter::new(models, controllers);
    let mut analysis = Analysis::new();
    emitter.run(&routes, &widget_schema(), &mut analysis).unwrap();

    assert_eq!(analysis.len(), 2);

    // Models come first so operations can reference them.
    let records = analysis.annotations();
    assert_eq!(records[0].annotation.tag(), "definition");

    let operation = &records[1].annotation;
    assert_eq!(operation.tag(), "get");
    assert_eq!(
        operation.to_json(),
        json!({
            "summary": "List widgets",
            "responses": { "200": { "schema": "#/definitions/Widget" } },
            "path": "/api/widgets"
        })
    );
    assert_eq!(records[1].context.owner, "WidgetController");
}

#[test]
fn test_missing_binding_aborts_the_pass() {
    let mut controllers = ControllerRegistry::new();
    controllers.register(
        ControllerDecl::new("WidgetController")
            .with_value("summary", "List widgets")
            .with_route(
                "widgets.index",
                RouteTarget::Template(template(json!({
                    "summary": "{{summary}}",
                    "tags": "{{tags}}"
                }))),
            ),
    );

    let routes = vec![LiveRoute::new(Method::GET, "/api/widgets")
        .named("api.widgets.index")
        .controller("WidgetController")];

    let emitter = SchemaEmitter::new(ModelRegistry::new(), controllers);
    let mut analysis = Analysis::new();
    let err = emitter
        .run(&routes, &TestSchema::new(), &mut analysis)
        .unwrap_err();

    assert_eq!(
        err,
        EmitterError::MissingBinding {
            key: "tags".to_string(),
            controller: "WidgetController".to_string(),
        }
    );
}

#[test]
fn test_route_without_name_is_skipped() {
    let mut controllers = ControllerRegistry::new();
    controllers.register(
        ControllerDecl::new("WidgetController")
            .with_value("summary", "s")
            .with_route(
                "widgets.index",
                RouteTarget::Template(template(json!({ "summary": "{{summary}}" }))),
            ),
    );

    let routes = vec![LiveRoute::new(Method::GET, "/api/widgets").controller("WidgetController")];

    let emitter = SchemaEmitter::new(ModelRegistry::new(), controllers);
    let mut analysis = Analysis::new();
    emitter.run(&routes, &TestSchema::new(), &mut analysis).unwrap();
    assert!(analysis.is_empty());
}

#[test]
fn test_prototype_templates_are_not_shared_across_matches() {
    // Two live routes match the same declared pattern; each match must bind
    // into its own clone of the prototype, not mutate shared state.
    let mut controllers = ControllerRegistry::new();
    controllers.register(
        ControllerDecl::new("WidgetController")
            .with_value("summary", "List widgets")
            .with_route(
                "index",
                RouteTarget::Template(template(json!({ "summary": "{{summary}}" }))),
            ),
    );

    let routes = vec![
        LiveRoute::new(Method::GET, "/api/widgets")
            .named("api.widgets.index")
            .controller("WidgetController"),
        LiveRoute::new(Method::GET, "/admin/widgets")
            .named("admin.widgets.index")
            .controller("WidgetController"),
    ];

    let emitter = SchemaEmitter::new(ModelRegistry::new(), controllers);
    let mut analysis = Analysis::new();
    emitter.run(&routes, &TestSchema::new(), &mut analysis).unwrap();

    let operations: Vec<_> = analysis.operations().collect();
    assert_eq!(operations.len(), 2);
    assert_eq!(
        operations[0].field("path").and_then(AnnotationNode::as_text),
        Some("/api/widgets")
    );
    assert_eq!(
        operations[1].field("path").and_then(AnnotationNode::as_text),
        Some("/admin/widgets")
    );
}

#[test]
fn test_invalid_route_entry_propagates() {
    let mut controllers = ControllerRegistry::new();
    controllers.register(ControllerDecl::new("WidgetController").with_route(
        "widgets.index",
        RouteTarget::Raw(AnnotationNode::text("unrecognized declaration")),
    ));

    let routes = vec![LiveRoute::new(Method::GET, "/api/widgets")
        .named("api.widgets.index")
        .controller("WidgetController")];

    let emitter = SchemaEmitter::new(ModelRegistry::new(), controllers);
    let mut analysis = Analysis::new();
    let err = emitter
        .run(&routes, &TestSchema::new(), &mut analysis)
        .unwrap_err();
    assert!(matches!(err, EmitterError::InvalidRouteEntry { .. }));
}
