use super::node::AnnotationNode;
use serde_json::Value;
use std::sync::Arc;

/// Provenance record attached to annotation objects
///
/// Contexts chain upward to the context of the enclosing declaration, so a
/// nested annotation can report where it came from. The chain mirrors the
/// nesting depth of the annotation tree it was stamped onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Whether this context belongs to a nested annotation
    pub nested: bool,
    /// The declaring controller or model name
    pub owner: String,
    /// The enclosing context, absent on roots
    pub parent: Option<Arc<Context>>,
}

impl Context {
    /// Root context for a controller or model declaration
    pub fn root(owner: impl Into<String>) -> Self {
        Context {
            nested: false,
            owner: owner.into(),
            parent: None,
        }
    }

    /// Child context for an annotation nested under `parent`
    ///
    /// The owner is inherited; `nested` is always set.
    #[must_use]
    pub fn nested(parent: &Arc<Context>) -> Self {
        Context {
            nested: true,
            owner: parent.owner.clone(),
            parent: Some(Arc::clone(parent)),
        }
    }

    /// Number of ancestors above this context
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.as_deref();
        while let Some(ctx) = current {
            depth += 1;
            current = ctx.parent.as_deref();
        }
        depth
    }
}

/// An opaque annotation object: a type tag plus named fields
///
/// The tag identifies the annotation kind (`definition`, `property`, or a
/// lowercased HTTP verb for operations). Fields preserve declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationObject {
    tag: String,
    fields: Vec<(String, AnnotationNode)>,
    context: Option<Arc<Context>>,
}

impl AnnotationObject {
    pub fn new(tag: impl Into<String>) -> Self {
        AnnotationObject {
            tag: tag.into(),
            fields: Vec::new(),
            context: None,
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set a named field, replacing any previous value under the same name
    pub fn set_field(&mut self, name: impl Into<String>, value: AnnotationNode) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Builder-style variant of [`set_field`](Self::set_field)
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: AnnotationNode) -> Self {
        self.set_field(name, value);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&AnnotationNode> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut AnnotationNode> {
        self.fields
            .iter_mut()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Named fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[(String, AnnotationNode)] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [(String, AnnotationNode)] {
        &mut self.fields
    }

    #[must_use]
    pub fn context(&self) -> Option<&Arc<Context>> {
        self.context.as_ref()
    }

    pub fn set_context(&mut self, context: Arc<Context>) {
        self.context = Some(context);
    }

    /// Flatten to a JSON object of the named fields
    ///
    /// The context back-reference is an observer only and never serialized.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}
