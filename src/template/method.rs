use super::index::PlaceholderIndex;
use crate::annotation::{AnnotationNode, AnnotationObject, Context};
use crate::error::EmitterError;
use http::Method;
use std::sync::Arc;
use tracing::debug;

/// A reusable annotation-tree template for one HTTP verb
///
/// Owns its data tree and the placeholder index built over it at
/// construction. Declared once per controller route map, cloned per route
/// match, mutated by bind operations during schema emission, and finally
/// materialized into a verb-tagged annotation object.
#[derive(Debug, Clone)]
pub struct MethodTemplate {
    verb: Method,
    data: AnnotationNode,
    index: PlaceholderIndex,
    /// Out-of-band fields attached after matching (e.g. the resolved
    /// `path`), merged into the materialized object after the data fields.
    extra: Vec<(String, AnnotationNode)>,
}

impl MethodTemplate {
    /// Declare a template over a non-empty data mapping
    ///
    /// # Errors
    ///
    /// Returns [`EmitterError::InvalidConfiguration`] when `data` is not a
    /// mapping or is empty - a declaration with nothing to emit is a
    /// programming error in the static route declarations.
    pub fn new(verb: Method, data: impl Into<AnnotationNode>) -> Result<Self, EmitterError> {
        let data = data.into();
        match &data {
            AnnotationNode::Map(entries) if !entries.is_empty() => {}
            _ => {
                return Err(EmitterError::InvalidConfiguration {
                    reason: format!("{verb} method declared with no data"),
                })
            }
        }
        let index = PlaceholderIndex::build(&data);
        debug!(verb = %verb, keys = ?index.keys(), "method template declared");
        Ok(MethodTemplate {
            verb,
            data,
            index,
            extra: Vec::new(),
        })
    }

    /// Declare a GET template
    pub fn get(data: impl Into<AnnotationNode>) -> Result<Self, EmitterError> {
        Self::new(Method::GET, data)
    }

    /// Declare a POST template
    pub fn post(data: impl Into<AnnotationNode>) -> Result<Self, EmitterError> {
        Self::new(Method::POST, data)
    }

    /// Declare a PUT template
    pub fn put(data: impl Into<AnnotationNode>) -> Result<Self, EmitterError> {
        Self::new(Method::PUT, data)
    }

    /// Declare a DELETE template
    pub fn delete(data: impl Into<AnnotationNode>) -> Result<Self, EmitterError> {
        Self::new(Method::DELETE, data)
    }

    #[must_use]
    pub fn verb(&self) -> &Method {
        &self.verb
    }

    /// The template's data tree
    #[must_use]
    pub fn data(&self) -> &AnnotationNode {
        &self.data
    }

    /// All placeholder ids, in first-discovery order
    #[must_use]
    pub fn keys(&self) -> &[String] {
        self.index.keys()
    }

    /// Bind `value` into every location of placeholder `key`
    pub fn set(&mut self, key: &str, value: AnnotationNode) {
        self.index.bind(&mut self.data, key, &value);
    }

    /// Read an out-of-band extra-data field
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&AnnotationNode> {
        self.extra.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Set an out-of-band extra-data field, replacing any previous value
    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<AnnotationNode>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.extra.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.extra.push((key, value));
        }
    }

    /// Materialize the bound template into a verb-tagged annotation object
    ///
    /// Every nested annotation object in the data tree is first stamped with
    /// a child context `{nested: true, owner}` chained to the context above
    /// it, its own descendants recursing under that child context - the
    /// resulting chain mirrors the tree's nesting depth. The returned object
    /// carries the data fields followed by the extra-data fields.
    #[must_use]
    pub fn materialize(mut self, outer: &Arc<Context>) -> AnnotationObject {
        stamp_contexts(&mut self.data, outer);
        let mut object = AnnotationObject::new(self.verb.as_str().to_ascii_lowercase());
        if let AnnotationNode::Map(entries) = self.data {
            for (key, value) in entries {
                object.set_field(key, value);
            }
        }
        for (key, value) in self.extra {
            object.set_field(key, value);
        }
        object
    }
}

/// Attach a freshly chained child context to every nested annotation object
fn stamp_contexts(node: &mut AnnotationNode, ctx: &Arc<Context>) {
    match node {
        AnnotationNode::Seq(items) => {
            for item in items {
                stamp_contexts(item, ctx);
            }
        }
        AnnotationNode::Map(entries) => {
            for (_, value) in entries {
                stamp_contexts(value, ctx);
            }
        }
        AnnotationNode::Object(obj) => {
            let child = Arc::new(Context::nested(ctx));
            obj.set_context(Arc::clone(&child));
            for (_, value) in obj.fields_mut() {
                stamp_contexts(value, &child);
            }
        }
        _ => {}
    }
}
