use crate::annotation::{AnnotationObject, Context};
use std::sync::Arc;

/// One emitted annotation and the context it was attached under
#[derive(Debug, Clone)]
pub struct AnnotationRecord {
    pub annotation: AnnotationObject,
    pub context: Arc<Context>,
}

/// The accumulated result of an analysis pass
///
/// The emitter appends here; the surrounding scan driver serializes the
/// collected annotations into the final schema document.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    records: Vec<AnnotationRecord>,
}

impl Analysis {
    #[must_use]
    pub fn new() -> Self {
        Analysis::default()
    }

    /// Attach an annotation under `context`
    ///
    /// The annotation's own context back-reference is stamped with the same
    /// context when it has none yet.
    pub fn add_annotation(&mut self, mut annotation: AnnotationObject, context: Arc<Context>) {
        if annotation.context().is_none() {
            annotation.set_context(Arc::clone(&context));
        }
        self.records.push(AnnotationRecord {
            annotation,
            context,
        });
    }

    #[must_use]
    pub fn annotations(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// The emitted model definitions
    pub fn definitions(&self) -> impl Iterator<Item = &AnnotationObject> {
        self.records
            .iter()
            .map(|r| &r.annotation)
            .filter(|a| a.tag() == "definition")
    }

    /// The emitted controller operations
    pub fn operations(&self) -> impl Iterator<Item = &AnnotationObject> {
        self.records
            .iter()
            .map(|r| &r.annotation)
            .filter(|a| a.tag() != "definition")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
