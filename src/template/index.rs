use crate::annotation::{AnnotationNode, NodePath, PathStep};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Matches every `{{id}}` token embedded in a text scalar, non-greedy so
/// adjacent tokens in one literal are extracted separately.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("token regex compiles"));

/// Index of placeholder token locations in one annotation tree
///
/// Built once over a template's data tree. For every distinct token id the
/// index records the path of every scalar containing it, accumulated across
/// sibling containers in depth-first pre-order. Paths are resolved against
/// the owning tree at bind time; the index holds no references into the tree
/// itself.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderIndex {
    locations: HashMap<String, Vec<NodePath>>,
    /// Distinct ids in first-discovery order; keeps `keys()` and error
    /// messages deterministic within a run.
    order: Vec<String>,
}

impl PlaceholderIndex {
    /// Walk `tree` and index every placeholder occurrence
    #[must_use]
    pub fn build(tree: &AnnotationNode) -> Self {
        let mut index = PlaceholderIndex::default();
        let mut path = Vec::new();
        index.walk(tree, &mut path);
        debug!(
            keys = index.order.len(),
            locations = index.locations.values().map(Vec::len).sum::<usize>(),
            "placeholder index built"
        );
        index
    }

    fn walk(&mut self, node: &AnnotationNode, path: &mut NodePath) {
        match node {
            AnnotationNode::Text(text) => {
                for captures in TOKEN_RE.captures_iter(text) {
                    if let Some(id) = captures.get(1) {
                        self.record(id.as_str(), path);
                    }
                }
            }
            AnnotationNode::Seq(items) => {
                for (idx, item) in items.iter().enumerate() {
                    path.push(PathStep::Index(idx));
                    self.walk(item, path);
                    path.pop();
                }
            }
            AnnotationNode::Map(entries) => {
                for (key, value) in entries {
                    path.push(PathStep::Key(key.clone()));
                    self.walk(value, path);
                    path.pop();
                }
            }
            AnnotationNode::Object(obj) => {
                for (field, value) in obj.fields() {
                    path.push(PathStep::Field(field.clone()));
                    self.walk(value, path);
                    path.pop();
                }
            }
            _ => {}
        }
    }

    fn record(&mut self, id: &str, path: &NodePath) {
        trace!(id, ?path, "placeholder occurrence");
        if !self.locations.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.locations
            .entry(id.to_string())
            .or_default()
            .push(path.clone());
    }

    /// All distinct indexed ids, in first-discovery order
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.order
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bind `value` into every location recorded under `id`
    ///
    /// A scalar that is exactly the bare token is replaced with `value`
    /// wholesale, preserving its type; a scalar with surrounding literal
    /// text gets every `{{id}}` occurrence substituted with the stringified
    /// value. An id with no recorded locations is a silent no-op - emptiness
    /// is the caller's concern, not the index's.
    pub fn bind(&self, tree: &mut AnnotationNode, id: &str, value: &AnnotationNode) {
        let Some(paths) = self.locations.get(id) else {
            debug!(id, "bind on unindexed id ignored");
            return;
        };
        let token = format!("{{{{{id}}}}}");
        for path in paths {
            // An earlier whole-node bind may have restructured the tree
            // underneath a later path; those locations are gone.
            let Some(node) = tree.descend_mut(path) else {
                trace!(id, ?path, "stale placeholder location skipped");
                continue;
            };
            match node {
                AnnotationNode::Text(text) if text.len() > token.len() => {
                    *text = text.replace(&token, &value.render_text());
                }
                _ => *node = value.clone(),
            }
        }
        debug!(id, locations = paths.len(), "placeholder bound");
    }
}
