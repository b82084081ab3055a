use super::object::AnnotationObject;
use serde_json::Value;

/// One step of an addressable path into an annotation tree
///
/// Paths are recorded by the placeholder index at build time and resolved to
/// a mutable reference at bind time, so no aliasing references into the tree
/// are ever held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Entry of a keyed mapping
    Key(String),
    /// Element of an ordered sequence
    Index(usize),
    /// Named field of an annotation object
    Field(String),
}

/// An addressable location inside an annotation tree, from the root down
pub type NodePath = Vec<PathStep>;

/// A node of an annotation tree
///
/// Trees are finite and acyclic at construction time. The only
/// back-references are the parent-context links on [`AnnotationObject`],
/// which chain strictly upward and are never followed during traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationNode {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    /// Text scalar; may embed zero or more `{{id}}` placeholder tokens
    /// in surrounding literal text
    Text(String),
    /// Ordered sequence of nodes
    Seq(Vec<AnnotationNode>),
    /// Keyed mapping, insertion order preserved
    Map(Vec<(String, AnnotationNode)>),
    /// Opaque annotation object
    Object(AnnotationObject),
}

impl AnnotationNode {
    /// Build a text node
    pub fn text(value: impl Into<String>) -> Self {
        AnnotationNode::Text(value.into())
    }

    /// Build a mapping node from key/value pairs, preserving order
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, AnnotationNode)>) -> Self {
        AnnotationNode::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a mapping entry or object field by name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AnnotationNode> {
        match self {
            AnnotationNode::Map(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            AnnotationNode::Object(obj) => obj.field(key),
            _ => None,
        }
    }

    /// Text content, if this node is a text scalar
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnnotationNode::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Resolve a recorded path to a mutable reference into this tree
    ///
    /// Returns `None` when the path no longer exists, e.g. because an
    /// earlier whole-node bind restructured the tree underneath it.
    pub fn descend_mut(&mut self, path: &[PathStep]) -> Option<&mut AnnotationNode> {
        let mut node = self;
        for step in path {
            node = match step {
                PathStep::Key(key) => match node {
                    AnnotationNode::Map(entries) => {
                        entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)?
                    }
                    _ => return None,
                },
                PathStep::Index(idx) => match node {
                    AnnotationNode::Seq(items) => items.get_mut(*idx)?,
                    _ => return None,
                },
                PathStep::Field(name) => match node {
                    AnnotationNode::Object(obj) => obj.field_mut(name)?,
                    _ => return None,
                },
            };
        }
        Some(node)
    }

    /// Stringify for partial-string substitution
    ///
    /// Scalars render as their literal content; structured values render as
    /// compact JSON. Null renders empty, matching string interpolation of an
    /// absent value.
    #[must_use]
    pub fn render_text(&self) -> String {
        match self {
            AnnotationNode::Null => String::new(),
            AnnotationNode::Bool(b) => b.to_string(),
            AnnotationNode::Number(n) => n.to_string(),
            AnnotationNode::Text(s) => s.clone(),
            other => serde_json::to_string(&other.to_json()).unwrap_or_default(),
        }
    }

    /// Convert to a JSON value
    ///
    /// Annotation objects flatten to their fields; context links are pure
    /// observers and are not serialized.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            AnnotationNode::Null => Value::Null,
            AnnotationNode::Bool(b) => Value::Bool(*b),
            AnnotationNode::Number(n) => Value::Number(n.clone()),
            AnnotationNode::Text(s) => Value::String(s.clone()),
            AnnotationNode::Seq(items) => {
                Value::Array(items.iter().map(AnnotationNode::to_json).collect())
            }
            AnnotationNode::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            AnnotationNode::Object(obj) => obj.to_json(),
        }
    }
}

impl From<Value> for AnnotationNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AnnotationNode::Null,
            Value::Bool(b) => AnnotationNode::Bool(b),
            Value::Number(n) => AnnotationNode::Number(n),
            Value::String(s) => AnnotationNode::Text(s),
            Value::Array(items) => {
                AnnotationNode::Seq(items.into_iter().map(AnnotationNode::from).collect())
            }
            Value::Object(map) => AnnotationNode::Map(
                map.into_iter()
                    .map(|(k, v)| (k, AnnotationNode::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for AnnotationNode {
    fn from(value: &str) -> Self {
        AnnotationNode::Text(value.to_string())
    }
}

impl From<String> for AnnotationNode {
    fn from(value: String) -> Self {
        AnnotationNode::Text(value)
    }
}

impl From<bool> for AnnotationNode {
    fn from(value: bool) -> Self {
        AnnotationNode::Bool(value)
    }
}

impl From<i64> for AnnotationNode {
    fn from(value: i64) -> Self {
        AnnotationNode::Number(value.into())
    }
}
