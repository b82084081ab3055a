//! Reconciliation of declared route maps against live route names.
//!
//! Controllers declare an ordered map from route-name suffix patterns to
//! method templates (or pre-wrapped binders). Each discovered route's name
//! is tested against the patterns in declaration order; patterns match as
//! anchored, escaped suffixes - `"widgets.index"` matches any route name
//! ending in exactly that text. The first matching pattern wins, so when two
//! declared patterns are literal suffixes of each other the outcome depends
//! entirely on declaration order.

use crate::annotation::AnnotationNode;
use crate::binder::DynamicBinder;
use crate::error::EmitterError;
use crate::template::MethodTemplate;
use regex::Regex;
use tracing::debug;

/// Constructor used to wrap an unbound template at match time
///
/// Declared per controller, resolved once at declaration time; replaces the
/// original pattern of instantiating a handler class by name.
pub type BinderFactory = fn(MethodTemplate) -> DynamicBinder;

/// The target of one route-map entry
#[derive(Debug, Clone)]
pub enum RouteTarget {
    /// An unbound template prototype, cloned and wrapped per match
    Template(MethodTemplate),
    /// An already-wrapped binder, cloned per match
    Bound(DynamicBinder),
    /// An entry carried through from the annotation layer that was not
    /// recognized as a template or a binder; matching it is an error
    Raw(AnnotationNode),
}

/// One declared route-map entry: a suffix pattern and its target
#[derive(Debug, Clone)]
pub struct RouteRule {
    pattern: String,
    suffix: Regex,
    target: RouteTarget,
}

impl RouteRule {
    pub fn new(pattern: impl Into<String>, target: RouteTarget) -> Self {
        let pattern = pattern.into();
        // Escaped literal + end anchor; never arbitrary regex from the
        // declaration side.
        let suffix = Regex::new(&format!("{}$", regex::escape(&pattern)))
            .expect("escaped suffix pattern compiles");
        RouteRule {
            pattern,
            suffix,
            target,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    fn matches(&self, name: &str) -> bool {
        self.suffix.is_match(name)
    }
}

/// Find the binder for a discovered route name
///
/// Iterates `rules` in declaration order and selects the first whose suffix
/// pattern matches `candidate`. A matched template prototype is cloned and
/// wrapped through `factory`; a matched binder is cloned as-is. An absent
/// candidate name, or no matching pattern, is a clean no-match - routes with
/// no schema declaration are simply skipped.
///
/// # Errors
///
/// [`EmitterError::InvalidRouteEntry`] when the matched entry is neither a
/// template nor a binder.
pub fn resolve_route(
    rules: &[RouteRule],
    candidate: Option<&str>,
    factory: BinderFactory,
) -> Result<Option<DynamicBinder>, EmitterError> {
    let Some(name) = candidate else {
        debug!("route has no declared name, skipping");
        return Ok(None);
    };
    for rule in rules {
        if rule.matches(name) {
            debug!(pattern = rule.pattern(), name, "route suffix matched");
            return match &rule.target {
                RouteTarget::Template(template) => Ok(Some(factory(template.clone()))),
                RouteTarget::Bound(binder) => Ok(Some(binder.clone())),
                RouteTarget::Raw(_) => Err(EmitterError::InvalidRouteEntry {
                    pattern: rule.pattern.clone(),
                    name: name.to_string(),
                }),
            };
        }
    }
    debug!(name, "no declared pattern matched");
    Ok(None)
}
