//! Dynamic binding of resolved values into method templates.

use crate::error::EmitterError;
use crate::registry::{ControllerDecl, ModelRegistry};
use crate::resolver::ValueResolver;
use crate::template::MethodTemplate;
use tracing::{debug, warn};

/// Fills a method template's placeholders from a controller's declarations
///
/// A binder is a transient adapter: the route matcher creates one around a
/// fresh clone of the declared template for each matched route, so binding
/// never mutates shared template state.
#[derive(Debug, Clone)]
pub struct DynamicBinder {
    template: MethodTemplate,
}

impl DynamicBinder {
    /// Wrap an owned template
    ///
    /// Taking the template by value makes a binder without a template
    /// unrepresentable.
    #[must_use]
    pub fn new(template: MethodTemplate) -> Self {
        DynamicBinder { template }
    }

    #[must_use]
    pub fn template(&self) -> &MethodTemplate {
        &self.template
    }

    pub fn template_mut(&mut self) -> &mut MethodTemplate {
        &mut self.template
    }

    /// Unwrap the bound template for materialization
    #[must_use]
    pub fn into_template(self) -> MethodTemplate {
        self.template
    }

    /// Resolve and bind every placeholder key of the wrapped template
    ///
    /// Keys are processed in discovery order: resolve against the controller
    /// declaration, normalize model names into schema references, then write
    /// the value into the template.
    ///
    /// # Errors
    ///
    /// [`EmitterError::MissingBinding`] when a key resolves to nothing. An
    /// unresolved placeholder would otherwise surface as a broken `{{key}}`
    /// literal in the emitted schema. Earlier keys already bound on this
    /// template are not rolled back.
    pub fn handle(
        &mut self,
        controller: &ControllerDecl,
        models: &ModelRegistry,
    ) -> Result<(), EmitterError> {
        let resolver = ValueResolver::new(models);
        let keys: Vec<String> = self.template.keys().to_vec();
        for key in keys {
            let resolved = resolver
                .resolve(controller, &key)
                .map(|value| resolver.normalize(value));
            match resolved {
                Some(value) => {
                    debug!(controller = controller.name(), key = %key, "placeholder resolved");
                    self.template.set(&key, value);
                }
                None => {
                    warn!(controller = controller.name(), key = %key, "placeholder resolved to NULL");
                    return Err(EmitterError::MissingBinding {
                        key,
                        controller: controller.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
