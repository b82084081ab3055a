use thiserror::Error;

/// Errors raised while binding templates and reconciling routes
///
/// All variants are unrecoverable where raised: the inputs are static
/// declarations, not transient I/O, so an absent value or a malformed route
/// entry is a bug in the declared schema to be fixed, not retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitterError {
    /// A required placeholder key resolved to nothing. Left unbound it would
    /// surface as a broken `{{key}}` literal in the emitted schema, so the
    /// whole pass stops here.
    #[error("`{key}` value is NULL for {controller}")]
    MissingBinding { key: String, controller: String },

    /// A static declaration is malformed, e.g. a method template declared
    /// over empty data.
    #[error("invalid declaration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A route-map entry matched a route name but is neither a method
    /// template nor a binder.
    #[error("invalid value for `{pattern}` in `{name}`")]
    InvalidRouteEntry { pattern: String, name: String },
}
