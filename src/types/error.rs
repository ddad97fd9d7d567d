use thiserror::Error;

/// Boxed error a computed responder may yield for an individual reply.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while constructing a [`Rule`](super::Rule) or a
/// [`Dispatcher`](super::Dispatcher).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid trigger pattern '{pattern}' in rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{rule}' has no trigger patterns")]
    NoTriggers { rule: String },

    #[error("rule '{rule}' has neither a responder nor a reply pool")]
    MissingResponder { rule: String },

    #[error("rule '{rule}' has both a responder and a reply pool")]
    AmbiguousResponder { rule: String },

    #[error("rule '{rule}' has an empty reply pool")]
    EmptyPool { rule: String },

    #[error("duplicate rule name '{name}'")]
    DuplicateRule { name: String },

    #[error("undefined handler '{handler}' in rule '{rule}'")]
    UndefinedHandler { rule: String, handler: String },
}

/// Errors raised while a triggered rule produces its replies.
#[derive(Debug, Error)]
pub enum ActError {
    #[error("rule '{rule}' has an empty reply pool")]
    EmptyPool { rule: String },

    #[error("responder for rule '{rule}' failed: {source}")]
    Responder {
        rule: String,
        #[source]
        source: BoxError,
    },
}
