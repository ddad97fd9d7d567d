use super::error::BuildError;
use super::handlers::Handlers;
use super::rule::Rule;

/// A rule as written in configuration, before its patterns are compiled and
/// its handler is resolved.
///
/// Produced by the DSL parser, or deserialized directly when the `serde`
/// feature is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleDef {
    pub name: String,
    pub patterns: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_admin: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub replies: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub handler: Option<String>,
}

impl RuleDef {
    /// Compile this definition, resolving `handler` against `handlers`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UndefinedHandler`] if the handler is not
    /// registered, plus anything [`RuleBuilder::build`](super::RuleBuilder::build)
    /// rejects.
    pub fn build<U: ?Sized>(&self, handlers: &Handlers<U>) -> Result<Rule<U>, BuildError> {
        let mut builder = Rule::builder(&self.name)
            .triggers(&self.patterns)
            .admin_only(self.requires_admin);

        if let Some(replies) = &self.replies {
            builder = builder.replies(replies.iter().cloned());
        }

        if let Some(name) = &self.handler {
            let f = handlers.get(name).ok_or_else(|| BuildError::UndefinedHandler {
                rule: self.name.clone(),
                handler: name.clone(),
            })?;
            builder = builder.responder_fn(f.clone());
        }

        builder.build()
    }
}
