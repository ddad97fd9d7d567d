use std::fmt;

use super::definition::RuleDef;
use super::error::{ActError, BuildError};
use super::handlers::Handlers;
use super::responder::ReplyStream;
use super::rule::Rule;
use super::trigger::TriggerMatch;
use super::user::User;

/// Builder for constructing a [`Dispatcher`].
///
/// # Example
///
/// ```
/// use keyreply::{Dispatcher, DispatchMode, Rule, Sender, replies};
///
/// let dispatcher = Dispatcher::builder()
///     .rule(Rule::builder("ping").trigger("ping").replies(["pong"]).build().unwrap())
///     .rule(
///         Rule::builder("echo")
///             .trigger(r"echo (\w+)")
///             .respond_with(|_, _, m| replies([m.get(1).unwrap_or_default().to_owned()]))
///             .build()
///             .unwrap(),
///     )
///     .build()
///     .unwrap();
///
/// let user = Sender::new("alice");
/// let streams = dispatcher.respond(&user, "echo hello", DispatchMode::First).unwrap();
/// let out: Vec<String> = streams.into_iter().flatten().map(Result::unwrap).collect();
/// assert_eq!(out, ["hello"]);
/// ```
pub struct DispatcherBuilder<U: ?Sized> {
    rules: Vec<Rule<U>>,
}

impl<U: ?Sized> DispatcherBuilder<U> {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule. Rules are evaluated in the order they are registered.
    #[must_use]
    pub fn rule(mut self, rule: Rule<U>) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule<U>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Finish building.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateRule`] if two rules share a name.
    pub fn build(self) -> Result<Dispatcher<U>, BuildError> {
        crate::compile::assemble(self.rules)
    }
}

impl<U: ?Sized> Default for DispatcherBuilder<U> {
    fn default() -> Self {
        Self::new()
    }
}

/// How many triggered rules a message is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Only the first rule, in registration order, that triggers.
    #[default]
    First,
    /// Every rule that triggers, in registration order.
    All,
}

/// An ordered, immutable collection of rules. Thread-safe and designed to
/// live behind `Arc`.
pub struct Dispatcher<U: ?Sized> {
    pub(crate) rules: Vec<Rule<U>>,
}

/// A rule that triggered on a message, together with its match.
pub struct Triggered<'a, U: ?Sized> {
    rule: &'a Rule<U>,
    matched: TriggerMatch,
}

impl<U: ?Sized> Dispatcher<U> {
    #[must_use]
    pub fn builder() -> DispatcherBuilder<U> {
        DispatcherBuilder::new()
    }

    /// Parse rule definitions written in the rule DSL and compile them,
    /// resolving `handler` references against `handlers`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyreplyError`](crate::KeyreplyError) on parse or build
    /// failure. No dispatcher is returned unless every rule is valid.
    pub fn from_dsl(input: &str, handlers: &Handlers<U>) -> Result<Self, crate::KeyreplyError> {
        let parsed = crate::parse::parse(input)?;
        let dispatcher = crate::compile::compile(&parsed.rules, handlers)?;
        Ok(dispatcher)
    }

    /// Read a DSL file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`KeyreplyError`](crate::KeyreplyError) on I/O, parse or build
    /// failure.
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
        handlers: &Handlers<U>,
    ) -> Result<Self, crate::KeyreplyError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading rule definitions");
        Self::from_dsl(&input, handlers)
    }

    /// Compile rule definitions obtained some other way, e.g. deserialized.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] for the first invalid definition.
    pub fn from_defs(defs: &[RuleDef], handlers: &Handlers<U>) -> Result<Self, BuildError> {
        crate::compile::compile(defs, handlers)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule<U>> {
        self.rules.iter().find(|r| r.name == name)
    }
}

impl<U: User + ?Sized> Dispatcher<U> {
    /// The first rule, in registration order, that triggers on `message`.
    #[must_use]
    pub fn first_match(&self, user: &U, message: &str) -> Option<Triggered<'_, U>> {
        crate::evaluate::first_match(&self.rules, user, message)
    }

    /// Every rule that triggers on `message`, in registration order.
    #[must_use]
    pub fn all_matches(&self, user: &U, message: &str) -> Vec<Triggered<'_, U>> {
        crate::evaluate::all_matches(&self.rules, user, message)
    }

    /// Evaluate `message` and activate the triggered rules.
    ///
    /// Returns one reply stream per activated rule; empty if nothing
    /// triggered. Rules that did not trigger are never activated.
    ///
    /// # Errors
    ///
    /// Returns the first [`ActError`] raised while activating a rule.
    pub fn respond(
        &self,
        user: &U,
        message: &str,
        mode: DispatchMode,
    ) -> Result<Vec<ReplyStream>, ActError> {
        let triggered: Vec<Triggered<'_, U>> = match mode {
            DispatchMode::First => self.first_match(user, message).into_iter().collect(),
            DispatchMode::All => self.all_matches(user, message),
        };
        triggered
            .iter()
            .map(|t| t.act(user, message))
            .collect()
    }
}

impl<U: ?Sized> fmt::Debug for Dispatcher<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("rules", &self.rules)
            .finish()
    }
}

impl<U: ?Sized> fmt::Display for Dispatcher<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let admin = self.rules.iter().filter(|r| r.requires_admin).count();
        write!(f, "Dispatcher({} rules, {} admin-only)", self.rules.len(), admin)
    }
}

impl<'a, U: ?Sized> Triggered<'a, U> {
    pub(crate) fn new(rule: &'a Rule<U>, matched: TriggerMatch) -> Self {
        Self { rule, matched }
    }

    #[must_use]
    pub fn rule(&self) -> &'a Rule<U> {
        self.rule
    }

    pub fn matched(&self) -> &TriggerMatch {
        &self.matched
    }

    pub fn into_match(self) -> TriggerMatch {
        self.matched
    }
}

impl<U: User + ?Sized> Triggered<'_, U> {
    /// Activate the rule with the match it triggered on.
    ///
    /// # Errors
    ///
    /// See [`Rule::act`].
    pub fn act(&self, user: &U, message: &str) -> Result<ReplyStream, ActError> {
        self.rule.act(user, message, &self.matched)
    }
}

impl<U: ?Sized> fmt::Debug for Triggered<'_, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Triggered")
            .field("rule", &self.rule.name)
            .field("matched", &self.matched)
            .finish()
    }
}
