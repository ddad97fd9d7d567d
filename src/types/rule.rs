use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;

use super::error::{ActError, BuildError};
use super::responder::{replies, Replies, ReplyStream, Responder, ResponderFn};
use super::trigger::{Trigger, TriggerMatch};
use super::user::User;

/// A trigger-response unit: ordered trigger patterns, an optional admin
/// requirement and a [`Responder`].
///
/// Rules are immutable once built. They are `Send + Sync` and can be shared
/// behind an `Arc` and evaluated from many threads at once.
///
/// # Example
///
/// ```
/// use keyreply::{Rule, Sender};
///
/// let rule = Rule::builder("greet")
///     .trigger("hello")
///     .trigger("hi|hey")
///     .replies(["Hi!", "Hello there!"])
///     .build()
///     .unwrap();
///
/// let user = Sender::new("alice");
/// let m = rule.should_trigger(&user, "Hey bot").unwrap();
/// let reply = rule.act(&user, "Hey bot", &m).unwrap().next().unwrap().unwrap();
/// assert!(reply == "Hi!" || reply == "Hello there!");
/// ```
pub struct Rule<U: ?Sized> {
    pub(crate) name: String,
    pub(crate) triggers: Vec<Trigger>,
    pub(crate) requires_admin: bool,
    pub(crate) responder: Responder<U>,
}

impl<U: ?Sized> Rule<U> {
    /// Compile a rule from pattern sources and a responder.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidPattern`] for a malformed pattern,
    /// [`BuildError::NoTriggers`] if `patterns` is empty and
    /// [`BuildError::EmptyPool`] for a fixed pool with no replies.
    pub fn new<I>(
        name: &str,
        patterns: I,
        responder: Responder<U>,
        requires_admin: bool,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let triggers = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref();
                Trigger::new(pattern).map_err(|source| BuildError::InvalidPattern {
                    rule: name.to_owned(),
                    pattern: pattern.to_owned(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if triggers.is_empty() {
            return Err(BuildError::NoTriggers {
                rule: name.to_owned(),
            });
        }

        if let Responder::FixedPool(pool) = &responder {
            if pool.is_empty() {
                return Err(BuildError::EmptyPool {
                    rule: name.to_owned(),
                });
            }
        }

        tracing::debug!(
            rule = name,
            triggers = triggers.len(),
            requires_admin,
            responder = ?responder,
            "compiled rule"
        );

        Ok(Self {
            name: name.to_owned(),
            triggers,
            requires_admin,
            responder,
        })
    }

    /// Start building a rule named `name`.
    #[must_use]
    pub fn builder(name: &str) -> RuleBuilder<U> {
        RuleBuilder {
            name: name.to_owned(),
            patterns: Vec::new(),
            requires_admin: false,
            computed: None,
            pool: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trigger patterns in registration order.
    #[must_use]
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    #[must_use]
    pub fn requires_admin(&self) -> bool {
        self.requires_admin
    }

    #[must_use]
    pub fn responder(&self) -> &Responder<U> {
        &self.responder
    }
}

impl<U: User + ?Sized> Rule<U> {
    /// Decide whether this rule fires for `message` sent by `user`.
    ///
    /// Admin-only rules never fire for non-admins; no pattern is evaluated in
    /// that case. Otherwise triggers are tried in registration order and the
    /// match of the first one that hits is returned.
    #[must_use]
    pub fn should_trigger(&self, user: &U, message: &str) -> Option<TriggerMatch> {
        if self.requires_admin && !user.is_admin() {
            tracing::trace!(rule = %self.name, "sender is not an admin");
            return None;
        }

        let found = self
            .triggers
            .iter()
            .enumerate()
            .find_map(|(i, trigger)| trigger.find(i, message));

        if let Some(m) = &found {
            tracing::debug!(
                rule = %self.name,
                trigger = %self.triggers[m.trigger_index()],
                matched = m.as_str(),
                "rule triggered"
            );
        }
        found
    }

    /// Produce the replies for a message this rule was triggered by.
    ///
    /// `matched` must be the value returned by [`should_trigger`](Self::should_trigger)
    /// for the same `user` and `message`. A computed responder's iterator is
    /// returned as-is, unevaluated. A fixed pool yields exactly one fragment,
    /// drawn independently on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ActError::EmptyPool`] if the fixed pool has nothing to draw
    /// from. Errors raised by a computed responder surface as items of the
    /// returned stream.
    pub fn act(
        &self,
        user: &U,
        message: &str,
        matched: &TriggerMatch,
    ) -> Result<ReplyStream, ActError> {
        let inner: Replies = match &self.responder {
            Responder::Computed(f) => f(user, message, matched),
            Responder::FixedPool(pool) => {
                let reply = pool
                    .choose(&mut rand::thread_rng())
                    .ok_or_else(|| ActError::EmptyPool {
                        rule: self.name.clone(),
                    })?;
                replies(std::iter::once(reply.clone()))
            }
        };
        Ok(ReplyStream::new(&self.name, inner))
    }
}

impl<U: ?Sized> Clone for Rule<U> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            triggers: self.triggers.clone(),
            requires_admin: self.requires_admin,
            responder: self.responder.clone(),
        }
    }
}

impl<U: ?Sized> fmt::Debug for Rule<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("triggers", &self.triggers)
            .field("requires_admin", &self.requires_admin)
            .field("responder", &self.responder)
            .finish()
    }
}

impl<U: ?Sized> fmt::Display for Rule<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<&str> = self.triggers.iter().map(Trigger::source).collect();
        write!(f, "{} [{}]", self.name, patterns.join(", "))?;
        if self.requires_admin {
            write!(f, " (admin)")?;
        }
        Ok(())
    }
}

/// Builder for [`Rule`].
///
/// Exactly one of [`replies`](Self::replies) or
/// [`respond_with`](Self::respond_with) must be used.
pub struct RuleBuilder<U: ?Sized> {
    name: String,
    patterns: Vec<String>,
    requires_admin: bool,
    computed: Option<ResponderFn<U>>,
    pool: Option<Vec<String>>,
}

impl<U: ?Sized> RuleBuilder<U> {
    /// Add a trigger pattern. Patterns are tried in the order they are added.
    #[must_use]
    pub fn trigger(mut self, pattern: &str) -> Self {
        self.patterns.push(pattern.to_owned());
        self
    }

    #[must_use]
    pub fn triggers<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.patterns
            .extend(patterns.into_iter().map(|p| p.as_ref().to_owned()));
        self
    }

    /// Restrict the rule to admin senders.
    #[must_use]
    pub fn requires_admin(mut self) -> Self {
        self.requires_admin = true;
        self
    }

    #[must_use]
    pub(crate) fn admin_only(mut self, requires_admin: bool) -> Self {
        self.requires_admin = requires_admin;
        self
    }

    /// Add fragments to the fixed reply pool.
    #[must_use]
    pub fn replies<I>(mut self, replies: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.pool
            .get_or_insert_with(Vec::new)
            .extend(replies.into_iter().map(Into::into));
        self
    }

    /// Use a computed responder.
    #[must_use]
    pub fn respond_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&U, &str, &TriggerMatch) -> Replies + Send + Sync + 'static,
    {
        self.computed = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub(crate) fn responder_fn(mut self, f: ResponderFn<U>) -> Self {
        self.computed = Some(f);
        self
    }

    /// Compile the rule.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingResponder`] or
    /// [`BuildError::AmbiguousResponder`] unless exactly one responder mode
    /// was configured, plus any error from [`Rule::new`].
    pub fn build(self) -> Result<Rule<U>, BuildError> {
        let responder = match (self.computed, self.pool) {
            (Some(f), None) => Responder::Computed(f),
            (None, Some(pool)) => Responder::FixedPool(pool),
            (Some(_), Some(_)) => {
                return Err(BuildError::AmbiguousResponder { rule: self.name });
            }
            (None, None) => return Err(BuildError::MissingResponder { rule: self.name }),
        };
        Rule::new(&self.name, &self.patterns, responder, self.requires_admin)
    }
}
