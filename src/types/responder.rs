use std::fmt;
use std::sync::Arc;

use super::error::{ActError, BoxError};
use super::trigger::TriggerMatch;

/// Lazy, single-pass sequence of reply fragments produced by a computed
/// responder. Each item may fail independently.
pub type Replies = Box<dyn Iterator<Item = Result<String, BoxError>> + Send>;

/// A computed responder: `(user, message, match) -> replies`.
pub type ResponderFn<U> = Arc<dyn Fn(&U, &str, &TriggerMatch) -> Replies + Send + Sync>;

/// Box an infallible iterator of fragments into [`Replies`].
///
/// ```
/// let mut r = keyreply::replies(["one", "two"]);
/// assert_eq!(r.next().unwrap().unwrap(), "one");
/// ```
pub fn replies<I>(iter: I) -> Replies
where
    I: IntoIterator,
    I::Item: Into<String>,
    I::IntoIter: Send + 'static,
{
    Box::new(iter.into_iter().map(|r| Ok::<String, BoxError>(r.into())))
}

/// Box a fallible iterator of fragments into [`Replies`].
pub fn try_replies<I, T, E>(iter: I) -> Replies
where
    I: IntoIterator<Item = Result<T, E>>,
    I::IntoIter: Send + 'static,
    T: Into<String>,
    E: Into<BoxError>,
{
    Box::new(
        iter.into_iter()
            .map(|r| r.map(Into::<String>::into).map_err(Into::<BoxError>::into)),
    )
}

/// How a rule produces its replies once triggered.
pub enum Responder<U: ?Sized> {
    /// Replies computed by a callback, streamed lazily.
    Computed(ResponderFn<U>),
    /// One fragment drawn uniformly at random on every activation.
    FixedPool(Vec<String>),
}

impl<U: ?Sized> Responder<U> {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&U, &str, &TriggerMatch) -> Replies + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    pub fn pool<I>(replies: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::FixedPool(replies.into_iter().map(Into::into).collect())
    }
}

impl<U: ?Sized> Clone for Responder<U> {
    fn clone(&self) -> Self {
        match self {
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
            Self::FixedPool(pool) => Self::FixedPool(pool.clone()),
        }
    }
}

impl<U: ?Sized> fmt::Debug for Responder<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Computed(_) => f.write_str("Computed(..)"),
            Self::FixedPool(pool) => f.debug_tuple("FixedPool").field(pool).finish(),
        }
    }
}

/// The replies of one rule activation.
///
/// Wraps the responder's lazy iterator and tags failures with the rule name.
/// Nothing is generated until the stream is polled.
#[must_use = "replies are produced lazily and only when iterated"]
pub struct ReplyStream {
    rule: String,
    inner: Replies,
}

impl ReplyStream {
    pub(crate) fn new(rule: &str, inner: Replies) -> Self {
        Self {
            rule: rule.to_owned(),
            inner,
        }
    }

    /// Name of the rule that produced this stream.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }
}

impl Iterator for ReplyStream {
    type Item = Result<String, ActError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(item.map_err(|source| ActError::Responder {
            rule: self.rule.clone(),
            source,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for ReplyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyStream")
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}
