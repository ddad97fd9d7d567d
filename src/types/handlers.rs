use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::responder::{Replies, ResponderFn};
use super::trigger::TriggerMatch;

/// Named computed responders that rule definitions can refer to with
/// `handler <name>`.
pub struct Handlers<U: ?Sized> {
    map: HashMap<String, ResponderFn<U>>,
}

impl<U: ?Sized> Handlers<U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Register `f` under `name`, replacing any previous handler of that name.
    #[must_use]
    pub fn register<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&U, &str, &TriggerMatch) -> Replies + Send + Sync + 'static,
    {
        self.map.insert(name.to_owned(), Arc::new(f));
        self
    }

    pub(crate) fn get(&self, name: &str) -> Option<&ResponderFn<U>> {
        self.map.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<U: ?Sized> Default for Handlers<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: ?Sized> fmt::Debug for Handlers<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Handlers").field("names", &names).finish()
    }
}
