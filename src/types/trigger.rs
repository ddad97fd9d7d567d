use std::fmt;
use std::ops::Range;

use regex::{Captures, Regex, RegexBuilder};

/// A compiled trigger pattern.
///
/// The pattern source is wrapped in word-boundary assertions and matched
/// case-insensitively, so `"cat"` matches `"Cat!"` but not `"category"`.
/// Alternations stay bounded on both sides: `"hi|hey"` compiles to
/// `\b(?:hi|hey)\b`.
#[derive(Debug, Clone)]
pub struct Trigger {
    source: String,
    regex: Regex,
}

impl Trigger {
    /// Compile a pattern source.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the source is not a valid regular
    /// expression on its own. The wrapping group could otherwise balance
    /// stray parentheses such as `"cat)|(?:dog"` and leave one side unbounded.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source)?;
        let regex = RegexBuilder::new(&format!(r"\b(?:{source})\b"))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            source: source.to_owned(),
            regex,
        })
    }

    /// The pattern source as supplied, without the word-boundary wrapping.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the trigger matches anywhere in `message`.
    #[must_use]
    pub fn is_match(&self, message: &str) -> bool {
        self.regex.is_match(message)
    }

    /// Search `message` for the leftmost match. `index` is the trigger's
    /// position within its rule and is recorded in the returned match.
    pub(crate) fn find(&self, index: usize, message: &str) -> Option<TriggerMatch> {
        let caps = self.regex.captures(message)?;
        Some(TriggerMatch::from_captures(index, &self.regex, &caps))
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Where and how a trigger matched a message.
///
/// Owned, so computed responders can keep it around in the lazy reply
/// iterators they return.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TriggerMatchRepr")
)]
#[must_use]
pub struct TriggerMatch {
    trigger_index: usize,
    start: usize,
    end: usize,
    /// Capture groups; index 0 is the whole match.
    groups: Vec<Option<String>>,
    names: Vec<(String, usize)>,
}

/// Unchecked wire form of a [`TriggerMatch`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TriggerMatchRepr {
    trigger_index: usize,
    start: usize,
    end: usize,
    groups: Vec<Option<String>>,
    names: Vec<(String, usize)>,
}

#[cfg(feature = "serde")]
impl TryFrom<TriggerMatchRepr> for TriggerMatch {
    type Error = String;

    fn try_from(repr: TriggerMatchRepr) -> Result<Self, Self::Error> {
        if repr.start > repr.end {
            return Err(format!(
                "match start {} is past its end {}",
                repr.start, repr.end
            ));
        }
        if let Some(Some(whole)) = repr.groups.first() {
            if whole.len() != repr.end - repr.start {
                return Err(format!(
                    "matched text '{whole}' does not span {}..{}",
                    repr.start, repr.end
                ));
            }
        }
        if let Some((name, idx)) = repr.names.iter().find(|(_, i)| *i >= repr.groups.len()) {
            return Err(format!(
                "capture '{name}' refers to group {idx} of {}",
                repr.groups.len()
            ));
        }
        Ok(Self {
            trigger_index: repr.trigger_index,
            start: repr.start,
            end: repr.end,
            groups: repr.groups,
            names: repr.names,
        })
    }
}

impl TriggerMatch {
    fn from_captures(trigger_index: usize, regex: &Regex, caps: &Captures<'_>) -> Self {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let groups = caps
            .iter()
            .map(|g| g.map(|m| m.as_str().to_owned()))
            .collect();
        let names = regex
            .capture_names()
            .enumerate()
            .filter_map(|(i, name)| name.map(|n| (n.to_owned(), i)))
            .collect();
        Self {
            trigger_index,
            start: whole.start,
            end: whole.end,
            groups,
            names,
        }
    }

    /// Position of the matching trigger in the rule's trigger list.
    #[must_use]
    pub fn trigger_index(&self) -> usize {
        self.trigger_index
    }

    /// Byte offset of the match start in the message.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the match end in the message.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The matched text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.get(0).unwrap_or_default()
    }

    /// Text of capture group `i`, or `None` if the group does not exist or
    /// did not participate in the match. Group 0 is the whole match.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&str> {
        self.groups.get(i)?.as_deref()
    }

    /// Text of the named capture group `name`.
    #[must_use]
    pub fn name(&self, name: &str) -> Option<&str> {
        let (_, idx) = self.names.iter().find(|(n, _)| n == name)?;
        self.get(*idx)
    }
}

impl fmt::Display for TriggerMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at {}..{}", self.as_str(), self.start, self.end)
    }
}
