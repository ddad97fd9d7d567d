mod compile;
mod error;
mod evaluate;
pub mod parse;
mod types;

pub use error::KeyreplyError;
pub use types::{
    replies, try_replies, ActError, BoxError, BuildError, DispatchMode, Dispatcher,
    DispatcherBuilder, Handlers, Replies, ReplyStream, Responder, ResponderFn, Rule, RuleBuilder,
    RuleDef, Sender, Trigger, TriggerMatch, Triggered, User,
};
