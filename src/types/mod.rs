mod definition;
mod dispatcher;
mod error;
mod handlers;
mod responder;
mod rule;
mod trigger;
mod user;

pub use definition::RuleDef;
pub use dispatcher::{DispatchMode, Dispatcher, DispatcherBuilder, Triggered};
pub use error::{ActError, BoxError, BuildError};
pub use handlers::Handlers;
pub use responder::{replies, try_replies, Replies, ReplyStream, Responder, ResponderFn};
pub use rule::{Rule, RuleBuilder};
pub use trigger::{Trigger, TriggerMatch};
pub use user::{Sender, User};
