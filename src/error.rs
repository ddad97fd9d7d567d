use thiserror::Error;

use crate::parse::ParseError;
use crate::BuildError;

/// Unified error type covering parsing, rule construction, and I/O.
///
/// Returned by the loaders [`Dispatcher::from_dsl()`](crate::Dispatcher::from_dsl)
/// and [`Dispatcher::from_file()`](crate::Dispatcher::from_file).
#[derive(Debug, Error)]
pub enum KeyreplyError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
