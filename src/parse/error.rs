use std::fmt;

/// Errors produced when parsing DSL input.
#[derive(Debug)]
pub struct ParseError {
    message: String,
    line: usize,
    column: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    /// Build an error located at byte `offset` of `input`.
    pub(crate) fn at_offset(message: impl Into<String>, input: &str, offset: usize) -> Self {
        let consumed = &input[..offset.min(input.len())];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed
            .rsplit('\n')
            .next()
            .map_or(0, |l| l.chars().count())
            + 1;
        Self::new(message, line, column)
    }

    /// 1-based line of the error.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the error, in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at {}:{}", self.line, self.column)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
