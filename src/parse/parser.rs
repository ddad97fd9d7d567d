use crate::RuleDef;

/// The result of parsing rule definitions written in the DSL.
///
/// Definitions are kept in source order; nothing is compiled yet.
#[derive(Debug, Default)]
pub struct ParsedRules {
    pub rules: Vec<RuleDef>,
}
