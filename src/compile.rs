use std::collections::HashSet;

use crate::{BuildError, Dispatcher, Handlers, Rule, RuleDef};

/// Compile rule definitions into a [`Dispatcher`], keeping their order.
pub(crate) fn compile<U: ?Sized>(
    defs: &[RuleDef],
    handlers: &Handlers<U>,
) -> Result<Dispatcher<U>, BuildError> {
    check_duplicates(defs.iter().map(|d| d.name.as_str()))?;

    let rules = defs
        .iter()
        .map(|def| def.build(handlers))
        .collect::<Result<Vec<_>, _>>()?;

    assemble(rules)
}

/// Wrap already-built rules into a [`Dispatcher`].
pub(crate) fn assemble<U: ?Sized>(rules: Vec<Rule<U>>) -> Result<Dispatcher<U>, BuildError> {
    check_duplicates(rules.iter().map(Rule::name))?;

    tracing::debug!(
        rules = rules.len(),
        admin_only = rules.iter().filter(|r| r.requires_admin).count(),
        "assembled dispatcher"
    );

    Ok(Dispatcher { rules })
}

fn check_duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(BuildError::DuplicateRule {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}
