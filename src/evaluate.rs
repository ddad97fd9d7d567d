use crate::{Rule, Triggered, User};

pub(crate) fn first_match<'a, U: User + ?Sized>(
    rules: &'a [Rule<U>],
    user: &U,
    message: &str,
) -> Option<Triggered<'a, U>> {
    // Registration order is precedence order
    let found = rules.iter().find_map(|rule| {
        rule.should_trigger(user, message)
            .map(|m| Triggered::new(rule, m))
    });

    if found.is_none() {
        tracing::trace!(rules = rules.len(), "no rule triggered");
    }
    found
}

pub(crate) fn all_matches<'a, U: User + ?Sized>(
    rules: &'a [Rule<U>],
    user: &U,
    message: &str,
) -> Vec<Triggered<'a, U>> {
    let triggered: Vec<Triggered<'a, U>> = rules
        .iter()
        .filter_map(|rule| {
            rule.should_trigger(user, message)
                .map(|m| Triggered::new(rule, m))
        })
        .collect();

    tracing::trace!(
        rules = rules.len(),
        triggered = triggered.len(),
        "evaluated all rules"
    );
    triggered
}
