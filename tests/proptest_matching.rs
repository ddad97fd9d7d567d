use keyreply::{Rule, Sender, Trigger};
use proptest::prelude::*;

fn pool_rule(patterns: &[&str]) -> Rule<Sender> {
    Rule::builder("r")
        .triggers(patterns)
        .replies(["ok"])
        .build()
        .unwrap()
}

/// A lowercase word long enough to be unambiguous.
fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{3,8}"
}

/// Randomly flip the case of each letter.
fn arb_recased(word: String) -> impl Strategy<Value = String> {
    let len = word.len();
    prop::collection::vec(any::<bool>(), len).prop_map(move |flips| {
        word.chars()
            .zip(flips)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

proptest! {
    /// A trigger matches its word when it stands alone in a sentence.
    #[test]
    fn standalone_word_matches(
        word in arb_word(),
        before in "[a-z ]{0,10}",
        after in "[a-z ]{0,10}",
        punct in prop::sample::select(vec!["", "!", "?", ",", "."]),
    ) {
        let rule = pool_rule(&[&word]);
        let message = format!("{before} {word}{punct} {after}");
        let m = rule.should_trigger(&Sender::new("u"), &message);
        prop_assert!(m.is_some(), "'{}' should match in '{}'", word, message);
    }

    /// A trigger never matches when its word only appears inside a longer word.
    #[test]
    fn embedded_word_does_not_match(
        word in arb_word(),
        prefix in "[a-z]{1,4}",
        suffix in "[a-z]{0,4}",
    ) {
        let rule = pool_rule(&[&word]);
        let message = format!("{prefix}{word}{suffix}");
        prop_assert!(rule.should_trigger(&Sender::new("u"), &message).is_none());

        let message = format!("{word}{prefix}");
        prop_assert!(rule.should_trigger(&Sender::new("u"), &message).is_none());
    }

    /// Matching ignores case on both the pattern and the message side.
    #[test]
    fn case_is_ignored(
        (word, recased) in arb_word().prop_flat_map(|w| (Just(w.clone()), arb_recased(w))),
        pattern_upper in any::<bool>(),
    ) {
        let pattern = if pattern_upper { word.to_ascii_uppercase() } else { word.clone() };
        let rule = pool_rule(&[&pattern]);
        let user = Sender::new("u");

        let plain = rule.should_trigger(&user, &format!("<< {word} >>")).unwrap();
        let mixed = rule.should_trigger(&user, &format!("<< {recased} >>")).unwrap();
        prop_assert_eq!(plain.range(), mixed.range());
        prop_assert_eq!(mixed.as_str(), recased.as_str());
    }

    /// Of two matching triggers, the one registered first is reported, no
    /// matter where each occurs in the message.
    #[test]
    fn first_registered_trigger_wins(
        (first, second) in (arb_word(), arb_word()).prop_filter("distinct", |(a, b)| a != b),
        swap in any::<bool>(),
    ) {
        let rule = pool_rule(&[&first, &second]);
        let message = if swap {
            format!("{first} {second}")
        } else {
            format!("{second} {first}")
        };
        let m = rule.should_trigger(&Sender::new("u"), &message).unwrap();
        prop_assert_eq!(m.trigger_index(), 0);
        prop_assert_eq!(m.as_str(), first.as_str());
    }

    /// Admin-only rules never fire for regular users, whatever the message.
    #[test]
    fn admin_rules_never_fire_for_regular_users(message in ".{0,40}") {
        let rule: Rule<Sender> = Rule::builder("any_word")
            .trigger(r"\w+")
            .replies(["ok"])
            .requires_admin()
            .build()
            .unwrap();
        prop_assert!(rule.should_trigger(&Sender::new("u"), &message).is_none());
    }

    /// Any literal text compiles once escaped, and evaluation never panics.
    #[test]
    fn escaped_literals_compile(literal in ".{1,12}", message in ".{0,40}") {
        let pattern = regex::escape(&literal);
        prop_assert!(Trigger::new(&pattern).is_ok());
        let rule = pool_rule(&[&pattern]);
        let _ = rule.should_trigger(&Sender::new("u"), &message);
    }

    /// A fixed pool always yields exactly one fragment taken from the pool.
    #[test]
    fn fixed_pool_yields_one_member(pool in prop::collection::vec("[a-z]{1,6}", 1..6)) {
        let rule: Rule<Sender> = Rule::builder("pick")
            .trigger("pick")
            .replies(pool.clone())
            .build()
            .unwrap();
        let user = Sender::new("u");
        let m = rule.should_trigger(&user, "pick one").unwrap();
        let out: Vec<String> = rule
            .act(&user, "pick one", &m)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        prop_assert_eq!(out.len(), 1);
        prop_assert!(pool.contains(&out[0]));
    }
}
