#![cfg(feature = "serde")]

use keyreply::{replies, DispatchMode, Dispatcher, Handlers, RuleDef, Sender};

#[test]
fn rule_defs_from_json() {
    let json = r#"[
        { "name": "greet", "patterns": ["hello", "hi"], "replies": ["Hi!"] },
        { "name": "halt", "patterns": ["shutdown"], "requires_admin": true, "handler": "halt" }
    ]"#;
    let defs: Vec<RuleDef> = serde_json::from_str(json).unwrap();
    assert_eq!(defs.len(), 2);
    assert!(!defs[0].requires_admin);
    assert_eq!(defs[0].handler, None);

    let handlers = Handlers::<Sender>::new().register("halt", |_, _, _| replies(["bye"]));
    let d = Dispatcher::from_defs(&defs, &handlers).unwrap();
    assert_eq!(d.rule_names(), ["greet", "halt"]);

    let out: Vec<String> = d
        .respond(&Sender::admin("root"), "shutdown", DispatchMode::First)
        .unwrap()
        .into_iter()
        .flatten()
        .map(Result::unwrap)
        .collect();
    assert_eq!(out, ["bye"]);
}

#[test]
fn parsed_defs_serialize() {
    let parsed = keyreply::parse::parse("rule r (admin):\n    triggers \"x\"\n    replies \"y\"")
        .unwrap();
    let value = serde_json::to_value(&parsed.rules[0]).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "r",
            "patterns": ["x"],
            "requires_admin": true,
            "replies": ["y"],
            "handler": null
        })
    );
}

#[test]
fn trigger_match_serializes() {
    let d = Dispatcher::builder()
        .rule(
            keyreply::Rule::builder("r")
                .trigger(r"(?P<verb>ping)")
                .replies(["pong"])
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let m = d
        .first_match(&Sender::new("u"), "ping!")
        .unwrap()
        .into_match();
    let json = serde_json::to_string(&m).unwrap();
    let back: keyreply::TriggerMatch = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
    assert_eq!(back.name("verb"), Some("ping"));
}

#[test]
fn inconsistent_trigger_match_rejected() {
    let cases = [
        (
            r#"{"trigger_index":0,"start":5,"end":2,"groups":[null],"names":[]}"#,
            "past its end",
        ),
        (
            r#"{"trigger_index":0,"start":0,"end":4,"groups":["ping"],"names":[["verb",1]]}"#,
            "refers to group 1 of 1",
        ),
        (
            r#"{"trigger_index":0,"start":0,"end":9,"groups":["ping"],"names":[]}"#,
            "does not span",
        ),
    ];
    for (json, expected) in cases {
        let err = serde_json::from_str::<keyreply::TriggerMatch>(json).unwrap_err();
        assert!(err.to_string().contains(expected), "{json}: {err}");
    }

    let ok = r#"{"trigger_index":1,"start":0,"end":4,"groups":["ping","ping"],"names":[["verb",1]]}"#;
    let m: keyreply::TriggerMatch = serde_json::from_str(ok).unwrap();
    assert_eq!(m.name("verb"), Some("ping"));
    assert_eq!(m.trigger_index(), 1);
}
