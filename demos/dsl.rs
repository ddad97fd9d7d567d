use keyreply::{replies, DispatchMode, Dispatcher, Handlers, Sender};

const RULES: &str = r#"
rule greet:
    triggers "hello", "hi|hey"
    replies "Hi!", "Hello there!"

rule roll:
    triggers "roll (\d+)d(\d+)"
    handler dice

rule shutdown (admin):
    triggers "shutdown"
    replies "Bye!"
"#;

fn main() {
    let handlers = Handlers::<Sender>::new().register("dice", |_, _, m| {
        let count = m.get(1).unwrap_or_default().to_owned();
        let sides = m.get(2).unwrap_or_default().to_owned();
        replies([format!("Rolling {count}d{sides}...")])
    });

    let dispatcher = Dispatcher::from_dsl(RULES, &handlers).expect("failed to load rules");
    println!("{dispatcher}");

    let user = Sender::new("alice");
    for message in ["hey bot", "roll 2d6", "shutdown", "nothing"] {
        let streams = dispatcher
            .respond(&user, message, DispatchMode::First)
            .expect("responder failed");
        if streams.is_empty() {
            println!("{message:?} -> (no rule)");
        }
        for stream in streams {
            let rule = stream.rule().to_owned();
            for reply in stream {
                println!("{message:?} -> [{rule}] {}", reply.expect("reply failed"));
            }
        }
    }
}
