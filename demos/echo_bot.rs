use std::io::{self, BufRead, Write};

use keyreply::{replies, DispatchMode, Dispatcher, Rule, Sender};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=keyreply=debug shows which rules fire
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dispatcher = Dispatcher::builder()
        .rule(
            Rule::builder("shutdown")
                .trigger("shutdown")
                .replies(["Shutting down. Bye!"])
                .requires_admin()
                .build()?,
        )
        .rule(
            Rule::builder("greet")
                .triggers(["hello", "hi|hey"])
                .replies(["Hi!", "Hello there!", "Hey :)"])
                .build()?,
        )
        .rule(
            Rule::builder("echo")
                .trigger(r"echo (.+)")
                .respond_with(|user: &Sender, _, m| {
                    let text = m.get(1).unwrap_or_default().to_owned();
                    let name = user.name().to_owned();
                    replies([format!("{name} says:"), text])
                })
                .build()?,
        )
        .build()?;

    println!("{dispatcher}");
    println!("Type messages; prefix with '!' to speak as an admin. Ctrl-D quits.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let (user, message) = match line.strip_prefix('!') {
            Some(rest) => (Sender::admin("admin"), rest.to_owned()),
            None => (Sender::new("guest"), line),
        };

        for stream in dispatcher.respond(&user, &message, DispatchMode::First)? {
            for reply in stream {
                writeln!(stdout, "> {}", reply?)?;
            }
        }
    }
    Ok(())
}
