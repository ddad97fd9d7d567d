use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, Criterion};
use keyreply::{DispatchMode, Dispatcher, Rule, Sender};

fn build_shared_dispatcher() -> Arc<Dispatcher<Sender>> {
    let mut builder = Dispatcher::builder();
    let n = 20;

    for i in 0..n {
        builder = builder.rule(
            Rule::builder(&format!("r{i}"))
                .trigger(&format!("word{i}"))
                .replies(["a", "b", "c"])
                .build()
                .unwrap(),
        );
    }

    Arc::new(builder.build().unwrap())
}

fn bench_throughput(c: &mut Criterion) {
    let thread_counts = [1, 2, 4, 8];

    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(5));

    for &threads in &thread_counts {
        let dispatcher = build_shared_dispatcher();

        group.bench_function(&format!("{threads}_threads"), |b| {
            b.iter_custom(|iters| {
                let per_thread = iters / threads as u64;
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let d = Arc::clone(&dispatcher);
                        thread::spawn(move || {
                            let user = Sender::new(format!("t{t}"));
                            let message = "somebody said word19 just now";
                            let start = Instant::now();
                            for _ in 0..per_thread {
                                let replies = d.respond(&user, message, DispatchMode::First);
                                let _ = replies.map(|s| s.into_iter().flatten().count());
                            }
                            start.elapsed()
                        })
                    })
                    .collect();

                let mut max_elapsed = Duration::ZERO;
                for h in handles {
                    let elapsed = h.join().unwrap();
                    if elapsed > max_elapsed {
                        max_elapsed = elapsed;
                    }
                }
                max_elapsed
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);
