//! Benchmarks for stage resolution and orchestrated runs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nitro::events::NotificationChannel;
use nitro::prelude::*;
use nitro::testing::StaticAction;
use std::sync::Arc;

fn bench_registries(stages: usize) -> (Arc<Registries>, Vec<String>) {
    let registries = Registries::new();
    registries
        .actions()
        .register("noop", Arc::new(StaticAction::success(true)));

    let mut names = Vec::with_capacity(stages);
    for i in 0..stages {
        let name = format!("stage_{i}");
        let previous = i.checked_sub(1).map(|p| format!("stage_{p}"));
        let stage_name = name.clone();
        registries.stages().register(name.clone(), move |_: &Params| {
            let def = StageDefinition::new(stage_name.clone(), "noop");
            match &previous {
                Some(dep) => def.depends_on(dep.clone()),
                None => def,
            }
        });
        names.push(name);
    }
    (Arc::new(registries), names)
}

fn resolve_benchmark(c: &mut Criterion) {
    let (registries, names) = bench_registries(50);
    let params = Params::new();

    c.bench_function("resolve_50_stages", |b| {
        b.iter(|| black_box(registries.stages().resolve(&names, &params)));
    });
}

fn run_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let (registries, names) = bench_registries(50);

    c.bench_function("run_50_chained_stages", |b| {
        b.iter(|| {
            let mut run = Orchestrator::new(names.iter().cloned(), Params::new())
                .with_registries(Arc::clone(&registries))
                .with_channel(Arc::new(NotificationChannel::new()));
            black_box(runtime.block_on(run.execute()).unwrap())
        });
    });
}

criterion_group!(benches, resolve_benchmark, run_benchmark);
criterion_main!(benches);
