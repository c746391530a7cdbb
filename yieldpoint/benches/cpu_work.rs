use criterion::{Criterion, criterion_group, criterion_main};
use yieldpoint::work::run_cpu_bound_work;

fn bench_cpu_bound_work(c: &mut Criterion) {
    let mut group = c.benchmark_group("work");
    group.sample_size(10);
    group.bench_function("run_cpu_bound_work", |b| b.iter(run_cpu_bound_work));
    group.finish();
}

criterion_group!(benches, bench_cpu_bound_work);
criterion_main!(benches);
