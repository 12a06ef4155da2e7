use criterion::{criterion_group, criterion_main, Criterion};
use memtable::Memtable;

const N_KEYS: u64 = 10_000;
const VALUE_SIZE: usize = 100;

fn memtable_put_benchmark(c: &mut Criterion) {
    c.bench_function("memtable_put_10k", |b| {
        b.iter(|| {
            let mut mem = Memtable::new();
            for k in 0..N_KEYS {
                mem.put(k, vec![b'x'; VALUE_SIZE]);
            }
            mem
        });
    });
}

fn memtable_get_benchmark(c: &mut Criterion) {
    let mut mem = Memtable::new();
    for k in 0..N_KEYS {
        mem.put(k, vec![b'x'; VALUE_SIZE]);
    }

    c.bench_function("memtable_get_10k", |b| {
        b.iter(|| {
            for k in 0..N_KEYS {
                assert!(mem.get(k).is_some());
            }
        });
    });
}

criterion_group!(benches, memtable_put_benchmark, memtable_get_benchmark);
criterion_main!(benches);
