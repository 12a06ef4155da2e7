use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use fs::{Filesystem, OsFilesystem};
use tempfile::tempdir;
use wal::Wal;

const N_KEYS: u64 = 10_000;
const VALUE_SIZE: usize = 100;

fn wal_put_benchmark(c: &mut Criterion) {
    c.bench_function("wal_put_10k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let fs = OsFilesystem::open(dir.path()).unwrap();
                let file = fs.create("bench.log").unwrap();
                (dir, Wal::new(file))
            },
            |(_dir, mut wal)| {
                for k in 0..N_KEYS {
                    wal.put(k, vec![b'x'; VALUE_SIZE]).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn wal_recover_benchmark(c: &mut Criterion) {
    c.bench_function("wal_recover_10k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let fs = OsFilesystem::open(dir.path()).unwrap();
                let file = fs.create("bench.log").unwrap();
                let mut wal = Wal::new(file);
                for k in 0..N_KEYS {
                    wal.put(k, vec![b'x'; VALUE_SIZE]).unwrap();
                }
                wal.sync().unwrap();
                drop(wal);
                (dir, fs)
            },
            |(_dir, fs)| {
                let log_file = fs.open("bench.log").unwrap();
                let txns = wal::LogReader::recover_txns(&log_file).unwrap();
                let mut total = 0;
                for txn in txns {
                    total += wal::decode_batch(&txn).unwrap().len();
                }
                assert_eq!(total as u64, N_KEYS);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, wal_put_benchmark, wal_recover_benchmark);
criterion_main!(benches);
