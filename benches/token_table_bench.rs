use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use token_table::{LookupMode, TableConfig, TokenTable};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(mode: LookupMode, n: usize) -> (TokenTable, Vec<String>) {
    let cfg = TableConfig::new().with_lookup(mode);
    let mut t = TokenTable::with_config(cfg).unwrap();
    let keys: Vec<String> = lcg(7).take(n).map(key).collect();
    for k in &keys {
        if !t.contains(k) {
            t.insert(k).unwrap();
        }
    }
    (t, keys)
}

fn bench_insert(c: &mut Criterion) {
    for n in [67usize, 200] {
        let keys: Vec<String> = lcg(1).take(n).map(key).collect();
        c.bench_function(&format!("token_table::insert_{n}"), |b| {
            b.iter_batched(
                TokenTable::new,
                |mut t| {
                    for k in &keys {
                        if !t.contains(k) {
                            let _ = t.insert(k).unwrap();
                        }
                    }
                    black_box(t)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_lookup(c: &mut Criterion) {
    for (name, mode) in [
        ("redirected", LookupMode::Redirected),
        ("faithful", LookupMode::Faithful),
    ] {
        let (t, keys) = filled(mode, 200);
        c.bench_function(&format!("token_table::contains_hit_{name}"), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(t.contains(k));
                }
            })
        });

        let misses: Vec<String> = lcg(0xdead_beef).take(200).map(key).collect();
        c.bench_function(&format!("token_table::contains_miss_{name}"), |b| {
            b.iter(|| {
                for k in &misses {
                    black_box(t.contains(k));
                }
            })
        });
    }
}

criterion_group!(benches, bench_insert, bench_lookup);
criterion_main!(benches);
