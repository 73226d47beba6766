use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::Rng;

use apriori::ap::store::MemorySource;
use apriori::ap::{Transaction, TransactionDb, mine};
use apriori::config::Variant;

/// Synthetic transaction database held in memory.
///
/// Parameters:
/// - num_transactions: Number of transactions
/// - num_items: Total number of possible items
/// - avg_transaction_size: Average items per transaction
/// - density: Chance that each drawn item is kept (0.0-1.0)
fn generate_db(
    num_transactions: usize,
    num_items: i64,
    avg_transaction_size: usize,
    density: f64,
) -> TransactionDb<MemorySource> {
    let mut rng = rand::thread_rng();
    let transactions: Vec<Transaction> = (0..num_transactions)
        .map(|tid| {
            let random_factor: f64 = rng.r#gen();
            let size = (avg_transaction_size as f64 * (0.5 + random_factor)).round() as usize;
            let mut items = Vec::with_capacity(size);
            for _ in 0..size {
                let density_check: f64 = rng.r#gen();
                if density_check < density {
                    items.push(rng.gen_range(0..num_items));
                }
            }
            if items.is_empty() {
                items.push(rng.gen_range(0..num_items));
            }
            Transaction::new(tid as i64 + 1, items)
        })
        .collect();
    TransactionDb::from_transactions(&transactions)
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("apriori_scaling");
    group.sample_size(20);

    let configs = vec![
        ("small_100tx", 100, 20, 5),
        ("medium_500tx", 500, 50, 10),
        ("large_1000tx", 1000, 100, 15),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        let db = generate_db(num_tx, num_items, avg_size, 0.7);
        for variant in Variant::ALL {
            group.bench_with_input(
                BenchmarkId::new(variant.name(), name),
                &db,
                |b, db| {
                    b.iter(|| mine(black_box(db.clone()), black_box(0.1), variant));
                },
            );
        }
    }

    group.finish();
}

fn bench_min_support(c: &mut Criterion) {
    let mut group = c.benchmark_group("apriori_min_support");
    group.sample_size(20);

    let db = generate_db(1000, 50, 10, 0.7);

    for &min_sup in &[0.05, 0.1, 0.2, 0.3, 0.5] {
        for variant in Variant::ALL {
            group.bench_with_input(
                BenchmarkId::new(variant.name(), format!("{:.2}", min_sup)),
                &min_sup,
                |b, &sup| {
                    b.iter(|| mine(black_box(db.clone()), black_box(sup), variant));
                },
            );
        }
    }

    group.finish();
}

/// Sparse data is where dropping exhausted transactions pays off.
fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("apriori_density");
    group.sample_size(20);

    let densities = vec![
        ("sparse_30", 0.3),
        ("medium_50", 0.5),
        ("dense_70", 0.7),
        ("very_dense_90", 0.9),
    ];

    for (name, density) in densities {
        let db = generate_db(1000, 50, 10, density);
        for variant in Variant::ALL {
            group.bench_with_input(
                BenchmarkId::new(variant.name(), name),
                &db,
                |b, db| {
                    b.iter(|| mine(black_box(db.clone()), black_box(0.1), variant));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_scaling, bench_min_support, bench_density);
criterion_main!(benches);
