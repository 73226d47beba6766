use std::io::{BufWriter, Write};
use std::time::Instant;

use rand::Rng;
use tempfile::NamedTempFile;

use apriori::ap::{Transaction, TransactionDb, mine};
use apriori::config::Variant;

fn generate_db_file(
    num_transactions: usize,
    num_items: i64,
    avg_transaction_size: usize,
    density: f64,
) -> NamedTempFile {
    let mut rng = rand::thread_rng();
    let file = NamedTempFile::new().unwrap();
    let mut out = BufWriter::new(file.as_file());
    writeln!(out, "{num_transactions}").unwrap();

    for tid in 0..num_transactions {
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
        writeln!(out, "{}", Transaction::new(tid as i64 + 1, items).to_line()).unwrap();
    }

    out.flush().unwrap();
    drop(out);
    file
}

fn time_variant(file: &NamedTempFile, min_support: f64, variant: Variant) -> Option<(f64, usize, usize)> {
    let start = Instant::now();
    match mine(TransactionDb::from_path(file.path()), min_support, variant) {
        Ok(result) => Some((start.elapsed().as_secs_f64(), result.total(), result.max_level())),
        Err(err) => {
            println!("  ✗ {variant} failed: {err}");
            None
        }
    }
}

fn stress_test_classic_vs_rmtid() {
    println!("\n=== Classic vs RmTID ===");

    let configs = vec![
        ("5K x 50", 5_000, 50, 10),
        ("10K x 100", 10_000, 100, 15),
        ("20K x 150", 20_000, 150, 20),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        println!("\nDataset: {}", name);
        let file = generate_db_file(num_tx, num_items, avg_size, 0.7);
        let min_support = 0.02;

        let classic = time_variant(&file, min_support, Variant::Classic);
        let rmtid = time_variant(&file, min_support, Variant::Rmtid);

        if let (Some(classic), Some(rmtid)) = (classic, rmtid) {
            println!("  Classic: {:.3}s, {} patterns, max level {}", classic.0, classic.1, classic.2);
            println!("  RmTID:   {:.3}s, {} patterns, max level {}", rmtid.0, rmtid.1, rmtid.2);
            if classic.1 != rmtid.1 {
                println!("  ⚠ Pattern counts differ!");
            }
            let speedup = classic.0 / rmtid.0;
            println!("  Speedup: {:.2}x", speedup);
        }
    }
}

fn stress_test_low_support() {
    println!("\n=== Low Support Test ===");

    let file = generate_db_file(5_000, 60, 12, 0.6);

    for &min_support in &[0.1, 0.05, 0.02, 0.01] {
        println!("\nTesting min_support = {}", min_support);
        for variant in Variant::ALL {
            if let Some((elapsed, patterns, max_level)) = time_variant(&file, min_support, variant) {
                println!("  {variant}: {elapsed:.3}s, {patterns} patterns, max level {max_level}");
                if patterns > 1_000_000 {
                    println!("  ⚠ Pattern explosion detected!");
                }
            }
        }
    }
}

fn main() {
    println!("=== Apriori Stress Testing Suite ===");

    stress_test_classic_vs_rmtid();
    stress_test_low_support();

    println!("\n=== Stress Testing Complete ===");
}
