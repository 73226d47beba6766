use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::error;

use apriori::ap::sweep::{jobs, run_sweep, thresholds};
use apriori::config::Variant;

#[derive(Parser)]
#[command(name = "apriori-sweep")]
#[command(about = "Time mining runs over a grid of support thresholds, in parallel")]
#[command(version)]
struct Cli {
    /// Input transaction database
    #[arg(short = 'i', long = "in_file")]
    in_file: PathBuf,

    /// First threshold of the grid
    #[arg(long, default_value_t = 0.01)]
    start: f64,

    /// End of the grid (exclusive)
    #[arg(long, default_value_t = 1.0)]
    stop: f64,

    /// Number of thresholds in the grid
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Variant(s) to run at every threshold (defaults to all)
    #[arg(long, value_enum)]
    variant: Vec<Variant>,

    /// Timing table output
    #[arg(long, default_value = "performance_results.csv")]
    csv: PathBuf,

    /// Also write every run's patterns into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    apriori::logging::init(cli.verbose);

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let variants = if cli.variant.is_empty() {
        Variant::ALL.to_vec()
    } else {
        cli.variant.clone()
    };
    let jobs = jobs(&thresholds(cli.start, cli.stop, cli.steps), &variants);
    let results = run_sweep(&cli.in_file, &jobs, cli.out_dir.as_deref());

    let file = File::create(&cli.csv)
        .with_context(|| format!("failed to create {}", cli.csv.display()))?;
    let mut csv = BufWriter::new(file);
    writeln!(csv, "program,data_file,min_sup,run_time,patterns")?;

    let data_file = cli.in_file.display();
    let mut failures = 0;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(record) => writeln!(
                csv,
                "{},{},{},{},{}",
                job.variant,
                data_file,
                job.min_support,
                record.elapsed.as_secs_f64(),
                record.patterns
            )?,
            Err(err) => {
                error!("{} at {}: {err}", job.variant, job.min_support);
                failures += 1;
            }
        }
    }
    csv.flush()?;

    if failures > 0 {
        bail!("{failures} of {} runs failed", jobs.len());
    }
    Ok(())
}
