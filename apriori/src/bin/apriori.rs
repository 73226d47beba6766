use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use apriori::config::{DEFAULT_MIN_SUPPORT, DEFAULT_OUT_FILE, MinerConfig, Variant};

#[derive(Parser)]
#[command(name = "apriori")]
#[command(about = "Frequent itemset mining with the Apriori level-wise algorithm")]
#[command(long_about = "Frequent itemset mining with the Apriori level-wise algorithm.

The input file starts with the number of transactions on its first line. Every
following line is tab-separated: transaction id, number of items, and the
space-separated item ids.")]
#[command(version)]
struct Cli {
    /// Input transaction database
    #[arg(short = 'i', long = "in_file")]
    in_file: PathBuf,

    /// Output file for the frequent patterns
    #[arg(short = 'o', long = "out_file", default_value = DEFAULT_OUT_FILE)]
    out_file: PathBuf,

    /// Minimum support threshold as a fraction of all transactions, in [0, 1]
    #[arg(short = 'm', long = "min_supp", default_value_t = DEFAULT_MIN_SUPPORT)]
    min_supp: f64,

    /// Counting strategy
    #[arg(long, value_enum, default_value_t = Variant::Classic)]
    variant: Variant,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    apriori::logging::init(cli.verbose);

    let config = MinerConfig::new(cli.in_file)
        .with_output(cli.out_file)
        .with_min_support(cli.min_supp)
        .with_variant(cli.variant);

    let summary = apriori::ap::run(&config)
        .with_context(|| format!("mining {} failed", config.input.display()))?;

    println!("|FPs| = {}", summary.patterns.total());
    Ok(())
}
