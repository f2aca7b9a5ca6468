//! Console driver for the identity search.
//!
//! `search` runs the open-ended equivalence hunt, printing one line per
//! accepted identity; `demo` prints a finite sample of the expression
//! stream evaluated under a single random context.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use aequatio::context::Context;
use aequatio::generator::ExpressionGenerator;
use aequatio::report::{CsvFormatter, PrettyFormatter};
use aequatio::search::{IdentitySearch, SearchConfig};
use aequatio::utils::json::save_json;

/// CLI arguments for the identity search
#[derive(Parser, Debug)]
#[command(author, version, about = "Discover candidate algebraic identities by sampled evaluation", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for expression pairs that agree on random samples
    Search(SearchArgs),
    /// Print generated expressions evaluated under one random context
    Demo(DemoArgs),
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Stop after this many accepted identities
    #[arg(short, long)]
    limit: Option<usize>,

    /// Stop after examining this many candidate pairs
    #[arg(long)]
    max_pairs: Option<u64>,

    /// Random contexts evaluated per candidate pair
    #[arg(long, default_value_t = 5)]
    samples: usize,

    /// Seed for deterministic sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Print a summary table when the run finishes
    #[arg(long)]
    summary: bool,

    /// Output CSV file path for accepted identities
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output JSON file path for accepted identities
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct DemoArgs {
    /// Number of expressions to print
    #[arg(short, long, default_value_t = 200)]
    count: usize,

    /// Seed for deterministic sampling
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Search(args) => run_search(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_search(args: SearchArgs) -> Result<()> {
    let config = SearchConfig::default()
        .with_samples(args.samples)
        .with_max_pairs(args.max_pairs);
    let mut search = IdentitySearch::new(config, rng_from_seed(args.seed));

    let mut discoveries = Vec::new();
    for discovery in &mut search {
        println!("{}", discovery.equation().to_string().green());
        discoveries.push(discovery);
        if args.limit.is_some_and(|limit| discoveries.len() >= limit) {
            break;
        }
    }

    println!(
        "Examined {} candidate pairs, accepted {} identities.",
        search.pairs_examined(),
        discoveries.len()
    );

    if args.summary {
        println!("{}", PrettyFormatter::format(&discoveries));
    }
    if let Some(path) = &args.csv {
        fs::write(path, CsvFormatter::format(&discoveries))?;
        println!("Saved CSV results to {:?}", path);
    }
    if let Some(path) = &args.json {
        save_json(&discoveries, path)?;
        println!("Saved JSON results to {:?}", path);
    }

    Ok(())
}

fn run_demo(args: DemoArgs) -> Result<()> {
    let config = SearchConfig::default();
    let mut rng = rng_from_seed(args.seed);
    let context = Context::random(config.symbol_count, config.value_range, &mut rng);
    println!("{context}");

    for expression in ExpressionGenerator::new().take(args.count) {
        println!("{} {}", expression, context.evaluate(&expression));
    }

    Ok(())
}
