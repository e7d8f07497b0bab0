//! Training CLI: runs TD-Lambda self-play and exports `weights.bin`.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ntuple_core::eval::NTupleNetwork;
use ntuple_core::model;
use ntuple_core::pattern::PATTERNS;
use ntuple_core::trainer::{TdLambdaTrainer, TrainerConfig};

#[derive(Parser, Debug)]
#[command(about = "Train Reversi N-Tuple weights by TD-Lambda self-play")]
struct Cli {
    /// Number of self-play games.
    #[arg(long, default_value = "500000")]
    games: u32,

    /// Learning rate.
    #[arg(long, default_value = "0.01")]
    alpha: f64,

    /// Eligibility trace decay.
    #[arg(long, default_value = "0.7")]
    lambda: f64,

    /// Exploration rate for self-play.
    #[arg(long, default_value = "0.1")]
    epsilon: f64,

    /// Output model path.
    #[arg(short, long, default_value = "weights.bin")]
    output: PathBuf,

    /// Random seed for reproducible training runs.
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn run(args: Cli) -> Result<()> {
    println!(
        "Training with games={}, alpha={}, lambda={}, epsilon={}, seed={}",
        args.games, args.alpha, args.lambda, args.epsilon, args.seed
    );

    let config = TrainerConfig {
        alpha: args.alpha,
        lambda: args.lambda,
        epsilon: args.epsilon,
        seed: args.seed,
    };
    let mut trainer = TdLambdaTrainer::new(NTupleNetwork::new(), config)?;

    let bar = ProgressBar::new(u64::from(args.games));
    bar.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40} {pos}/{len} games",
    )?);
    for _ in 0..args.games {
        trainer.play_one_game()?;
        bar.inc(1);
    }
    bar.finish();

    let network = trainer.into_network();
    let payload = model::export(&network)?;

    if let Some(parent) = args.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&args.output, &payload)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    // Read the file back and verify before reporting success; a model that
    // fails verification is removed rather than left looking valid.
    let written = fs::read(&args.output)
        .with_context(|| format!("failed to read back {}", args.output.display()))?;
    if let Err(err) = model::verify(&written, &PATTERNS) {
        let _ = fs::remove_file(&args.output);
        return Err(err.into());
    }

    println!("Model exported and verified: {}", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Cli::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
