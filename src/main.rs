use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mnist-reference")]
#[command(about = "Cleartext reference inference for the MNIST digit classifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the network against a labeled test set.
    Evaluate {
        /// IDX image file.
        #[arg(long)]
        images: PathBuf,
        /// IDX label file.
        #[arg(long)]
        labels: PathBuf,
        /// Directory holding the per-layer weight/bias text files.
        #[arg(short, long)]
        weights: PathBuf,
        /// Number of samples to evaluate, from the start of the set.
        #[arg(short, long, default_value_t = 100)]
        count: usize,
        /// Also emit the aggregate report as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Print the logits for a single sample.
    Predict {
        /// IDX image file.
        #[arg(long)]
        images: PathBuf,
        /// Optional IDX label file, to print the true label alongside.
        #[arg(long)]
        labels: Option<PathBuf>,
        /// Directory holding the per-layer weight/bias text files.
        #[arg(short, long)]
        weights: PathBuf,
        /// Zero-based sample index.
        #[arg(short, long)]
        index: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            images,
            labels,
            weights,
            count,
            json,
        } => mnist_reference::runner::evaluate::run(&images, &labels, &weights, count, json),
        Commands::Predict {
            images,
            labels,
            weights,
            index,
        } => mnist_reference::runner::predict::run(&images, labels.as_deref(), &weights, index),
    }
}
