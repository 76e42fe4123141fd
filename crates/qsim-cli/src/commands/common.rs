//! Shared helpers for CLI commands.

use anyhow::{Result, bail};
use clap::ValueEnum;
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use qsim_engine::{Counts, Simulator};

use crate::config::Config;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled text with a histogram
    #[default]
    Text,
    /// A single JSON document on stdout
    Json,
}

/// Build the simulator selected by the configuration.
pub fn build_simulator(config: &Config) -> Box<dyn Simulator> {
    config
        .simulator
        .kind
        .build(config.simulator.engine.clone())
}

/// Random source: seeded when the configuration asks for reproducibility.
pub fn make_rng(config: &Config) -> StdRng {
    match config.seed {
        Some(seed) => {
            info!(seed, "using seeded random source");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Fail early when a command would allocate more qubits than allowed.
pub fn check_register(qubits: usize, config: &Config) -> Result<()> {
    if qubits > config.limits.max_qubits {
        bail!(
            "register of {qubits} qubits exceeds the configured limit of {}",
            config.limits.max_qubits
        );
    }
    Ok(())
}

/// Render an outcome as a bitstring, most significant qubit first.
pub fn bitstring(outcome: usize, width: usize) -> String {
    format!("{outcome:0width$b}")
}

/// Print a measurement histogram.
pub fn print_counts(counts: &Counts, width: usize, highlight: Option<usize>) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total()
    );

    let sorted = counts.sorted();
    let total = counts.total() as f64;

    for (outcome, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);
        let label = bitstring(*outcome, width);
        let label = if highlight == Some(*outcome) {
            style(label).yellow().bold()
        } else {
            style(label).cyan()
        };

        println!(
            "  {} ({:>3}): {:>6} ({:>5.2}%) {}",
            label,
            outcome,
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}
