//! Grover command implementation.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use qsim_algos::Grover;
use qsim_engine::sample_counts;

use super::common::{
    OutputFormat, bitstring, build_simulator, check_register, make_rng, print_counts,
};
use crate::config::Config;

#[derive(Debug, Serialize)]
struct CountEntry {
    outcome: usize,
    bitstring: String,
    count: u64,
}

#[derive(Debug, Serialize)]
struct GroverReport {
    simulator: String,
    qubits: usize,
    target: usize,
    iterations: usize,
    success_probability: f64,
    shots: u64,
    most_frequent: Option<usize>,
    counts: Vec<CountEntry>,
}

/// Execute the grover command.
pub fn execute(
    config: &Config,
    qubits: usize,
    target: usize,
    shots: u64,
    format: OutputFormat,
) -> Result<()> {
    check_register(qubits.saturating_add(1), config)?;
    let sim = build_simulator(config);
    let mut rng = make_rng(config);

    let mut grover = Grover::new(sim.as_ref(), qubits, target)
        .with_context(|| format!("Failed to set up Grover search over {qubits} qubits"))?;

    let progress = if format == OutputFormat::Text {
        println!(
            "{} Searching for {} among {} states on the {} simulator",
            style("→").cyan().bold(),
            style(bitstring(target, qubits)).green(),
            1usize << qubits,
            style(sim.name()).yellow()
        );
        let bar = ProgressBar::new(grover.required() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {bar:30.cyan/blue} {pos}/{len} iterations {msg}")?,
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    while !grover.is_done() {
        grover.step()?;
        let p = grover.success_probability()?;
        progress.set_message(format!("P(target) = {p:.4}"));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let success_probability = grover.success_probability()?;
    let counts = sample_counts(sim.as_ref(), &grover.state()?, shots, &mut rng)?;

    match format {
        OutputFormat::Text => {
            println!(
                "  {} iterations, target probability {}",
                grover.iterations(),
                style(format!("{:.4}", success_probability)).yellow()
            );
            print_counts(&counts, qubits, Some(target));
            if counts.most_frequent() == Some(target) {
                println!("\n  {} Found target {}", style("✓").green().bold(), target);
            } else {
                println!(
                    "\n  {} Most frequent outcome was not the target",
                    style("!").red().bold()
                );
            }
        }
        OutputFormat::Json => {
            let report = GroverReport {
                simulator: sim.name().to_string(),
                qubits,
                target,
                iterations: grover.iterations(),
                success_probability,
                shots: counts.total(),
                most_frequent: counts.most_frequent(),
                counts: counts
                    .sorted()
                    .into_iter()
                    .map(|(outcome, count)| CountEntry {
                        outcome,
                        bitstring: bitstring(outcome, qubits),
                        count,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_search_is_an_error() {
        let config = Config::default();
        for qubits in [24, usize::MAX] {
            let err = execute(&config, qubits, 0, 1, OutputFormat::Json).unwrap_err();
            assert!(err.to_string().contains("exceeds the configured limit"));
        }
    }
}
