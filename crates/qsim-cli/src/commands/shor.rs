//! Shor command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qsim_algos::{PeriodFinder, Shor};

use super::common::{OutputFormat, build_simulator, check_register, make_rng};
use crate::config::Config;

/// Execute the shor command.
pub fn execute(
    config: &Config,
    number: u64,
    max_attempts: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let mut shor = Shor::new(number)?;
    if let Some(attempts) = max_attempts {
        shor = shor.with_max_attempts(attempts);
    }

    let sim = build_simulator(config);
    let width = PeriodFinder::new(sim.as_ref(), number)?.register_qubits();
    check_register(width, config)?;
    let mut rng = make_rng(config);

    let spinner = if format == OutputFormat::Text {
        println!(
            "{} Factorising {} with a {}-qubit register on the {} simulator",
            style("→").cyan().bold(),
            style(number).green(),
            width,
            style(sim.name()).yellow()
        );
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        spinner.set_message("Finding period...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    } else {
        ProgressBar::hidden()
    };

    let result = shor.factor(sim.as_ref(), &mut rng);
    spinner.finish_and_clear();
    let result = result.with_context(|| format!("Failed to factorise {number}"))?;

    match format {
        OutputFormat::Text => {
            println!(
                "\n{} {} = {} × {}",
                style("✓").green().bold(),
                result.n,
                style(result.p).cyan().bold(),
                style(result.q).cyan().bold()
            );
            println!("  Base:     {}", result.base);
            match result.period {
                Some(period) => println!("  Period:   {period}"),
                None => println!("  Period:   {}", style("(base shares a factor)").dim()),
            }
            println!("  Attempts: {}", result.attempts);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}
