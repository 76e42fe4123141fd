//! Qasm command implementation.

use anyhow::{Context, Result, bail};
use console::style;

use qsim_algos::grover::iterate_circuit;
use qsim_algos::qft;
use qsim_ir::composite::{adder, c_not, toffoli};
use qsim_ir::{Circuit, qasm};

use super::common::check_register;
use crate::config::Config;

/// Execute the qasm command.
pub fn execute(config: &Config, circuit: &str, output: Option<&str>) -> Result<()> {
    let built = build_circuit(circuit, config)?;
    let source = qasm::emit(&built);

    match output {
        Some(path) => {
            std::fs::write(path, &source)
                .with_context(|| format!("Failed to write output file: {path}"))?;
            println!(
                "{} Wrote {} gates on {} qubits to {}",
                style("✓").green().bold(),
                built.len(),
                built.num_qubits(),
                style(path).cyan()
            );
        }
        None => print!("{source}"),
    }

    Ok(())
}

/// Build one of the named demonstration circuits.
///
/// Accepts `cnot`, `toffoli`, `adder`, `qft:W` and `grover:N:T`. The
/// register width is checked against the configured limit before any
/// gates are generated.
pub fn build_circuit(name: &str, config: &Config) -> Result<Circuit> {
    let mut parts = name.split(':');
    let kind = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    let circuit = match (kind.as_str(), args.as_slice()) {
        ("cnot", []) => {
            check_register(2, config)?;
            c_not(0u32, 1u32)
        }
        ("toffoli", []) => {
            check_register(3, config)?;
            toffoli(0u32, 1u32, 2u32)?
        }
        ("adder", []) => {
            check_register(3, config)?;
            adder(0u32, 1u32, 2u32)?
        }
        ("qft", [width]) => {
            let width: u32 = width
                .parse()
                .with_context(|| format!("Invalid QFT width: '{width}'"))?;
            check_register(width as usize, config)?;
            qft(width, false)
        }
        ("grover", [n, target]) => {
            let n: usize = n
                .parse()
                .with_context(|| format!("Invalid qubit count: '{n}'"))?;
            let target: usize = target
                .parse()
                .with_context(|| format!("Invalid target: '{target}'"))?;
            check_register(n.saturating_add(1), config)?;
            iterate_circuit(n, target)?
        }
        _ => bail!(
            "Unknown circuit: '{name}'. Expected one of: cnot, toffoli, adder, qft:W, grover:N:T"
        ),
    };

    Ok(circuit)
}
