//! qsim Command-Line Interface
//!
//! Runs Grover search and Shor factorisation on the qsim state-vector
//! simulators and exports the demonstration circuits as qasm2circ text.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qsim_engine::SimulatorKind;

mod commands;
mod config;

use commands::common::OutputFormat;
use commands::{grover, qasm, shor, version};
use config::Config;

/// qsim - gather/scatter quantum circuit simulation
#[derive(Parser)]
#[command(name = "qsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, env = "QSIM_CONFIG", global = true)]
    config: Option<String>,

    /// Seed for reproducible runs
    #[arg(long, env = "QSIM_SEED", global = true)]
    seed: Option<u64>,

    /// Simulator implementation (matrix, bitwise)
    #[arg(long, global = true)]
    simulator: Option<SimulatorKind>,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a marked basis state with Grover's algorithm
    Grover {
        /// Number of search qubits
        #[arg(short = 'n', long)]
        qubits: usize,

        /// Marked basis state
        #[arg(short, long)]
        target: usize,

        /// Number of shots to sample from the final state
        #[arg(short, long, default_value = "1024")]
        shots: u64,
    },

    /// Factorise a composite number with Shor's algorithm
    Shor {
        /// Number to factorise
        #[arg(short, long)]
        number: u64,

        /// Give up after this many random bases
        #[arg(long)]
        max_attempts: Option<usize>,
    },

    /// Print a demonstration circuit as qasm2circ source
    Qasm {
        /// Circuit: cnot, toffoli, adder, qft:W or grover:N:T
        circuit: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

/// Load configuration and apply command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(kind) = cli.simulator {
        config.simulator.kind = kind;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        version::execute();
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Grover {
            qubits,
            target,
            shots,
        } => grover::execute(&config, qubits, target, shots, cli.format),

        Commands::Shor {
            number,
            max_attempts,
        } => shor::execute(&config, number, max_attempts, cli.format),

        Commands::Qasm { circuit, output } => qasm::execute(&config, &circuit, output.as_deref()),

        Commands::Version => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Handle errors
    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
