//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - gather/scatter state-vector quantum simulation",
        style("qsim").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsim-ir      Hadamard/controlled-phase circuits and composites");
    println!("  qsim-engine  State vectors, operator application, measurement");
    println!("  qsim-algos   Grover search, QFT, Shor factorisation");
    println!("  qsim-cli     Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
