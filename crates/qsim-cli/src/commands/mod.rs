//! CLI command implementations.

pub mod common;
pub mod grover;
pub mod qasm;
pub mod shor;
pub mod version;
