//! Trajgen CLI - command line tools for the trajectory generator.
//!
//! Binaries:
//! - trajgen: generate, rank and export candidates locally
//! - trajgen-request: ask a running server for ranked candidates

pub mod export;
pub mod pipeline;
pub mod report;

pub use export::write_csv;
pub use pipeline::{run, RunOptions, RunOutput};
