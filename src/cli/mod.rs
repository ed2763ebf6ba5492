//! CLI support for zinc-ast
//!
//! Provides programmatic access to the `zinc` commands so other tools can
//! embed them without going through the binary.

mod check;
mod docs;
mod print;

pub use check::{CheckOptions, CheckReport, execute_check};
pub use docs::{DocOptions, execute_doc};
pub use print::execute_print;

use std::io;

use thiserror::Error;

use crate::ast::ModelError;
use crate::doc::DocError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Model could not be loaded
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Documentation could not be extracted
    #[error("Documentation error: {0}")]
    Doc(#[from] DocError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No model provided. Pass a model file or pipe JSON to stdin.")]
    NoInput,
}
