//! pgadm - An ops CLI for PostgreSQL, Patroni, pgBackRest and Pigsty.
//!
//! This library provides the core functionality for the `pgadm` binary:
//! the structured output envelopes (Report/Plan), the stable exit-code
//! registry, the legacy console-capture bridge, the command annotation
//! schema, and the thin wrappers around the external admin tools.

pub mod ancs;
pub mod bridge;
pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod sys;

/// Library-level error type for pgadm operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    CommandFailed(String),

    /// A failure that already carries its process exit code.
    ///
    /// Produced at the dispatch boundary from a failed [`output::Report`];
    /// `main` honors the code verbatim instead of the generic exit 1.
    #[error("{message}")]
    Exit { code: i32, message: String },
}

impl Error {
    /// Process exit code for this error: the embedded code for
    /// [`Error::Exit`], 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Exit { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Result type alias for pgadm operations.
pub type Result<T> = std::result::Result<T, Error>;
