//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const DIAGNOSTICS: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────

    #[error("Could not read {path}")]
    #[diagnostic(code(jumpcloud::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON")]
    #[diagnostic(
        code(jumpcloud::invalid_json),
        help("Documents are JSON objects keyed by attribute name. Use null for an absent document.")
    )]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ── Provider ─────────────────────────────────────────────────────

    #[error("Provider configuration failed")]
    #[diagnostic(
        code(jumpcloud::configure),
        help(
            "{report}\n\
             Set api_key with --provider-config or the JUMPCLOUD_API_KEY environment variable."
        )
    )]
    Configure { report: String },

    #[error("{count} error diagnostic(s) reported")]
    #[diagnostic(code(jumpcloud::diagnostics), help("{report}"))]
    Diagnostics { count: usize, report: String },

    // ── Output ───────────────────────────────────────────────────────

    #[error("Could not write the response")]
    #[diagnostic(code(jumpcloud::output))]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } | Self::InvalidJson { .. } => exit_code::USAGE,
            Self::Configure { .. } => exit_code::AUTH,
            Self::Diagnostics { .. } => exit_code::DIAGNOSTICS,
            Self::Output(_) => exit_code::GENERAL,
        }
    }
}
