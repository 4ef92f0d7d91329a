//! Clap derive structures for the provider harness.
//!
//! Each subcommand maps onto one provider call. Documents are JSON files;
//! `-` reads standard input.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// Drive the JumpCloud Terraform provider from JSON documents
#[derive(Debug, Parser)]
#[command(
    name = "terraform-provider-jumpcloud",
    version,
    about = "JumpCloud Terraform provider",
    long_about = "Drives the JumpCloud Terraform provider's schema, validate, plan, apply,\n\
        read and import calls from JSON documents, printing JSON responses.\n\n\
        Unknown values are written as 74D93920-ED26-11E3-AC10-0800200C9A66.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Provider configuration block as JSON (e.g. {"api_key": "..."})
    #[arg(long, global = true, value_name = "FILE")]
    pub provider_config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv); TF_LOG_PROVIDER_JUMPCLOUD takes precedence
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print compact single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the provider and resource schemas
    Schema,

    /// Validate a resource configuration without contacting the API
    Validate(ConfigArgs),

    /// Compute the planned state for a resource configuration
    Plan(PlanArgs),

    /// Create, update or delete a resource
    Apply(ApplyArgs),

    /// Refresh a resource's state from the API
    Read(ReadArgs),

    /// Start tracking an existing resource by id
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Resource type (jumpcloud_ad, jumpcloud_devicegroup, jumpcloud_usergroup)
    pub resource_type: String,

    /// Resource configuration
    #[arg(long, value_name = "FILE", default_value = "-")]
    pub config: PathBuf,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Prior state; omit to plan a create
    #[arg(long, value_name = "FILE")]
    pub prior: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Resource type
    pub resource_type: String,

    /// Prior state; omit to create
    #[arg(long, value_name = "FILE")]
    pub prior: Option<PathBuf>,

    /// Planned state; omit to delete
    #[arg(long, value_name = "FILE")]
    pub planned: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Resource type
    pub resource_type: String,

    /// Current state
    #[arg(long, value_name = "FILE", default_value = "-")]
    pub state: PathBuf,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Resource type
    pub resource_type: String,

    /// JumpCloud id of the existing resource
    pub id: String,
}
