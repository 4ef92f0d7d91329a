//! Subcommand handlers. Each reads its JSON documents, makes one provider
//! call and prints the response.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value as Json};
use tokio::io::AsyncReadExt as _;

use jumpcloud_core::{ConfiguredProvider, Diagnostics, Provider, ValidateResponse};

use crate::cli::{ApplyArgs, Command, ConfigArgs, GlobalOpts, ImportArgs, PlanArgs, ReadArgs};
use crate::error::CliError;

const STDIN: &str = "-";

pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let provider = Provider::new(env!("CARGO_PKG_VERSION"));
    tracing::debug!(command = ?cmd, version = provider.version(), "dispatching command");

    match cmd {
        Command::Schema => emit(&provider.get_schema(), global),
        Command::Validate(args) => validate(&provider, &args, global).await,
        Command::Plan(args) => plan(&provider, &args, global).await,
        Command::Apply(args) => apply(&configure(&provider, global).await?, &args, global).await,
        Command::Read(args) => read(&configure(&provider, global).await?, &args, global).await,
        Command::Import(args) => import(&configure(&provider, global).await?, &args, global).await,
    }
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn validate(provider: &Provider, args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = read_document(&args.config).await?;
    let response = ValidateResponse {
        diagnostics: provider.validate_resource_config(&args.resource_type, &config),
    };
    emit(&response, global)?;
    check(&response.diagnostics)
}

async fn plan(provider: &Provider, args: &PlanArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = read_document(&args.config.config).await?;
    let prior = read_optional(args.prior.as_deref()).await?;
    let response = provider.plan_resource_change(&args.config.resource_type, &config, prior.as_ref());
    emit(&response, global)?;
    check(&response.diagnostics)
}

async fn apply(
    provider: &ConfiguredProvider,
    args: &ApplyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let prior = read_optional(args.prior.as_deref()).await?;
    let planned = read_optional(args.planned.as_deref()).await?;
    let response = provider
        .apply_resource_change(&args.resource_type, prior, planned)
        .await;
    emit(&response, global)?;
    check(&response.diagnostics)
}

async fn read(
    provider: &ConfiguredProvider,
    args: &ReadArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let state = read_document(&args.state).await?;
    let response = provider.read_resource(&args.resource_type, state).await;
    emit(&response, global)?;
    check(&response.diagnostics)
}

async fn import(
    provider: &ConfiguredProvider,
    args: &ImportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let response = provider
        .import_resource_state(&args.resource_type, &args.id)
        .await;
    emit(&response, global)?;
    check(&response.diagnostics)
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Configure from `--provider-config`, or an empty block when absent.
async fn configure(provider: &Provider, global: &GlobalOpts) -> Result<ConfiguredProvider, CliError> {
    let config = match global.provider_config.as_deref() {
        Some(path) => read_document(path).await?,
        None => Json::Object(Map::new()),
    };
    provider.configure(&config).map_err(|diags| CliError::Configure {
        report: diags.to_string(),
    })
}

async fn read_optional(path: Option<&Path>) -> Result<Option<Json>, CliError> {
    match path {
        Some(path) => read_document(path).await.map(Some),
        None => Ok(None),
    }
}

async fn read_document(path: &Path) -> Result<Json, CliError> {
    let (name, text) = if path == Path::new(STDIN) {
        let mut buf = String::new();
        let read = tokio::io::stdin().read_to_string(&mut buf).await;
        ("<stdin>".to_owned(), read.map(|_| buf))
    } else {
        (path.display().to_string(), tokio::fs::read_to_string(path).await)
    };

    let text = text.map_err(|source| CliError::Io {
        path: name.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::InvalidJson { path: name, source })
}

fn emit<T: Serialize>(response: &T, global: &GlobalOpts) -> Result<(), CliError> {
    let text = if global.compact {
        serde_json::to_string(response)?
    } else {
        serde_json::to_string_pretty(response)?
    };
    println!("{text}");
    Ok(())
}

/// The response is printed either way; errors also set the exit code.
fn check(diags: &Diagnostics) -> Result<(), CliError> {
    if diags.has_errors() {
        return Err(CliError::Diagnostics {
            count: diags.errors().count(),
            report: diags.to_string(),
        });
    }
    Ok(())
}
