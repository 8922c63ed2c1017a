//! Asset listing and registration commands

use colored::Colorize;
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::SelectOption;
use crate::error::{Error, Result};
use crate::output::{json, table};
use crate::scan::RegistrationOutcome;

/// Display format for selectable assets in table view
#[derive(Tabled)]
struct AssetOptionDisplay {
    #[tabled(rename = "ASSET")]
    label: String,

    #[tabled(rename = "HOST ID")]
    host_id: String,
}

impl From<&SelectOption> for AssetOptionDisplay {
    fn from(option: &SelectOption) -> Self {
        Self {
            label: option.label.clone(),
            host_id: option.value.clone(),
        }
    }
}

/// JSON shape of a registration result
#[derive(Serialize)]
struct RegistrationReport<'a> {
    asset: &'a str,
    outcome: RegistrationOutcome,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the asset list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let api_key = ctx.require_api_key()?;
    let email = ctx.require_email()?;

    debug!("Fetching assets for {}", email);
    let options = ctx.orchestrator.list_assets(api_key, email).await;

    // The placeholder always comes first
    if options.len() <= 1 {
        eprintln!(
            "{} No assets found for {}. Check the API key and email, or add assets on the platform.",
            "⚠".yellow(),
            email
        );
    }

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<AssetOptionDisplay> = options.iter().map(Into::into).collect();
            println!("{}", table::format_table(&rows, "No assets found."));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&options, ctx.config.api_host())?);
        }
    }

    Ok(())
}

/// Run the asset register command.
///
/// Fails the process when the platform does not confirm the registration.
pub async fn register(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let api_key = ctx.require_api_key()?;
    let email = ctx.require_email()?;
    let host_id = ctx.require_asset()?;

    let result = ctx
        .orchestrator
        .try_register_asset(api_key, email, host_id)
        .await;
    let error = result.as_ref().err().map(ToString::to_string);
    let outcome = RegistrationOutcome::settle(host_id, result);

    match ctx.format {
        OutputFormat::Table => {
            if outcome.is_success() {
                println!("{} {}", "✓".green(), outcome.message());
            }
        }
        OutputFormat::Json => {
            let report = RegistrationReport {
                asset: host_id,
                outcome,
                message: outcome.message(),
                error,
            };
            println!("{}", json::format_json(&report, ctx.config.api_host())?);
        }
    }

    if outcome.is_success() {
        Ok(())
    } else {
        Err(Error::Other(outcome.message().to_string()))
    }
}
