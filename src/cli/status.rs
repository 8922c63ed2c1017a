//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::PlatformApi;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};
use crate::output::json;
use crate::validation;

/// Machine-readable status. Never carries secret values.
#[derive(Debug, Serialize)]
struct StatusReport {
    config_file: String,
    config_found: bool,
    api_host: String,
    api_key: FieldStatus,
    email: FieldStatus,
    asset: FieldStatus,
    client_key: FieldStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reachable: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
enum FieldStatus {
    Ok,
    Missing,
    Invalid(String),
}

impl FieldStatus {
    fn from_check<T>(result: std::result::Result<T, crate::error::ValidationError>) -> Self {
        use crate::error::ValidationError::*;
        match result {
            Ok(_) => FieldStatus::Ok,
            Err(MissingEmail | MissingAsset | MissingApiKey) => FieldStatus::Missing,
            Err(err) => FieldStatus::Invalid(err.to_string()),
        }
    }

    fn print(&self, label: &str, ok_detail: Option<&str>) {
        match self {
            FieldStatus::Ok => match ok_detail {
                Some(detail) => println!("{} {}: {}", "✓".green(), label, detail),
                None => println!("{} {} configured", "✓".green(), label),
            },
            FieldStatus::Missing => println!("{} {} not configured", "✗".red(), label),
            FieldStatus::Invalid(reason) => println!("{} {}: {}", "⚠".yellow(), label, reason),
        }
    }
}

/// Run the status command to display configuration status
pub async fn run(opts: &GlobalOptions, check: bool) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let (mut config, config_found) = match Config::load_at(opts.config_ref()) {
        Ok(config) => (config, true),
        Err(Error::Config(ConfigError::NotFound)) => (Config::default(), false),
        Err(e) => return Err(e),
    };
    opts.apply_to(&mut config);

    let client_key = match &config.client_key {
        Some(key) if !key.is_blank() => FieldStatus::Ok,
        _ => FieldStatus::Missing,
    };

    let mut report = StatusReport {
        config_file: config_path.display().to_string(),
        config_found,
        api_host: config.api_host().to_string(),
        api_key: FieldStatus::from_check(validation::validate_api_key(config.api_key.as_ref())),
        email: FieldStatus::from_check(validation::validate_email(config.email.as_deref())),
        asset: FieldStatus::from_check(validation::validate_asset(config.asset.as_deref())),
        client_key,
        reachable: None,
    };

    // The check needs a client key; without one it is skipped
    if check && matches!(report.client_key, FieldStatus::Ok) {
        report.reachable = Some(check_reachable(&config, opts).await);
    }

    match opts.format {
        OutputFormat::Json => println!("{}", json::format_json(&report, &report.api_host)?),
        OutputFormat::Table => print_report(&report, &config, check),
    }

    Ok(())
}

async fn check_reachable(config: &Config, opts: &GlobalOptions) -> bool {
    let ctx = match CommandContext::from_config(config.clone(), opts.format) {
        Ok(ctx) => ctx,
        Err(err) => {
            log::debug!("Cannot build API client: {}", err);
            return false;
        }
    };

    match ctx.orchestrator.api().ping().await {
        Ok(_) => true,
        Err(err) => {
            log::debug!("Reachability check failed: {}", err);
            false
        }
    }
}

fn print_report(report: &StatusReport, config: &Config, check: bool) {
    println!("{}\n", "breachlock-ci Configuration Status".bold());

    if report.config_found {
        println!("Config file: {}", report.config_file.cyan());
    } else {
        println!(
            "Config file: {} {}",
            report.config_file.cyan(),
            "(not found)".dimmed()
        );
    }
    println!("API host: {}", report.api_host.cyan());
    println!();

    report.api_key.print("API key", None);
    report.email.print("Email", config.email.as_deref());
    report.asset.print("Asset", config.asset.as_deref());
    report.client_key.print("Client key", None);

    match report.reachable {
        Some(true) => println!("{} API host reachable", "✓".green()),
        Some(false) => println!("{} API host not reachable", "✗".red()),
        None if check => println!(
            "{} Reachability check skipped: client key not configured",
            "⚠".yellow()
        ),
        None => {}
    }

    if !report.config_found {
        println!();
        println!(
            "Run {} to create a configuration file.",
            "breachlock-ci init".cyan()
        );
    }
    println!();
}
