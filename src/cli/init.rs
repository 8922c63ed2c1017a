//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::Secret;
use crate::config::Config;
use crate::error::Result;
use crate::validation;

/// Run the init command.
///
/// Walks through the same steps as the build-step form: credentials, email,
/// asset selection, registration. Values passed as flags or environment
/// variables are used as prompt defaults.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut config = Config::load_or_default(opts.config_ref())?;
    opts.apply_to(&mut config);

    println!("{}", "Welcome to breachlock-ci!".bold().green());
    println!("Let's set up your BreachLock configuration.\n");

    let api_key = match config.api_key.clone() {
        Some(key) if validation::validate_api_key(Some(&key)).is_ok() => key,
        _ => Secret::new(
            Password::with_theme(&theme)
                .with_prompt("Enter your BreachLock API key")
                .validate_with(|input: &String| {
                    validation::validate_api_key(Some(&Secret::new(input.as_str())))
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact()?,
        ),
    };

    let mut email_prompt = Input::<String>::with_theme(&theme)
        .with_prompt("Email used for app.breachlock.com")
        .validate_with(|input: &String| {
            validation::validate_email(Some(input.as_str()))
                .map(|_| ())
                .map_err(|e| e.to_string())
        });
    if let Some(email) = &config.email {
        email_prompt = email_prompt.with_initial_text(email.clone());
    }
    let email = email_prompt.interact_text()?.trim().to_string();

    if config.client_key.as_ref().is_none_or(Secret::is_blank) {
        let client_key: String = Password::with_theme(&theme)
            .with_prompt("Enter the CI integration client key (Authorization header)")
            .interact()?;
        config.client_key = Some(Secret::new(client_key));
    }

    config.api_key = Some(api_key);
    config.email = Some(email);

    let ctx = CommandContext::from_config(config, opts.format)?;
    let api_key = ctx.require_api_key()?;
    let email = ctx.require_email()?;

    println!("\n{}", "Fetching your assets...".cyan());
    let options = ctx.orchestrator.list_assets(api_key, email).await;

    let mut asset = None;
    if options.len() <= 1 {
        println!(
            "{}",
            "⚠ No assets found. Check the API key and email, or add assets on the platform."
                .yellow()
        );
    } else {
        let labels: Vec<String> = options
            .iter()
            .map(|o| {
                if o.is_placeholder() {
                    o.label.clone()
                } else {
                    format!("{} ({})", o.label, o.value)
                }
            })
            .collect();

        let selection = Select::with_theme(&theme)
            .with_prompt("Select the asset to scan")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        asset = selection
            .map(|idx| &options[idx])
            .filter(|o| !o.is_placeholder())
            .map(|o| o.value.clone());
    }

    if let Some(host_id) = &asset {
        let register = Confirm::with_theme(&theme)
            .with_prompt("Register the CI integration for this asset now?")
            .default(true)
            .interact()?;

        if register {
            let outcome = ctx
                .orchestrator
                .register_asset(api_key, email, host_id)
                .await;
            if outcome.is_success() {
                println!("{} {}", "✓".green(), outcome.message());
            } else {
                println!("{} {}", "✗".red(), outcome.message());
            }
        }
    }

    let mut config = ctx.config;
    if asset.is_some() {
        config.asset = asset;
    }
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    if let Some(asset) = &config.asset {
        println!("  Asset: {}", asset.bold());
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "breachlock-ci status".cyan());
    println!("  {} - Start a live scan", "breachlock-ci scan".cyan());

    Ok(())
}
