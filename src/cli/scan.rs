//! Live scan command

use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json;
use crate::scan::ScanOutcome;

/// JSON shape of a scan trigger result
#[derive(Serialize)]
struct ScanReport<'a> {
    asset: &'a str,
    outcome: ScanOutcome,
    message: &'static str,
}

/// Run the scan command.
///
/// Input problems are errors; a scan the platform refused to start is only
/// reported, and the command still succeeds.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let api_key = ctx.require_api_key()?;
    let host_id = ctx.require_asset()?;

    if ctx.format == OutputFormat::Table {
        println!("Starting scan for asset: {}", host_id);
    }

    let outcome = ctx.orchestrator.start_scan(api_key, host_id).await;

    match ctx.format {
        OutputFormat::Table => println!("{}", outcome.status_line()),
        OutputFormat::Json => {
            let report = ScanReport {
                asset: host_id,
                outcome,
                message: outcome.status_line(),
            };
            println!("{}", json::format_json(&report, ctx.config.api_host())?);
        }
    }

    Ok(())
}
