use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use kitna_core::{calculate_cost, Catalog, Estimate};
use kitna_report::{json as jreport, terminal};
use std::path::PathBuf;

use super::{build_session, check_format, write_or_print, InputArgs};

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format: table, json
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Write json output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// The session's input priced on every model of its catalog, most expensive first.
pub fn compare_models(session: &kitna_core::Session) -> Result<Vec<Estimate>> {
    let base = session.estimate()?;
    let mut estimates = session
        .available_models()
        .into_iter()
        .map(|model| -> Result<Estimate> {
            let cost_usd = calculate_cost(base.units, base.mode, &model)?;
            Ok(Estimate {
                model,
                cost_usd,
                ..base.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    estimates.sort_by(|a, b| {
        b.cost_usd
            .partial_cmp(&a.cost_usd)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(estimates)
}

const FORMATS: &[&str] = &["table", "json"];

pub fn run(args: CompareArgs, catalog: Catalog) -> Result<()> {
    check_format(&args.format, FORMATS)?;
    let session = build_session(catalog, &args.input, None)?;
    eprintln!(
        "{} Comparing {} {} models...",
        "→".cyan(),
        session.available_models().len(),
        if session.mode().is_voice() { "voice" } else { "text" }
    );
    let estimates = compare_models(&session)?;

    match args.format.as_str() {
        "json" => write_or_print(&jreport::render_comparison(&estimates)?, args.out.as_ref())?,
        "table" => terminal::print_comparison(&estimates),
        other => bail!("unknown format '{}'", other),
    }
    Ok(())
}
