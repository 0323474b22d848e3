use anyhow::{bail, Result};
use clap::Args;
use kitna_core::Catalog;
use kitna_report::{json as jreport, summary, terminal};
use std::path::PathBuf;

use super::{build_session, check_format, write_or_print, InputArgs};

#[derive(Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Model ID from the active catalog (defaults to the catalog's first model)
    #[arg(long)]
    pub model: Option<String>,

    /// Output format: table, json, summary
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Write json/summary output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

const FORMATS: &[&str] = &["table", "json", "summary"];

pub fn run(args: EstimateArgs, catalog: Catalog) -> Result<()> {
    check_format(&args.format, FORMATS)?;
    let session = build_session(catalog, &args.input, args.model.as_deref())?;
    let estimate = session.estimate()?;
    tracing::debug!(
        mode = %estimate.mode,
        model = estimate.model.id(),
        units = estimate.units,
        cost_usd = estimate.cost_usd,
        "estimated"
    );

    match args.format.as_str() {
        "json" => write_or_print(&jreport::render_estimate(&estimate)?, args.out.as_ref())?,
        "summary" => write_or_print(&summary::render_summary(&estimate), args.out.as_ref())?,
        "table" => terminal::print_estimate(&estimate),
        other => bail!("unknown format '{}'", other),
    }
    Ok(())
}
