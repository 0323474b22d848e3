use anyhow::{bail, Result};
use clap::Args;
use kitna_core::{Catalog, InputMode};
use kitna_report::{json as jreport, terminal};

use super::parse_mode;

#[derive(Args)]
pub struct ModelsArgs {
    /// Catalog to list: text, voice, all
    #[arg(long, default_value = "all")]
    pub mode: String,

    /// Output format: table, json
    #[arg(long, default_value = "table")]
    pub format: String,
}

fn catalog_modes(mode: &str) -> Result<Vec<InputMode>> {
    match mode.to_lowercase().as_str() {
        "all" => Ok(vec![InputMode::Text, InputMode::Voice]),
        other => {
            let m = parse_mode(other)?;
            if m == InputMode::Tokens {
                // tokens mode prices against the text catalog
                return Ok(vec![InputMode::Text]);
            }
            Ok(vec![m])
        }
    }
}

pub fn run(args: ModelsArgs, catalog: &Catalog) -> Result<()> {
    let modes = catalog_modes(&args.mode)?;
    match args.format.as_str() {
        "json" => println!("{}", jreport::render_models(catalog, &modes)?),
        "table" => {
            for mode in modes {
                let title = if mode.is_voice() { "Voice Models" } else { "Text Models" };
                terminal::print_models(title, &catalog.models(mode));
            }
        }
        other => bail!("unknown format '{}': expected table or json", other),
    }
    Ok(())
}
