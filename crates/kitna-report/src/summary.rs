use kitna_core::Estimate;

use crate::terminal::{fmt_count, fmt_minutes, fmt_usd};

/// Plain-text block meant for pasting into chats and tickets.
pub fn render_summary(estimate: &Estimate) -> String {
    let quantity = match estimate.voice_minutes() {
        Some(minutes) => format!("Estimated Duration: {} minutes", fmt_minutes(minutes)),
        None => format!("Tokens: {}", fmt_count(estimate.whole_units())),
    };
    format!(
        "Kitna? - AI Cost Calculation\nModel: {}\n{}\nRate: {}\nTotal Cost: {}\n",
        estimate.model.name(),
        quantity,
        estimate.model.display_price(),
        fmt_usd(estimate.cost_usd),
    )
}
