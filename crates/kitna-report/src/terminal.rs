use colored::Colorize;
use kitna_core::*;

// ── formatting helpers ────────────────────────────────────────────────────────

pub fn fmt_usd(cost: f64) -> String {
    format!("${:.6}", cost)
}

/// Integer with thousands separators.
pub fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Minutes with at most two decimals and no trailing zeros.
pub fn fmt_minutes(minutes: f64) -> String {
    let whole = minutes.trunc();
    let frac = format!("{:.2}", minutes - whole);
    // rounding can carry into the next whole minute
    if frac == "1.00" {
        return fmt_count(whole as u64 + 1);
    }
    let decimals = frac.trim_start_matches("0.").trim_end_matches('0');
    if decimals.is_empty() {
        fmt_count(whole as u64)
    } else {
        format!("{}.{}", fmt_count(whole as u64), decimals)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

fn source_label(source: UnitSource) -> &'static str {
    match source {
        UnitSource::Empty => "no input",
        UnitSource::Text => "estimated from text",
        UnitSource::TokenCount => "entered token count",
        UnitSource::Transcription => "estimated from transcription",
        UnitSource::FileSize => "estimated from file size",
    }
}

fn mode_colored(mode: InputMode) -> String {
    match mode {
        InputMode::Text => mode.to_string().cyan().to_string(),
        InputMode::Tokens => mode.to_string().green().to_string(),
        InputMode::Voice => mode.to_string().magenta().to_string(),
    }
}

// ── single estimate ───────────────────────────────────────────────────────────

pub fn print_estimate(estimate: &Estimate) {
    let m = &estimate.model;

    println!("\n{}", "── Estimate ────────────────────────────────────────────────────".bold());
    println!("  Mode       : {}", mode_colored(estimate.mode));
    println!("  Model      : {} ({})", m.name(), m.id().dimmed());
    println!("  Provider   : {}", m.provider());
    println!("  Rate       : {}", m.display_price());
    match estimate.voice_minutes() {
        Some(minutes) => {
            println!("  Duration   : {} min", fmt_minutes(minutes));
            println!(
                "  Units      : {} token-equivalents ({})",
                fmt_count(estimate.whole_units()),
                source_label(estimate.source).dimmed()
            );
        }
        None => {
            println!(
                "  Tokens     : {} ({})",
                fmt_count(estimate.whole_units()),
                source_label(estimate.source).dimmed()
            );
        }
    }
    println!("  Total cost : {}", fmt_usd(estimate.cost_usd).green().bold());

    if estimate.source == UnitSource::Empty {
        println!("\n{}", "No input given; nothing to price.".yellow());
    }
    println!();
}

// ── catalog ───────────────────────────────────────────────────────────────────

pub fn print_models(title: &str, models: &[ModelRecord]) {
    if models.is_empty() {
        println!("{}", "No models.".yellow());
        return;
    }

    let (w_id, w_name, w_provider, w_rate) = (16, 24, 12, 20);

    println!("\n{}", format!("── {} ", title).bold());
    println!(
        "{:<w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {}",
        "ID".bold(),
        "NAME".bold(),
        "PROVIDER".bold(),
        "RATE".bold(),
        "DESCRIPTION".bold(),
        w0 = w_id,
        w1 = w_name,
        w2 = w_provider,
        w3 = w_rate,
    );
    println!("{}", "─".repeat(w_id + w_name + w_provider + w_rate + 8 + 40));

    for (i, m) in models.iter().enumerate() {
        let id = if i == 0 {
            format!("{}*", m.id())
        } else {
            m.id().to_string()
        };
        println!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {}",
            truncate(&id, w_id).cyan(),
            truncate(m.name(), w_name),
            truncate(m.provider(), w_provider),
            truncate(&m.display_price(), w_rate).yellow(),
            truncate(m.description(), 40).dimmed(),
            w0 = w_id,
            w1 = w_name,
            w2 = w_provider,
            w3 = w_rate,
        );
    }
    println!("\n{} models  (* default)", models.len());
}

// ── comparison ────────────────────────────────────────────────────────────────

pub fn print_comparison(estimates: &[Estimate]) {
    let Some(first) = estimates.first() else {
        println!("{}", "No models to compare.".yellow());
        return;
    };

    println!("\n{}", "── Cost by Model ───────────────────────────────────────────────".bold());
    match first.voice_minutes() {
        Some(minutes) => println!("  Duration : {} min ({})", fmt_minutes(minutes), source_label(first.source)),
        None => println!("  Tokens   : {} ({})", fmt_count(first.whole_units()), source_label(first.source)),
    }
    println!();

    let cheapest = estimates
        .iter()
        .map(|e| e.cost_usd)
        .fold(f64::INFINITY, f64::min);

    for (i, e) in estimates.iter().enumerate() {
        let cost = fmt_usd(e.cost_usd);
        let cost = if e.cost_usd == cheapest {
            cost.green().bold()
        } else {
            cost.yellow()
        };
        println!(
            "  {:>2}. {:>14}  {:<24}  {:<12}  {}",
            i + 1,
            cost,
            truncate(e.model.name(), 24),
            truncate(e.model.provider(), 12),
            e.model.display_price().dimmed(),
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(fmt_count(0), "0");
        assert_eq!(fmt_count(999), "999");
        assert_eq!(fmt_count(1000), "1,000");
        assert_eq!(fmt_count(1234567), "1,234,567");
    }

    #[test]
    fn minutes_drop_trailing_zeros() {
        assert_eq!(fmt_minutes(1.0), "1");
        assert_eq!(fmt_minutes(2.5), "2.5");
        assert_eq!(fmt_minutes(4.256), "4.26");
        assert_eq!(fmt_minutes(1999.999), "2,000");
    }

    #[test]
    fn usd_has_six_decimals() {
        assert_eq!(fmt_usd(0.006), "$0.006000");
        assert_eq!(fmt_usd(0.0), "$0.000000");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Speech-to-Text", 20), "Speech-to-Text");
        assert_eq!(truncate("Spéech-to-Text", 6), "Spéec…");
    }
}
