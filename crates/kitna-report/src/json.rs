use anyhow::Result;
use chrono::{DateTime, Utc};
use kitna_core::*;
use serde::Serialize;

#[derive(Serialize)]
struct EstimateReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    estimate: &'a Estimate,
    rate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_minutes: Option<f64>,
}

impl<'a> EstimateReport<'a> {
    fn new(estimate: &'a Estimate, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            estimate,
            rate: estimate.model.display_price(),
            voice_minutes: estimate.voice_minutes(),
        }
    }
}

pub fn render_estimate(estimate: &Estimate) -> Result<String> {
    let report = EstimateReport::new(estimate, Utc::now());
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_comparison(estimates: &[Estimate]) -> Result<String> {
    let now = Utc::now();
    let rows: Vec<EstimateReport<'_>> = estimates.iter().map(|e| EstimateReport::new(e, now)).collect();
    let cheapest = estimates
        .iter()
        .min_by(|a, b| a.cost_usd.partial_cmp(&b.cost_usd).unwrap_or(std::cmp::Ordering::Equal))
        .map(|e| e.model.id());

    let summary = serde_json::json!({
        "generated_at": now,
        "models_compared": estimates.len(),
        "cheapest": cheapest,
        "estimates": rows,
    });
    Ok(serde_json::to_string_pretty(&summary)?)
}

pub fn render_models(catalog: &Catalog, modes: &[InputMode]) -> Result<String> {
    let mut out = serde_json::Map::new();
    for mode in modes {
        let key = if mode.is_voice() { "voice_models" } else { "text_models" };
        if out.contains_key(key) {
            continue;
        }
        let models: Vec<serde_json::Value> = catalog
            .models(*mode)
            .iter()
            .map(|m| {
                serde_json::json!({
                    "id": m.id(),
                    "name": m.name(),
                    "provider": m.provider(),
                    "description": m.description(),
                    "input_price": m.input_price(),
                    "output_price": m.output_price(),
                    "unit": m.unit(),
                    "display_price": m.display_price(),
                })
            })
            .collect();
        out.insert(key.to_string(), serde_json::Value::Array(models));
    }
    Ok(serde_json::to_string_pretty(&out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn voice_estimate() -> Estimate {
        let mut session = Session::new(Catalog::builtin()).unwrap();
        session.set_mode(InputMode::Voice).unwrap();
        session.attach_voice_file(VoiceFile {
            name: "memo.ogg".into(),
            size_bytes: 4 * 1024 * 1024,
            kind: MediaKind::Audio,
        });
        session.estimate().unwrap()
    }

    #[test]
    fn estimate_json_carries_rate_and_minutes() {
        let v: Value = serde_json::from_str(&render_estimate(&voice_estimate()).unwrap()).unwrap();
        assert_eq!(v["mode"], "voice");
        assert_eq!(v["source"], "file_size");
        assert_eq!(v["rate"], "$0.006/minute");
        assert_eq!(v["voice_minutes"], 4.0);
        assert_eq!(v["model"]["kind"], "voice");
        assert_eq!(v["model"]["unit"], "minute");
        assert!(v["generated_at"].is_string());
    }

    #[test]
    fn text_estimate_omits_minutes() {
        let mut session = Session::new(Catalog::builtin()).unwrap();
        session.set_text("hello there");
        let v: Value = serde_json::from_str(&render_estimate(&session.estimate().unwrap()).unwrap()).unwrap();
        assert!(v.get("voice_minutes").is_none());
        assert_eq!(v["units"], 4.0);
    }

    #[test]
    fn models_json_groups_by_catalog() {
        let out = render_models(&Catalog::builtin(), &InputMode::ALL).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["text_models"].as_array().unwrap().len(), 6);
        assert_eq!(v["voice_models"][1]["unit"], "1000 minutes");
        assert!(v["text_models"][0]["unit"].is_null());
    }

    #[test]
    fn comparison_names_the_cheapest_model() {
        let catalog = Catalog::builtin();
        let estimates: Vec<Estimate> = catalog
            .models(InputMode::Text)
            .into_iter()
            .map(|model| Estimate {
                mode: InputMode::Text,
                cost_usd: calculate_cost(1000.0, InputMode::Text, &model).unwrap(),
                model,
                source: UnitSource::TokenCount,
                units: 1000.0,
            })
            .collect();
        let v: Value = serde_json::from_str(&render_comparison(&estimates).unwrap()).unwrap();
        assert_eq!(v["cheapest"], "claude-3-haiku");
        assert_eq!(v["models_compared"], 6);
    }
}
