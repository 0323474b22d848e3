use crate::catalog::{InputMode, ModelRecord, VoiceUnit};
use crate::error::{KitnaError, Result};

/// Token-equivalents per minute of audio. Voice durations travel through the
/// calculator in this currency.
pub const TOKENS_PER_VOICE_MINUTE: f64 = 200.0;

/// Voice billing never goes below one minute.
pub const MIN_VOICE_MINUTES: f64 = 1.0;

/// Minutes billed for a voice estimate of `units` token-equivalents.
pub fn voice_minutes(units: f64) -> f64 {
    (units / TOKENS_PER_VOICE_MINUTE).max(MIN_VOICE_MINUTES)
}

/// Price `units` of consumption against `model`.
///
/// Text and token modes price `units` as tokens at `input_price` per 1K. Voice mode
/// treats `units` as token-equivalents, converts them to billable minutes and then to
/// the model's billing unit. Output pricing is never applied and the result is not
/// rounded.
pub fn calculate_cost(units: f64, mode: InputMode, model: &ModelRecord) -> Result<f64> {
    if !units.is_finite() || units < 0.0 {
        return Err(KitnaError::InvalidArgument(format!(
            "units must be a finite non-negative number, got {}",
            units
        )));
    }

    match (mode, model) {
        (InputMode::Voice, ModelRecord::Voice(m)) => {
            let minutes = voice_minutes(units);
            let quantity = match m.unit {
                VoiceUnit::Minute => minutes,
                VoiceUnit::Hour => minutes / 60.0,
                VoiceUnit::Second => minutes * 60.0,
                VoiceUnit::PerThousandMinutes => minutes / 1000.0,
            };
            Ok(quantity * m.input_price)
        }
        (InputMode::Text | InputMode::Tokens, ModelRecord::Text(m)) => {
            Ok((units / 1000.0) * m.input_price)
        }
        _ => Err(KitnaError::ModelModeMismatch {
            id: model.id().to_string(),
            mode,
        }),
    }
}
