//! Interactive calculator state: the active mode, the selected model and the raw
//! inputs the user has supplied so far.

use serde::{Deserialize, Serialize};

use crate::calculator::{calculate_cost, voice_minutes};
use crate::catalog::{Catalog, InputMode, ModelRecord};
use crate::error::{KitnaError, Result};
use crate::estimator::estimate_tokens;
use crate::voice::{estimate_voice_units, MediaKind, Transcriber};

/// An uploaded audio or video file. Only its size feeds the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceFile {
    pub name: String,
    pub size_bytes: u64,
    pub kind: MediaKind,
}

/// Where the priced units came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSource {
    Empty,
    Text,
    TokenCount,
    Transcription,
    FileSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub mode: InputMode,
    pub model: ModelRecord,
    pub source: UnitSource,
    /// Tokens for text/token modes, token-equivalents for voice.
    pub units: f64,
    pub cost_usd: f64,
}

impl Estimate {
    /// Billed minutes, for voice estimates only.
    pub fn voice_minutes(&self) -> Option<f64> {
        self.mode.is_voice().then(|| voice_minutes(self.units))
    }

    /// Units rounded up to a whole count for display.
    pub fn whole_units(&self) -> u64 {
        self.units.ceil() as u64
    }
}

/// Parse an explicit token count the way a lenient form field would: leading
/// whitespace and an optional sign, then the leading run of digits. Input without
/// digits is zero; negative counts are rejected.
pub fn parse_token_count(input: &str) -> Result<u64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &rest[..rest.bytes().take_while(|b| b.is_ascii_digit()).count()];
    if digits.is_empty() {
        return Ok(0);
    }
    let value: u64 = digits.parse().map_err(|_| {
        KitnaError::InvalidArgument(format!("token count '{}' is out of range", input.trim()))
    })?;
    if negative && value > 0 {
        return Err(KitnaError::InvalidArgument(format!(
            "token count must not be negative, got '{}'",
            input.trim()
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    mode: InputMode,
    model: ModelRecord,
    text_input: String,
    token_input: String,
    voice_file: Option<VoiceFile>,
    transcription: Option<String>,
}

impl Session {
    pub fn new(catalog: Catalog) -> Result<Self> {
        let mode = InputMode::Text;
        let model = catalog.default_model(mode)?;
        Ok(Self {
            catalog,
            mode,
            model,
            text_input: String::new(),
            token_input: String::new(),
            voice_file: None,
            transcription: None,
        })
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn model(&self) -> &ModelRecord {
        &self.model
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    pub fn token_input(&self) -> &str {
        &self.token_input
    }

    pub fn voice_file(&self) -> Option<&VoiceFile> {
        self.voice_file.as_ref()
    }

    pub fn transcription(&self) -> Option<&str> {
        self.transcription.as_deref()
    }

    /// Models selectable in the current mode.
    pub fn available_models(&self) -> Vec<ModelRecord> {
        self.catalog.models(self.mode)
    }

    /// Switch input mode. The selection falls back to the new catalog's default and
    /// every raw input is cleared.
    pub fn set_mode(&mut self, mode: InputMode) -> Result<()> {
        let model = self.catalog.default_model(mode)?;
        tracing::debug!(from = %self.mode, to = %mode, model = model.id(), "switching input mode");
        self.mode = mode;
        self.model = model;
        self.text_input.clear();
        self.token_input.clear();
        self.voice_file = None;
        self.transcription = None;
        Ok(())
    }

    /// Select a model from the active catalog. Unknown ids leave the selection as is.
    pub fn select_model(&mut self, id: &str) -> Result<()> {
        let model = self.catalog.find(self.mode, id).ok_or_else(|| KitnaError::UnknownModel {
            id: id.to_string(),
            mode: self.mode,
        })?;
        self.model = model;
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text_input = text.into();
    }

    pub fn set_token_input(&mut self, input: impl Into<String>) {
        self.token_input = input.into();
    }

    /// Attach an uploaded file. Any typed or transcribed text is discarded so the file
    /// size drives the estimate.
    pub fn attach_voice_file(&mut self, file: VoiceFile) {
        tracing::debug!(name = %file.name, size_bytes = file.size_bytes, kind = %file.kind, "attached voice file");
        self.voice_file = Some(file);
        self.text_input.clear();
        self.transcription = None;
    }

    pub fn remove_voice_file(&mut self) -> Option<VoiceFile> {
        self.voice_file.take()
    }

    /// Record through `transcriber`; the result becomes both the transcription and the
    /// text input. A blank transcription is an error and leaves the inputs untouched.
    pub fn record_voice(&mut self, transcriber: &dyn Transcriber) -> Result<()> {
        let text = transcriber.transcribe()?;
        if text.trim().is_empty() {
            return Err(KitnaError::Transcription("transcriber returned no text".into()));
        }
        self.text_input = text.clone();
        self.transcription = Some(text);
        Ok(())
    }

    /// Units and cost for the current inputs.
    pub fn estimate(&self) -> Result<Estimate> {
        let (source, units) = self.units()?;
        let cost_usd = calculate_cost(units, self.mode, &self.model)?;
        Ok(Estimate {
            mode: self.mode,
            model: self.model.clone(),
            source,
            units,
            cost_usd,
        })
    }

    fn units(&self) -> Result<(UnitSource, f64)> {
        match self.mode {
            InputMode::Text if !self.text_input.is_empty() => {
                Ok((UnitSource::Text, estimate_tokens(&self.text_input) as f64))
            }
            InputMode::Tokens if !self.token_input.is_empty() => {
                Ok((UnitSource::TokenCount, parse_token_count(&self.token_input)? as f64))
            }
            InputMode::Voice => {
                if !self.text_input.is_empty() {
                    let source = if self.transcription.as_deref() == Some(self.text_input.as_str()) {
                        UnitSource::Transcription
                    } else {
                        UnitSource::Text
                    };
                    Ok((source, estimate_tokens(&self.text_input) as f64))
                } else if let Some(t) = self.transcription.as_deref().filter(|t| !t.is_empty()) {
                    Ok((UnitSource::Transcription, estimate_tokens(t) as f64))
                } else if let Some(file) = &self.voice_file {
                    Ok((UnitSource::FileSize, estimate_voice_units(file.size_bytes)))
                } else {
                    Ok((UnitSource::Empty, 0.0))
                }
            }
            _ => Ok((UnitSource::Empty, 0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::MockTranscriber;

    fn session() -> Session {
        Session::new(Catalog::builtin()).unwrap()
    }

    #[test]
    fn starts_in_text_mode_with_default_model() {
        let s = session();
        assert_eq!(s.mode(), InputMode::Text);
        assert_eq!(s.model().id(), "gpt-4");
        let e = s.estimate().unwrap();
        assert_eq!(e.source, UnitSource::Empty);
        assert_eq!(e.cost_usd, 0.0);
    }

    #[test]
    fn switching_mode_resets_model_and_inputs() {
        let mut s = session();
        s.select_model("claude-3-opus").unwrap();
        s.set_text("some text");
        s.set_token_input("100");

        s.set_mode(InputMode::Voice).unwrap();
        assert_eq!(s.model().id(), "whisper-1");
        assert!(s.text_input().is_empty());
        assert!(s.token_input().is_empty());

        s.record_voice(&MockTranscriber).unwrap();
        s.attach_voice_file(VoiceFile {
            name: "note.wav".into(),
            size_bytes: 1024,
            kind: MediaKind::Audio,
        });
        s.set_text("typed over the recording");
        assert!(s.voice_file().is_some());

        s.set_mode(InputMode::Tokens).unwrap();
        assert_eq!(s.model().id(), "gpt-4");
        assert!(s.voice_file().is_none());
        assert!(s.text_input().is_empty());

        s.set_mode(InputMode::Voice).unwrap();
        s.record_voice(&MockTranscriber).unwrap();
        assert!(s.transcription().is_some());
        s.set_mode(InputMode::Text).unwrap();
        assert!(s.transcription().is_none());
        assert!(s.text_input().is_empty());
        assert_eq!(s.estimate().unwrap().source, UnitSource::Empty);
    }

    struct SilentTranscriber;

    impl Transcriber for SilentTranscriber {
        fn transcribe(&self) -> Result<String> {
            Ok("   ".into())
        }
    }

    #[test]
    fn blank_transcription_is_rejected() {
        let mut s = session();
        s.set_mode(InputMode::Voice).unwrap();
        s.set_text("kept");
        let err = s.record_voice(&SilentTranscriber).unwrap_err();
        assert!(matches!(err, KitnaError::Transcription(_)));
        assert_eq!(s.text_input(), "kept");
        assert!(s.transcription().is_none());
    }

    #[test]
    fn unknown_model_keeps_selection() {
        let mut s = session();
        s.select_model("gemini-pro").unwrap();
        let err = s.select_model("whisper-1").unwrap_err();
        assert!(matches!(err, KitnaError::UnknownModel { .. }));
        assert_eq!(s.model().id(), "gemini-pro");
    }

    #[test]
    fn token_mode_prices_explicit_count() {
        let mut s = session();
        s.set_mode(InputMode::Tokens).unwrap();
        s.set_token_input("2000");
        let e = s.estimate().unwrap();
        assert_eq!(e.source, UnitSource::TokenCount);
        assert!((e.cost_usd - 0.06).abs() < 1e-9);

        s.set_token_input("lots");
        assert_eq!(s.estimate().unwrap().cost_usd, 0.0);

        s.set_token_input("-5");
        assert!(s.estimate().is_err());
    }

    #[test]
    fn parse_token_count_is_lenient() {
        assert_eq!(parse_token_count("42").unwrap(), 42);
        assert_eq!(parse_token_count("  12abc").unwrap(), 12);
        assert_eq!(parse_token_count("+7").unwrap(), 7);
        assert_eq!(parse_token_count("1e3").unwrap(), 1);
        assert_eq!(parse_token_count("abc").unwrap(), 0);
        assert_eq!(parse_token_count("").unwrap(), 0);
        assert_eq!(parse_token_count("-0").unwrap(), 0);
        assert!(parse_token_count("-3").is_err());
        assert!(parse_token_count("99999999999999999999999").is_err());
    }

    #[test]
    fn voice_file_uses_size_and_clears_text() {
        let mut s = session();
        s.set_mode(InputMode::Voice).unwrap();
        s.record_voice(&MockTranscriber).unwrap();
        s.attach_voice_file(VoiceFile {
            name: "talk.mp3".into(),
            size_bytes: 3 * 1024 * 1024,
            kind: MediaKind::Audio,
        });
        assert!(s.text_input().is_empty());
        assert!(s.transcription().is_none());

        let e = s.estimate().unwrap();
        assert_eq!(e.source, UnitSource::FileSize);
        assert_eq!(e.units, 600.0);
        assert_eq!(e.voice_minutes(), Some(3.0));
        assert!((e.cost_usd - 0.018).abs() < 1e-9);
    }

    #[test]
    fn transcription_takes_precedence_over_file() {
        let mut s = session();
        s.set_mode(InputMode::Voice).unwrap();
        s.attach_voice_file(VoiceFile {
            name: "talk.wav".into(),
            size_bytes: 50 * 1024 * 1024,
            kind: MediaKind::Audio,
        });
        s.record_voice(&MockTranscriber).unwrap();

        let e = s.estimate().unwrap();
        assert_eq!(e.source, UnitSource::Transcription);
        assert_eq!(e.units, estimate_tokens(crate::voice::MOCK_TRANSCRIPTION) as f64);
        // short clip bills the one-minute floor
        assert!((e.cost_usd - 0.006).abs() < 1e-9);

        s.remove_voice_file();
        assert!(s.voice_file().is_none());
    }
}
