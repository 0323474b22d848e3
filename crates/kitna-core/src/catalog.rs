//! Model pricing catalog.
//!
//! Text prices are USD per 1K input tokens. Voice prices are USD per [`VoiceUnit`].
//! Output prices are carried for display only; nothing in the calculator applies them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{KitnaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Text,
    Tokens,
    Voice,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [InputMode::Text, InputMode::Tokens, InputMode::Voice];

    pub fn is_voice(self) -> bool {
        self == InputMode::Voice
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputMode::Text => write!(f, "text"),
            InputMode::Tokens => write!(f, "tokens"),
            InputMode::Voice => write!(f, "voice"),
        }
    }
}

impl std::str::FromStr for InputMode {
    type Err = KitnaError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(InputMode::Text),
            "tokens" | "token" => Ok(InputMode::Tokens),
            "voice" | "audio" => Ok(InputMode::Voice),
            _ => Err(KitnaError::UnknownMode(s.to_string())),
        }
    }
}

/// Billing granularity of a voice model's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VoiceUnit {
    Minute,
    Hour,
    Second,
    PerThousandMinutes,
}

impl VoiceUnit {
    pub fn label(self) -> &'static str {
        match self {
            VoiceUnit::Minute => "minute",
            VoiceUnit::Hour => "hour",
            VoiceUnit::Second => "second",
            VoiceUnit::PerThousandMinutes => "1000 minutes",
        }
    }
}

impl std::fmt::Display for VoiceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for VoiceUnit {
    type Err = KitnaError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "minute" => Ok(VoiceUnit::Minute),
            "hour" => Ok(VoiceUnit::Hour),
            "second" => Ok(VoiceUnit::Second),
            "1000 minutes" | "per-1000-minutes" => Ok(VoiceUnit::PerThousandMinutes),
            _ => Err(KitnaError::UnknownUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for VoiceUnit {
    type Error = KitnaError;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<VoiceUnit> for String {
    fn from(unit: VoiceUnit) -> Self {
        unit.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextModel {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub description: String,
    pub input_price: f64,
    #[serde(default)]
    pub output_price: f64,
    #[serde(default)]
    pub display_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceModel {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub description: String,
    pub input_price: f64,
    #[serde(default)]
    pub output_price: f64,
    pub unit: VoiceUnit,
    #[serde(default)]
    pub display_price: String,
}

/// A priced model. Only voice models carry a billing unit; text models are priced
/// per 1K tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelRecord {
    Text(TextModel),
    Voice(VoiceModel),
}

impl ModelRecord {
    pub fn id(&self) -> &str {
        match self {
            ModelRecord::Text(m) => &m.id,
            ModelRecord::Voice(m) => &m.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ModelRecord::Text(m) => &m.name,
            ModelRecord::Voice(m) => &m.name,
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            ModelRecord::Text(m) => &m.provider,
            ModelRecord::Voice(m) => &m.provider,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ModelRecord::Text(m) => &m.description,
            ModelRecord::Voice(m) => &m.description,
        }
    }

    pub fn input_price(&self) -> f64 {
        match self {
            ModelRecord::Text(m) => m.input_price,
            ModelRecord::Voice(m) => m.input_price,
        }
    }

    pub fn output_price(&self) -> f64 {
        match self {
            ModelRecord::Text(m) => m.output_price,
            ModelRecord::Voice(m) => m.output_price,
        }
    }

    pub fn unit(&self) -> Option<VoiceUnit> {
        match self {
            ModelRecord::Text(_) => None,
            ModelRecord::Voice(m) => Some(m.unit),
        }
    }

    /// Human rate label. Falls back to a label derived from price and unit.
    pub fn display_price(&self) -> String {
        let stored = match self {
            ModelRecord::Text(m) => &m.display_price,
            ModelRecord::Voice(m) => &m.display_price,
        };
        if stored.is_empty() {
            derive_display_price(self.input_price(), self.unit())
        } else {
            stored.clone()
        }
    }

    /// Whether this record belongs to the catalog serving `mode`.
    pub fn serves(&self, mode: InputMode) -> bool {
        matches!(
            (self, mode.is_voice()),
            (ModelRecord::Text(_), false) | (ModelRecord::Voice(_), true)
        )
    }
}

pub fn derive_display_price(input_price: f64, unit: Option<VoiceUnit>) -> String {
    match unit {
        None => format!("${}/1K tokens", input_price),
        Some(u) => format!("${}/{}", input_price, u.label()),
    }
}

/// Two disjoint ordered model lists. The first entry of each list is the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub text: Vec<TextModel>,
    pub voice: Vec<VoiceModel>,
}

fn text(id: &str, name: &str, input: f64, output: f64, provider: &str, description: &str) -> TextModel {
    TextModel {
        id: id.to_string(),
        name: name.to_string(),
        provider: provider.to_string(),
        description: description.to_string(),
        input_price: input,
        output_price: output,
        display_price: format!("${}/1K tokens", input),
    }
}

fn voice(
    id: &str,
    name: &str,
    input: f64,
    unit: VoiceUnit,
    display: &str,
    provider: &str,
    description: &str,
) -> VoiceModel {
    VoiceModel {
        id: id.to_string(),
        name: name.to_string(),
        provider: provider.to_string(),
        description: description.to_string(),
        input_price: input,
        output_price: 0.0,
        unit,
        display_price: display.to_string(),
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            text: vec![
                text("gpt-4", "GPT-4", 0.03, 0.06, "OpenAI", "Most capable model, best for complex tasks"),
                text("gpt-3.5-turbo", "GPT-3.5 Turbo", 0.001, 0.002, "OpenAI", "Fast and cost-effective for most tasks"),
                text("claude-3-opus", "Claude 3 Opus", 0.015, 0.075, "Anthropic", "Advanced reasoning and analysis capabilities"),
                text("claude-3-sonnet", "Claude 3 Sonnet", 0.003, 0.015, "Anthropic", "Balanced performance and cost"),
                text("claude-3-haiku", "Claude 3 Haiku", 0.00025, 0.00125, "Anthropic", "Fastest and most affordable option"),
                text("gemini-pro", "Gemini Pro", 0.0005, 0.0015, "Google", "Multimodal capabilities with competitive pricing"),
            ],
            voice: vec![
                voice("whisper-1", "OpenAI Whisper", 0.006, VoiceUnit::Minute, "$0.006/minute", "OpenAI", "Highly accurate speech-to-text with multilingual support"),
                voice("azure-speech", "Azure Speech Services", 1.0, VoiceUnit::PerThousandMinutes, "$1.0/1000 minutes", "Microsoft", "Enterprise-grade speech recognition and synthesis"),
                voice("google-speech", "Google Speech-to-Text", 1.44, VoiceUnit::Hour, "$1.44/hour", "Google", "Advanced speech recognition with real-time processing"),
                voice("aws-transcribe", "AWS Transcribe", 0.024, VoiceUnit::Minute, "$0.024/minute", "Amazon", "Scalable speech recognition service"),
                voice("assemblyai", "AssemblyAI", 0.00037, VoiceUnit::Second, "$0.00037/second", "AssemblyAI", "AI-powered speech understanding platform"),
                voice("deepgram", "Deepgram Nova-2", 0.0043, VoiceUnit::Minute, "$0.0043/minute", "Deepgram", "Ultra-fast and accurate speech recognition"),
            ],
        }
    }

    /// Parse a user-supplied catalog. Missing display labels are derived; the result is
    /// validated before it is returned.
    pub fn from_json(s: &str) -> Result<Self> {
        let mut catalog: Catalog = serde_json::from_str(s)?;
        for m in &mut catalog.text {
            if m.display_price.is_empty() {
                m.display_price = derive_display_price(m.input_price, None);
            }
        }
        for m in &mut catalog.voice {
            if m.display_price.is_empty() {
                m.display_price = derive_display_price(m.input_price, Some(m.unit));
            }
        }
        catalog.validate()?;
        tracing::debug!(
            text_models = catalog.text.len(),
            voice_models = catalog.voice.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        if self.text.is_empty() {
            return Err(KitnaError::Catalog("text model list is empty".into()));
        }
        if self.voice.is_empty() {
            return Err(KitnaError::Catalog("voice model list is empty".into()));
        }

        let mut seen = HashSet::new();
        let records = self
            .text
            .iter()
            .map(|m| (m.id.as_str(), m.input_price, m.output_price))
            .chain(self.voice.iter().map(|m| (m.id.as_str(), m.input_price, m.output_price)));
        for (id, input, output) in records {
            if id.trim().is_empty() {
                return Err(KitnaError::Catalog("model with empty id".into()));
            }
            if !seen.insert(id) {
                return Err(KitnaError::Catalog(format!("duplicate model id '{}'", id)));
            }
            for price in [input, output] {
                if !price.is_finite() || price < 0.0 {
                    return Err(KitnaError::Catalog(format!(
                        "model '{}' has invalid price {}",
                        id, price
                    )));
                }
            }
        }
        Ok(())
    }

    /// Ordered models of the catalog serving `mode`.
    pub fn models(&self, mode: InputMode) -> Vec<ModelRecord> {
        if mode.is_voice() {
            self.voice.iter().cloned().map(ModelRecord::Voice).collect()
        } else {
            self.text.iter().cloned().map(ModelRecord::Text).collect()
        }
    }

    pub fn default_model(&self, mode: InputMode) -> Result<ModelRecord> {
        let first = if mode.is_voice() {
            self.voice.first().cloned().map(ModelRecord::Voice)
        } else {
            self.text.first().cloned().map(ModelRecord::Text)
        };
        first.ok_or_else(|| KitnaError::Catalog(format!("no models for {} mode", mode)))
    }

    /// Look up a model by id within the catalog serving `mode` only.
    pub fn find(&self, mode: InputMode, id: &str) -> Option<ModelRecord> {
        if mode.is_voice() {
            self.voice.iter().find(|m| m.id == id).cloned().map(ModelRecord::Voice)
        } else {
            self.text.iter().find(|m| m.id == id).cloned().map(ModelRecord::Text)
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
