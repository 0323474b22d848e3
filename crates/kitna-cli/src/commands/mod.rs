pub mod compare;
pub mod estimate;
pub mod models;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use kitna_core::{Catalog, InputMode, MockTranscriber, Session};
use kitna_input::TextSource;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Raw input shared by `estimate` and `compare`.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input mode: text, tokens, voice
    #[arg(long, default_value = "text")]
    pub mode: String,

    /// Text to estimate (text mode; typed transcription in voice mode)
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read text from a file instead of --text or stdin
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Explicit token count (tokens mode)
    #[arg(long)]
    pub tokens: Option<String>,

    /// Audio or video upload, priced by file size (voice mode)
    #[arg(long)]
    pub audio: Option<PathBuf>,

    /// Transcription of the audio, if you already have one (voice mode)
    #[arg(long)]
    pub transcript: Option<String>,

    /// Simulate a recording with the mock transcriber (voice mode)
    #[arg(long, default_value_t = false)]
    pub record: bool,
}

/// Parse an input mode string.
pub fn parse_mode(mode: &str) -> Result<InputMode> {
    Ok(mode.parse::<InputMode>()?)
}

fn warn_ignored(flag: &str, mode: InputMode) {
    eprintln!("  {} {} is ignored in {} mode", "!".yellow(), flag, mode);
}

fn read_text_input(input: &InputArgs) -> Result<Option<String>> {
    let source = match (&input.text, &input.file) {
        (Some(text), _) => TextSource::Inline(text.clone()),
        (None, Some(path)) => TextSource::File(path.clone()),
        (None, None) if !std::io::stdin().is_terminal() => TextSource::Stdin,
        (None, None) => return Ok(None),
    };
    Ok(Some(kitna_input::read_text(&source)?))
}

/// Build a session in the requested mode with every applicable input applied.
pub fn build_session(catalog: Catalog, input: &InputArgs, model: Option<&str>) -> Result<Session> {
    let mode = parse_mode(&input.mode)?;
    let mut session = Session::new(catalog)?;
    session.set_mode(mode)?;
    if let Some(id) = model {
        session.select_model(id)?;
    }

    match mode {
        InputMode::Text => {
            for (flag, set) in [
                ("--tokens", input.tokens.is_some()),
                ("--audio", input.audio.is_some()),
                ("--transcript", input.transcript.is_some()),
                ("--record", input.record),
            ] {
                if set {
                    warn_ignored(flag, mode);
                }
            }
            if let Some(text) = read_text_input(input)? {
                session.set_text(text);
            }
        }
        InputMode::Tokens => {
            for (flag, set) in [
                ("--text", input.text.is_some()),
                ("--file", input.file.is_some()),
                ("--audio", input.audio.is_some()),
                ("--transcript", input.transcript.is_some()),
                ("--record", input.record),
            ] {
                if set {
                    warn_ignored(flag, mode);
                }
            }
            if let Some(tokens) = &input.tokens {
                session.set_token_input(tokens.clone());
            }
        }
        InputMode::Voice => {
            if input.tokens.is_some() {
                warn_ignored("--tokens", mode);
            }
            // Attaching a file clears text, so it goes first.
            if let Some(path) = &input.audio {
                let file = kitna_input::load_voice_file(path)
                    .with_context(|| format!("could not use {} as voice input", path.display()))?;
                eprintln!(
                    "{} Using {} {} ({} bytes)",
                    "→".cyan(),
                    file.kind,
                    kitna_input::short_path(path),
                    file.size_bytes
                );
                session.attach_voice_file(file);
            }
            if input.record {
                eprintln!("{} Recording (mock transcriber)...", "→".cyan());
                session.record_voice(&MockTranscriber)?;
            }
            let typed = match &input.transcript {
                Some(t) => Some(t.clone()),
                None if input.text.is_some() || input.file.is_some() => read_text_input(input)?,
                None => None,
            };
            if let Some(text) = typed {
                session.set_text(text);
            }
        }
    }

    Ok(session)
}

/// Reject an output format the command does not render.
pub fn check_format(format: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&format) {
        Ok(())
    } else {
        bail!("unknown format '{}': expected {}", format, allowed.join(", "))
    }
}

/// Write `content` to `out`, or print it.
pub fn write_or_print(content: &str, out: Option<&PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("could not write {}", path.display()))?;
            eprintln!("{} Written to {}", "✓".green(), path.display());
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
