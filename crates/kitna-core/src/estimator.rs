/// Heuristic token estimator.
///
/// Short purely alphabetic words count as one token, medium words as one token per
/// four characters, and long words as one per 3.5 characters. Every symbol that is not
/// `[A-Za-z0-9_]` adds 0.3 and every newline in the raw text adds 0.5. The fractional
/// total is rounded up once at the end.
///
/// Lengths and symbol counts are taken in UTF-16 code units, so a character outside
/// the Basic Multilingual Plane (most emoji) weighs as two.
///
/// This approximates typical BPE vocabularies; it does not reproduce any vendor's
/// tokenizer.
pub fn estimate_tokens(text: &str) -> u64 {
    let trimmed = text.trim_matches(is_separator);
    if trimmed.is_empty() {
        return 0;
    }

    let mut total = 0.0_f64;
    for word in trimmed.split(is_separator).filter(|w| !w.is_empty()) {
        total += word_tokens(word);
        total += 0.3 * punctuation_count(word) as f64;
    }

    let newlines = text.chars().filter(|&c| c == '\n').count();
    total += 0.5 * newlines as f64;

    total.ceil() as u64
}

/// ECMAScript whitespace: Unicode `White_Space` plus the byte order mark, minus NEL.
fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

fn word_tokens(word: &str) -> f64 {
    let len = word.encode_utf16().count();
    if len <= 4 && word.chars().all(|c| c.is_ascii_alphabetic()) {
        1.0
    } else if len <= 8 {
        (len as f64 / 4.0).ceil()
    } else {
        (len as f64 / 3.5).ceil()
    }
}

fn punctuation_count(word: &str) -> usize {
    word.chars()
        .filter(|&c| !(c.is_ascii_alphanumeric() || c == '_' || is_separator(c)))
        .map(char::len_utf16)
        .sum()
}
