//! Turns model output into plain display text.
//!
//! Extraction pulls the text parts out of a structured candidate. Sanitizing
//! then strips the labels and markup symbols that generated text tends to
//! carry (markdown headings, bold markers, stray braces) and tightens blank
//! lines.

use crate::{Error, Result, llm::CandidateContent};
use once_cell::sync::Lazy;
use regex::Regex;

const PARTS_LABEL: &str = "Parts:";
const MODEL_ROLE_MARKER: &str = "Role:model";

static MARKUP_SYMBOLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[&{}#\[\]*]+").expect("markup symbol pattern is valid"));

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("blank line pattern is valid"));

/// Concatenates the candidate's text parts.
///
/// Fails with [`Error::EmptyCandidate`] when no part carries any text.
pub fn extract_text(content: &CandidateContent, provider: &'static str) -> Result<String> {
    let text: String = content.parts.concat();

    if text.trim().is_empty() {
        return Err(Error::EmptyCandidate { provider });
    }

    Ok(text)
}

/// Cleans raw model text. Steps run in a fixed order:
/// label and role markers, markup symbol runs, repeated newlines, outer whitespace.
///
/// A second pass leaves ordinary text unchanged. It is not a fixed point for
/// every input: removing symbols or a marker can join fragments into a new
/// `Parts:` or `Role:model` (`"Par*ts: hi"` becomes `"Parts: hi"`), which
/// only the next pass strips.
pub fn sanitize(raw: &str) -> String {
    let text = raw.replace(PARTS_LABEL, "").replace(MODEL_ROLE_MARKER, "");
    let text = MARKUP_SYMBOLS.replace_all(&text, "");
    let text = BLANK_LINES.replace_all(&text, "\n");

    text.trim().to_string()
}
