//! Translation of raw bundler diagnostics into positional errors.
//!
//! The bundler reports failures as opaque `OxcDiagnostic` payloads with byte
//! spans into the source it was given. This module picks the first offending
//! token, maps its byte offset back to a line/column position in the original
//! source text, and normalizes the message into the phrasing component
//! authors see from their own JavaScript tooling.

use lazy_static::lazy_static;
use oxc_diagnostics::OxcDiagnostic;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// oxc's expect-token phrasing. The expectation may be a single token or
    /// an alternative list: "Expected `)` but found `;`",
    /// "Expected `,` or `)` but found `;`".
    static ref EXPECT_TOKEN_RE: Regex =
        Regex::new("^Expected (.+) but found `[^`]+`$").unwrap();
    /// A backtick-quoted token inside the expectation list.
    static ref TOKEN_RE: Regex = Regex::new("`([^`]+)`").unwrap();
}

/// A normalized syntax/transform failure. `line` is 1-based; `column` is the
/// 0-based character offset within that line, both in terms of the original
/// (pre-transform) source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub message: String,
    pub line: u32,
    pub column: u32,
    /// The bundler's untranslated message, kept for callers that want it.
    pub raw: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.message, self.line, self.column)
    }
}

/// Normalize the bundler's failure payload against the source it failed on.
///
/// The first offending token is the label with the lowest byte offset across
/// the reported diagnostics; diagnostics without a span sort last and fall
/// back to the start of the source.
pub fn from_parser_errors(source: &str, errors: &[OxcDiagnostic]) -> Diagnostic {
    let first = errors
        .iter()
        .min_by_key(|error| label_offset(error).unwrap_or(usize::MAX));

    match first {
        Some(error) => {
            let raw = error.message.to_string();
            let offset = label_offset(error).unwrap_or(0);
            let (line, column) = position_of(source, offset);
            Diagnostic {
                message: normalize_message(&raw),
                line,
                column,
                raw,
            }
        }
        None => Diagnostic {
            message: "unknown bundler failure".to_string(),
            line: 1,
            column: 0,
            raw: String::new(),
        },
    }
}

fn label_offset(error: &OxcDiagnostic) -> Option<usize> {
    error
        .labels
        .as_ref()
        .and_then(|labels| labels.first())
        .map(|label| label.offset())
}

/// Rephrase oxc's expect-token message into the Babel-style wording the
/// platform has always surfaced, keeping every expected alternative:
/// "Expected `,` or `)` but found `;`" becomes
/// `Unexpected token, expected "," or ")"`. Anything else passes through
/// verbatim.
fn normalize_message(raw: &str) -> String {
    if let Some(caps) = EXPECT_TOKEN_RE.captures(raw) {
        let expectation = &caps[1];
        if TOKEN_RE.is_match(expectation) {
            let quoted = TOKEN_RE.replace_all(expectation, "\"$1\"");
            return format!("Unexpected token, expected {quoted}");
        }
    }
    raw.to_string()
}

/// Map a byte offset into (1-based line, 0-based character column).
fn position_of(source: &str, offset: usize) -> (u32, u32) {
    let clamped = offset.min(source.len());
    let mut line = 1u32;
    let mut line_start = 0usize;

    for (index, byte) in source.as_bytes()[..clamped].iter().enumerate() {
        if *byte == b'\n' {
            line += 1;
            line_start = index + 1;
        }
    }

    // Columns count characters, not bytes. Offsets from the parser land on
    // character boundaries; fall back to byte distance if one ever does not.
    let column = source
        .get(line_start..clamped)
        .map(|text| text.chars().count())
        .unwrap_or(clamped - line_start) as u32;

    (line, column)
}
