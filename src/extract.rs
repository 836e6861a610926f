//! JSON extraction from free-form generator text.
//!
//! The generator is asked for a JSON-only reply but is not trusted to
//! produce one: replies arrive with explanatory preambles, markdown fences
//! and trailing commentary. This module finds the first balanced JSON object
//! span in the text and deserializes it into a typed payload. Typed
//! deserialization doubles as the schema gate: a missing or mistyped field
//! rejects the payload instead of surfacing downstream as a blank value.

use serde::de::DeserializeOwned;

use crate::error::{Result, SpecCheckError};

/// Find the first balanced `{...}` span in `text`, honoring string literals
/// and escape sequences. Returns `None` when no complete object exists.
///
/// Candidate spans open at each `{` in order; an opener whose object never
/// closes (for example a stray brace in prose) is skipped and the scan
/// resumes at the next opener.
pub fn find_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(len) = balanced_span_len(&text[start..]) {
            return Some(&text[start..start + len]);
        }
        search_from = start + 1;
    }
    None
}

/// Byte length of the balanced object span at the start of `text`, which
/// must begin with `{`. `None` when the braces never balance.
fn balanced_span_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract and deserialize a payload of type `T` from raw generator text.
///
/// The first balanced object span is parsed; when no span exists at all the
/// entire text is tried as JSON. Failures carry the original raw text for
/// diagnostics and are terminal: malformed responses are never retried.
pub fn parse_payload<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let candidate = find_json_object(raw).unwrap_or(raw);
    serde_json::from_str(candidate).map_err(|e| SpecCheckError::MalformedUpstreamResponse {
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}
