//! Parse-then-validate state machine for raw model output.
//!
//! The model's text is untrusted: it may wrap the JSON object in prose or
//! code fences, use the wrong casing, or be garbage. Validation walks
//! RECEIVED -> PARSED -> SCHEMA_OK -> ACCEPTED, and any failed transition
//! lands in FALLBACK: a `suspected` classification with a synthetic reason.
//! No input ever produces an error; an app is never silently dropped.

use crate::core::{AppRecord, Classification, DetectionConfig, Verdict};
use tracing::{debug, warn};

pub const PARSE_FALLBACK_REASON: &str =
    "Model response could not be parsed. Manual review recommended.";
pub const SCHEMA_FALLBACK_REASON: &str =
    "Analysis produced an invalid format. Manual review recommended.";
pub const TRANSPORT_FALLBACK_REASON: &str =
    "Analysis could not be completed. Manual review recommended.";

/// Terminal state of validating one response. Both variants carry a
/// complete classification; the orchestrator treats them identically.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Accepted(Classification),
    Fallback(Classification),
}

impl ValidationOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn into_classification(self) -> Classification {
        match self {
            Self::Accepted(c) | Self::Fallback(c) => c,
        }
    }
}

/// Validates raw model output for one app. Identity fields always come
/// from the input record so the model cannot relabel a different app.
pub fn validate_response(
    raw: &str,
    app: &AppRecord,
    config: &DetectionConfig,
) -> ValidationOutcome {
    let json_text = match extract_json_object(raw) {
        Some(text) => text,
        None => {
            warn!("No JSON object found in response for {}", app.app_id);
            return ValidationOutcome::Fallback(fallback_classification(
                app,
                PARSE_FALLBACK_REASON,
            ));
        }
    };

    let value: serde_json::Value = match serde_json::from_str(json_text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Response for {} is not valid JSON: {}", app.app_id, e);
            return ValidationOutcome::Fallback(fallback_classification(
                app,
                PARSE_FALLBACK_REASON,
            ));
        }
    };

    match check_schema(&value, config) {
        Some((verdict, reason)) => {
            debug!("Accepted {} classification for {}", verdict, app.app_id);
            ValidationOutcome::Accepted(Classification {
                app_id: app.app_id.clone(),
                app_title: app.title.clone(),
                verdict,
                reason,
            })
        }
        None => {
            warn!("Schema-invalid response for {}", app.app_id);
            ValidationOutcome::Fallback(fallback_classification(app, SCHEMA_FALLBACK_REASON))
        }
    }
}

/// The fallback shape shared by schema failures and transport failures.
pub fn fallback_classification(app: &AppRecord, reason: &str) -> Classification {
    Classification {
        app_id: app.app_id.clone(),
        app_title: app.title.clone(),
        verdict: Verdict::Suspected,
        reason: reason.to_string(),
    }
}

/// Requires both mandatory keys: a known verdict literal (case-insensitive)
/// and a non-empty reason string. Overlong reasons are truncated, not
/// rejected.
fn check_schema(value: &serde_json::Value, config: &DetectionConfig) -> Option<(Verdict, String)> {
    let object = value.as_object()?;
    let verdict = Verdict::from_label(object.get("type")?.as_str()?)?;
    let reason = object.get("reason")?.as_str()?.trim();
    if reason.is_empty() {
        return None;
    }

    Some((
        verdict,
        truncate_chars(reason, config.thresholds.reason_max_chars),
    ))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Locates the first well-formed JSON object inside free text, tolerating
/// leading/trailing prose and ```json fences. Brace matching is string- and
/// escape-aware so braces inside reason strings do not end the object early.
fn extract_json_object(text: &str) -> Option<&str> {
    let text = match text.find("```json") {
        Some(start) => {
            let body = &text[start + 7..];
            match body.find("```") {
                Some(end) => &body[..end],
                None => body,
            }
        }
        None => text,
    };

    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &byte) in bytes[start..].iter().enumerate() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match byte {
            b'\\' if in_string => escape_next = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
