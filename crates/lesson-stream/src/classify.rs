use serde_json::Value;

use crate::snapshot::ReasoningTrace;

/// Outcome of classifying a single frame payload.
///
/// Classification is content-driven and per-frame; there is no cross-frame
/// buffering or reassembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Terminal signal: the server has no more data for this session.
    Complete,
    /// One decoded reasoning step.
    Trace(ReasoningTrace),
    /// A fragment of lesson prose.
    Prose(String),
    /// Structured data matching neither known shape; the consumer drops it.
    Unrecognized,
}

/// Classifies one frame payload.
///
/// Text that does not parse as JSON is lesson prose, not an error. Parsed
/// records are matched by field presence: an `event` of `"complete"` wins,
/// then a non-empty string `step_type` marks a reasoning trace. Trace fields
/// beyond `step_type` are optional and default when absent.
pub fn classify(payload: &str) -> FrameKind {
    let Ok(value) = serde_json::from_str::<Value>(payload) else {
        return FrameKind::Prose(payload.to_string());
    };
    if value.get("event").and_then(Value::as_str) == Some("complete") {
        return FrameKind::Complete;
    }
    match value.get("step_type").and_then(Value::as_str) {
        Some(step_type) if !step_type.is_empty() => FrameKind::Trace(ReasoningTrace {
            step_number: value
                .get("step_number")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            step_type: step_type.to_string(),
            content: value
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }),
        _ => FrameKind::Unrecognized,
    }
}
