/// One reasoning step reported by the lesson-generation backend.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReasoningTrace {
    /// Producer-assigned step counter; increases across the session.
    pub step_number: u64,
    /// Category label, for example `analysis` or `planning`.
    pub step_type: String,
    /// Human-readable text of the step.
    pub content: String,
}

/// Point-in-time view of everything a streaming session has produced.
///
/// Traces and prose are append-only and reflect arrival order exactly;
/// `is_complete` latches true once; `error` is set at most once per session.
/// `Default` is the state of a fresh session before any frame arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LessonSnapshot {
    /// Reasoning traces in exact arrival order.
    pub traces: Vec<ReasoningTrace>,
    /// Accumulated lesson prose, one line separator per fragment.
    pub lesson_text: String,
    /// True once the server has signalled completion.
    pub is_complete: bool,
    /// Terminal failure message, if the session failed.
    pub error: Option<String>,
}

impl LessonSnapshot {
    /// Returns true once the session can produce no further updates.
    pub fn is_terminal(&self) -> bool {
        self.is_complete || self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_the_reset_state() {
        let snapshot = LessonSnapshot::default();
        assert!(snapshot.traces.is_empty());
        assert_eq!(snapshot.lesson_text, "");
        assert!(!snapshot.is_complete);
        assert_eq!(snapshot.error, None);
        assert!(!snapshot.is_terminal());
    }

    #[test]
    fn complete_or_errored_snapshots_are_terminal() {
        let complete = LessonSnapshot {
            is_complete: true,
            ..LessonSnapshot::default()
        };
        assert!(complete.is_terminal());

        let failed = LessonSnapshot {
            error: Some("connection refused".into()),
            ..LessonSnapshot::default()
        };
        assert!(failed.is_terminal());
    }
}
