use std::sync::Arc;

use futures::StreamExt as _;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::classify::{FrameKind, classify};
use crate::errors::TransportError;
use crate::http::HttpTransport;
use crate::snapshot::LessonSnapshot;
use crate::target::StreamTarget;
use crate::transport::LessonTransport;

/// Consumes one lesson stream at a time and exposes its derived state.
///
/// Opening a consumer immediately starts a session for the target. Changing
/// the target discards the running session (connection and all derived
/// state) and starts a fresh one; dropping the consumer tears the session
/// down unconditionally. At most one connection is ever attached to the
/// outputs, and a discarded session can never mutate them again.
///
/// Must be used inside a Tokio runtime: each session runs as a spawned task.
pub struct LessonStream {
    transport: Arc<dyn LessonTransport>,
    target: StreamTarget,
    session: StreamSession,
}

impl LessonStream {
    /// Opens a consumer for the target using the HTTP transport.
    pub fn open(target: StreamTarget) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            target,
            Arc::new(HttpTransport::with_defaults()?),
        ))
    }

    /// Opens a consumer with a caller-provided transport.
    pub fn with_transport(target: StreamTarget, transport: Arc<dyn LessonTransport>) -> Self {
        let session = StreamSession::start(transport.clone(), target.clone());
        Self {
            transport,
            target,
            session,
        }
    }

    /// Returns the target of the current session.
    pub fn target(&self) -> &StreamTarget {
        &self.target
    }

    /// Returns the current snapshot of the session's derived state.
    pub fn snapshot(&self) -> LessonSnapshot {
        self.session.rx.borrow().clone()
    }

    /// Waits for the next snapshot change.
    ///
    /// Returns `false` once the session can produce no further updates; the
    /// final snapshot stays readable through [`snapshot`](Self::snapshot).
    pub async fn changed(&mut self) -> bool {
        self.session.rx.changed().await.is_ok()
    }

    /// Returns an independent subscription to the current session.
    ///
    /// The handle stays bound to this session: it sees no updates from a
    /// session started by a later [`set_target`](Self::set_target).
    pub fn updates(&self) -> SnapshotUpdates {
        SnapshotUpdates {
            rx: self.session.rx.clone(),
        }
    }

    /// Replaces the connection target.
    ///
    /// A target equal to the current one is a no-op. Otherwise the running
    /// session is discarded, every output resets to its initial state, and a
    /// fresh connection is opened.
    pub fn set_target(&mut self, target: StreamTarget) {
        if target == self.target {
            return;
        }
        self.target = target;
        self.session = StreamSession::start(self.transport.clone(), self.target.clone());
    }
}

/// Per-session subscription handle for a rendering layer.
#[derive(Clone)]
pub struct SnapshotUpdates {
    rx: watch::Receiver<LessonSnapshot>,
}

impl SnapshotUpdates {
    /// Returns the session snapshot as of now.
    pub fn current(&self) -> LessonSnapshot {
        self.rx.borrow().clone()
    }

    /// Waits for the next snapshot change; `false` once the session is over.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

struct StreamSession {
    session_id: uuid::Uuid,
    rx: watch::Receiver<LessonSnapshot>,
    task: JoinHandle<()>,
}

impl StreamSession {
    fn start(transport: Arc<dyn LessonTransport>, target: StreamTarget) -> Self {
        let session_id = uuid::Uuid::new_v4();
        let (tx, rx) = watch::channel(LessonSnapshot::default());
        let task = tokio::spawn(session_task(session_id, transport, target, tx));
        Self {
            session_id,
            rx,
            task,
        }
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        // The task owns the connection; aborting it closes the connection and
        // stops all snapshot mutation for this session.
        self.task.abort();
        debug!(session_id = %self.session_id, "lesson stream session closed");
    }
}

async fn session_task(
    session_id: uuid::Uuid,
    transport: Arc<dyn LessonTransport>,
    target: StreamTarget,
    tx: watch::Sender<LessonSnapshot>,
) {
    let mut frames = match transport.connect(&target).await {
        Ok(frames) => frames,
        Err(err) => {
            warn!(session_id = %session_id, error = %err, "lesson stream failed to open");
            tx.send_modify(|snapshot| snapshot.error = Some(err.to_string()));
            return;
        }
    };
    debug!(session_id = %session_id, url = %target.base_url, "lesson stream opened");

    while let Some(next) = frames.next().await {
        let frame = match next {
            Ok(frame) => frame,
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "lesson stream transport failed");
                tx.send_modify(|snapshot| snapshot.error = Some(err.to_string()));
                return;
            }
        };
        match classify(&frame.payload) {
            FrameKind::Complete => {
                debug!(session_id = %session_id, "lesson stream complete");
                tx.send_modify(|snapshot| snapshot.is_complete = true);
                return;
            }
            FrameKind::Trace(trace) => {
                tx.send_modify(|snapshot| snapshot.traces.push(trace));
            }
            FrameKind::Prose(text) => {
                tx.send_modify(|snapshot| {
                    snapshot.lesson_text.push_str(&text);
                    snapshot.lesson_text.push('\n');
                });
            }
            FrameKind::Unrecognized => {
                debug!(session_id = %session_id, payload = %frame.payload, "dropping unrecognized structured frame");
            }
        }
    }

    // The server closes the connection only after the completion signal;
    // ending without one is a failure, same as a dropped connection.
    warn!(session_id = %session_id, "lesson stream ended before completion signal");
    tx.send_modify(|snapshot| {
        snapshot.error = Some("lesson stream ended before completion signal".to_string());
    });
}
