//! Client-side consumer for the streamed lesson-generation endpoint.
//!
//! The backend pushes one long-lived `text/event-stream` response per
//! session, interleaving reasoning-trace records, lesson prose, and a
//! terminal completion signal on a single channel without a type tag for the
//! prose. [`LessonStream`] opens the connection, classifies every frame, and
//! folds the results into a [`LessonSnapshot`] a rendering layer can observe
//! through snapshots and change notifications.
//!
//! # Usage
//!
//! ```no_run
//! use learnloop_lesson_stream::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), TransportError> {
//! let target = StreamTarget::new("http://localhost:8000/api/v1/lessons/stream")
//!     .param("subsection_id", "7")
//!     .param("subsection_title", "Introduction to Waves");
//! let mut stream = LessonStream::open(target)?;
//!
//! while stream.changed().await {
//!     let snapshot = stream.snapshot();
//!     if let Some(error) = &snapshot.error {
//!         eprintln!("stream failed: {error}");
//!     }
//! }
//! println!("{}", stream.snapshot().lesson_text);
//! # Ok(())
//! # }
//! ```

/// Per-frame classification of stream payloads.
pub mod classify;
/// The consumer, its sessions, and snapshot subscriptions.
pub mod consumer;
/// Transport failure taxonomy.
pub mod errors;
/// HTTP transport for the generation endpoint.
pub mod http;
/// Common imports for typical usage.
pub mod prelude;
/// Derived session state observed by the rendering layer.
pub mod snapshot;
/// Connection targets: endpoint plus query parameters.
pub mod target;
/// Transport seam between the consumer and the wire.
pub mod transport;

mod sse;

pub use classify::{FrameKind, classify};
pub use consumer::{LessonStream, SnapshotUpdates};
pub use errors::TransportError;
pub use http::{HttpTransport, HttpTransportConfig};
pub use snapshot::{LessonSnapshot, ReasoningTrace};
pub use target::StreamTarget;
pub use transport::{FrameStream, LessonTransport, StreamFrame};
