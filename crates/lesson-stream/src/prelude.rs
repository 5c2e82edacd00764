//! Common imports for typical consumer usage.
//!
//! This module intentionally exports the most frequently used types so
//! examples and application code need fewer import lines.
pub use crate::{
    FrameKind, HttpTransport, HttpTransportConfig, LessonSnapshot, LessonStream, LessonTransport,
    ReasoningTrace, SnapshotUpdates, StreamFrame, StreamTarget, TransportError,
};
