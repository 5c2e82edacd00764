use std::pin::Pin;

use crate::errors::TransportError;
use crate::target::StreamTarget;

/// One discrete unit of text pushed by the server over the live connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamFrame {
    /// Raw text payload of the frame.
    pub payload: String,
}

impl StreamFrame {
    /// Creates a frame from any string-like payload.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// Boxed stream of frames, delivered in server push order.
pub type FrameStream =
    Pin<Box<dyn futures::Stream<Item = Result<StreamFrame, TransportError>> + Send + 'static>>;

/// Connection seam between the consumer and the wire.
///
/// The production implementation is [`HttpTransport`](crate::HttpTransport);
/// tests substitute fakes built from in-memory streams.
#[async_trait::async_trait]
pub trait LessonTransport: Send + Sync {
    /// Opens one connection to the target and returns its frame stream.
    ///
    /// The returned stream owns the connection: dropping it closes the
    /// connection.
    async fn connect(&self, target: &StreamTarget) -> Result<FrameStream, TransportError>;
}
