use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use futures::StreamExt as _;
use futures::stream;
use tracing::debug;

use crate::errors::TransportError;
use crate::sse::{SseDecoder, dispatch_event};
use crate::target::StreamTarget;
use crate::transport::{FrameStream, LessonTransport, StreamFrame};

type ByteStream =
    Pin<Box<dyn futures::Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static>>;

/// Configuration for the HTTP lesson transport.
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Bound on connection establishment only.
    ///
    /// The stream itself is long-lived and carries no read timeout.
    pub connect_timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// [`LessonTransport`] backed by one `reqwest` GET request per session.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport from explicit configuration.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TransportError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Creates a transport with default configuration.
    pub fn with_defaults() -> Result<Self, TransportError> {
        Self::new(HttpTransportConfig::default())
    }

    fn build_request(&self, target: &StreamTarget) -> Result<reqwest::Request, TransportError> {
        self.client
            .get(&target.base_url)
            .query(&target.params)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .build()
            .map_err(|e| TransportError::config(format!("invalid stream target: {e}")))
    }
}

#[async_trait::async_trait]
impl LessonTransport for HttpTransport {
    async fn connect(&self, target: &StreamTarget) -> Result<FrameStream, TransportError> {
        let request = self.build_request(target)?;
        debug!(url = %request.url(), "opening lesson stream");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::connect(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TransportError::http(status.as_u16(), body));
        }

        let bytes: ByteStream = Box::pin(response.bytes_stream());
        Ok(Box::pin(frame_stream(bytes)))
    }
}

fn frame_stream(
    bytes: ByteStream,
) -> impl futures::Stream<Item = Result<StreamFrame, TransportError>> + Send {
    struct State {
        bytes: ByteStream,
        decoder: SseDecoder,
        pending: VecDeque<Result<StreamFrame, TransportError>>,
        done: bool,
    }

    stream::unfold(
        State {
            bytes,
            decoder: SseDecoder::default(),
            pending: VecDeque::new(),
            done: false,
        },
        |mut state| async move {
            loop {
                if let Some(item) = state.pending.pop_front() {
                    return Some((item, state));
                }
                if state.done {
                    return None;
                }
                match state.bytes.next().await {
                    Some(Ok(chunk)) => {
                        for event in state.decoder.feed(&chunk) {
                            if let Some(item) = dispatch_event(event) {
                                state.pending.push_back(item);
                            }
                        }
                    }
                    Some(Err(e)) => {
                        // A failed read ends the session after the error is
                        // yielded; no frames past it are decoded.
                        state.done = true;
                        state.pending.push_back(Err(TransportError::read(e.to_string())));
                    }
                    None => state.done = true,
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_carries_query_parameters() {
        let transport = HttpTransport::with_defaults().expect("transport");
        let target = StreamTarget::new("http://localhost:8000/api/v1/lessons/stream")
            .param("subsection_id", "7")
            .param("subsection_title", "Intro to Waves");
        let request = transport.build_request(&target).expect("request");
        let url = request.url().as_str();
        assert!(url.starts_with("http://localhost:8000/api/v1/lessons/stream?"));
        assert!(url.contains("subsection_id=7"));
        assert!(url.contains("subsection_title=Intro+to+Waves"));
    }

    #[test]
    fn request_asks_for_an_event_stream() {
        let transport = HttpTransport::with_defaults().expect("transport");
        let target = StreamTarget::new("http://localhost:8000/api/v1/lessons/stream");
        let request = transport.build_request(&target).expect("request");
        assert_eq!(
            request
                .headers()
                .get(reqwest::header::ACCEPT)
                .and_then(|v| v.to_str().ok()),
            Some("text/event-stream")
        );
    }

    #[test]
    fn invalid_target_is_a_config_error() {
        let transport = HttpTransport::with_defaults().expect("transport");
        let target = StreamTarget::new("not a url");
        let err = transport.build_request(&target).expect_err("should fail");
        assert!(matches!(err, TransportError::Config { .. }));
    }
}
