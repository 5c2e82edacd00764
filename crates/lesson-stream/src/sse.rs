//! Incremental decoding of the `text/event-stream` wire format.
//!
//! The generation endpoint separates events with blank lines, and a single
//! event can arrive split across arbitrary chunk boundaries, so the decoder
//! buffers bytes until a full event is available. Dispatch then mirrors the
//! browser `EventSource` contract the endpoint was written against: only the
//! default message channel carries lesson frames, a named `error` event is
//! terminal, and everything else (comments, heartbeats, other named events)
//! is dropped.

use crate::errors::TransportError;
use crate::transport::StreamFrame;

/// One decoded wire event before dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WireEvent {
    /// Value of the `event:` field, if any.
    pub name: Option<String>,
    /// Joined `data:` lines.
    pub data: String,
}

/// Buffering decoder for a stream of response byte chunks.
#[derive(Default)]
pub(crate) struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    /// Feeds one chunk and returns every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<WireEvent> {
        self.buf.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some((end, delim_len)) = next_boundary(&self.buf) {
            let raw: Vec<u8> = self.buf.drain(..end + delim_len).collect();
            if let Some(event) = decode_event(&raw[..end]) {
                events.push(event);
            }
        }
        events
    }
}

fn next_boundary(buf: &[u8]) -> Option<(usize, usize)> {
    for i in 0..buf.len() {
        let rest = &buf[i..];
        if rest.starts_with(b"\r\n\r\n") {
            return Some((i, 4));
        }
        if rest.starts_with(b"\n\n") {
            return Some((i, 2));
        }
    }
    None
}

fn decode_event(bytes: &[u8]) -> Option<WireEvent> {
    if bytes.is_empty() {
        return None;
    }
    let text = String::from_utf8_lossy(bytes);
    let mut name: Option<String> = None;
    let mut data: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        match line.split_once(':') {
            Some(("event", rest)) => name = Some(rest.trim_start().to_string()),
            Some(("data", rest)) => data.push(rest.trim_start()),
            _ => {}
        }
    }
    if name.is_none() && data.is_empty() {
        return None;
    }
    Some(WireEvent {
        name,
        data: data.join("\n"),
    })
}

/// Maps one wire event onto the frame contract.
///
/// Returns `None` for events the consumer never sees: empty-data messages,
/// and named events other than `error`.
pub(crate) fn dispatch_event(event: WireEvent) -> Option<Result<StreamFrame, TransportError>> {
    match event.name.as_deref() {
        None | Some("message") => {
            if event.data.is_empty() {
                None
            } else {
                Some(Ok(StreamFrame::new(event.data)))
            }
        }
        Some("error") => {
            let message = if event.data.is_empty() {
                "unspecified server error".to_string()
            } else {
                event.data
            };
            Some(Err(TransportError::server(message)))
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_survive_chunk_boundaries() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.feed(b"data: Quantum mechanics desc").is_empty());
        let events = decoder.feed(b"ribes...\n\n");
        assert_eq!(
            events,
            vec![WireEvent {
                name: None,
                data: "Quantum mechanics describes...".into(),
            }]
        );
    }

    #[test]
    fn one_chunk_can_complete_several_events() {
        let mut decoder = SseDecoder::default();
        let events = decoder.feed(b"data: one\n\ndata: two\n\n");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data, "one");
        assert_eq!(events[1].data, "two");
    }

    #[test]
    fn crlf_delimiters_are_accepted() {
        let mut decoder = SseDecoder::default();
        let events = decoder.feed(b"event: complete\r\ndata: {}\r\n\r\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name.as_deref(), Some("complete"));
        assert_eq!(events[0].data, "{}");
    }

    #[test]
    fn comment_heartbeats_produce_no_event() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.feed(b": ping\n\n").is_empty());
    }

    #[test]
    fn multiple_data_lines_join_with_newlines() {
        let mut decoder = SseDecoder::default();
        let events = decoder.feed(b"data: first\ndata: second\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "first\nsecond");
    }

    #[test]
    fn default_channel_events_become_frames() {
        let frame = dispatch_event(WireEvent {
            name: None,
            data: "hello".into(),
        });
        assert_eq!(frame, Some(Ok(StreamFrame::new("hello"))));

        let named = dispatch_event(WireEvent {
            name: Some("message".into()),
            data: "hello".into(),
        });
        assert_eq!(named, Some(Ok(StreamFrame::new("hello"))));
    }

    #[test]
    fn empty_data_messages_are_not_dispatched() {
        let frame = dispatch_event(WireEvent {
            name: None,
            data: String::new(),
        });
        assert_eq!(frame, None);
    }

    #[test]
    fn error_events_are_terminal() {
        let frame = dispatch_event(WireEvent {
            name: Some("error".into()),
            data: r#"{"error":"generation failed"}"#.into(),
        });
        assert_eq!(
            frame,
            Some(Err(TransportError::server(r#"{"error":"generation failed"}"#)))
        );
    }

    #[test]
    fn other_named_events_are_dropped() {
        let frame = dispatch_event(WireEvent {
            name: Some("progress".into()),
            data: "50".into(),
        });
        assert_eq!(frame, None);
    }
}
