/// Failures raised while opening or reading a lesson stream.
///
/// A terminal error's `Display` text becomes the session snapshot's `error`
/// string; the consumer itself never propagates these past its boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Client construction or target configuration was invalid.
    #[error("stream config error: {message}")]
    Config { message: String },
    /// The request could not be sent.
    #[error("failed to open lesson stream: {message}")]
    Connect { message: String },
    /// The server answered with a non-success status.
    #[error("lesson stream request failed with status {status}: {message}")]
    Http { status: u16, message: String },
    /// The response byte stream failed mid-session.
    #[error("lesson stream read failed: {message}")]
    Read { message: String },
    /// The server pushed an explicit error event.
    #[error("server reported stream error: {message}")]
    Server { message: String },
}

impl TransportError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    /// Creates an HTTP status error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a mid-stream read error.
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Creates a server-signalled error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Returns the human-readable message for this error.
    pub fn message(&self) -> &str {
        match self {
            Self::Config { message }
            | Self::Connect { message }
            | Self::Http { message, .. }
            | Self::Read { message }
            | Self::Server { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_message() {
        let err = TransportError::http(502, "bad gateway");
        assert_eq!(
            err.to_string(),
            "lesson stream request failed with status 502: bad gateway"
        );
        assert_eq!(err.message(), "bad gateway");
    }
}
