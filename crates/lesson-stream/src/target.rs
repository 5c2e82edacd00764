/// Connection target for one streaming session.
///
/// Two targets compare equal when both the endpoint and the full parameter
/// list (order included) match; the consumer treats an equal target as the
/// same session rather than reconnecting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamTarget {
    /// Endpoint URL without a query string.
    pub base_url: String,
    /// Query parameters serialized into the request URL, in insertion order.
    pub params: Vec<(String, String)>,
}

impl StreamTarget {
    /// Creates a target for the given endpoint with no parameters.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            params: Vec::new(),
        }
    }

    /// Appends one query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_builder_preserves_insertion_order() {
        let target = StreamTarget::new("http://localhost:8000/api/v1/lessons/stream")
            .param("subsection_id", "7")
            .param("subsection_title", "Waves");
        assert_eq!(
            target.params,
            vec![
                ("subsection_id".to_string(), "7".to_string()),
                ("subsection_title".to_string(), "Waves".to_string()),
            ]
        );
    }

    #[test]
    fn equality_covers_endpoint_and_parameters() {
        let a = StreamTarget::new("http://host/stream").param("subsection_id", "1");
        let b = StreamTarget::new("http://host/stream").param("subsection_id", "1");
        let c = StreamTarget::new("http://host/stream").param("subsection_id", "2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
