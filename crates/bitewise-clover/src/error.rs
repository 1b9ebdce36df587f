use thiserror::Error;

pub(crate) const DEFAULT_UPSTREAM_MESSAGE: &str = "Error fetching data from Clover API";

/// Errors returned by [`crate::CloverClient`].
#[derive(Debug, Error)]
pub enum CloverError {
    /// Clover answered with a non-2xx status.
    #[error("Clover API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Transport failure before a response arrived (DNS, connect, timeout, reset).
    #[error("A network error occurred: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx body that does not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Clover base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl CloverError {
    /// HTTP status to hand back to our own caller.
    ///
    /// Upstream statuses pass through unchanged; everything else is a server fault.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            CloverError::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// Client-facing message. Upstream messages pass through verbatim.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            CloverError::Upstream { message, .. } => message.clone(),
            CloverError::Network(_) => self.to_string(),
            CloverError::Deserialize { .. } => "Invalid response from Clover API".to_string(),
            CloverError::InvalidBaseUrl(_) => "Clover API is misconfigured".to_string(),
        }
    }
}

/// Pulls the `message` field out of a Clover error body, falling back to a
/// generic message when the body is empty, not JSON, or has no such field.
pub(crate) fn extract_upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| DEFAULT_UPSTREAM_MESSAGE.to_string(), ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_keeps_status_and_message() {
        let err = CloverError::Upstream {
            status: 404,
            message: "merchant not found".to_string(),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.detail(), "merchant not found");
    }

    #[test]
    fn deserialize_error_is_server_fault() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CloverError::Deserialize {
            context: "categories".to_string(),
            source,
        };
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn extract_upstream_message_reads_message_field() {
        assert_eq!(
            extract_upstream_message(r#"{"message":"merchant not found"}"#),
            "merchant not found"
        );
    }

    #[test]
    fn extract_upstream_message_falls_back_when_missing() {
        assert_eq!(extract_upstream_message(r#"{"code":401}"#), DEFAULT_UPSTREAM_MESSAGE);
        assert_eq!(extract_upstream_message("<html>502</html>"), DEFAULT_UPSTREAM_MESSAGE);
        assert_eq!(extract_upstream_message(""), DEFAULT_UPSTREAM_MESSAGE);
    }

    #[test]
    fn extract_upstream_message_ignores_non_string_message() {
        assert_eq!(extract_upstream_message(r#"{"message":42}"#), DEFAULT_UPSTREAM_MESSAGE);
    }
}
