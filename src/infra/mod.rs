pub mod gemini;
pub mod groq;

use serde::Deserialize;

use crate::services::GenerationFault;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Best-effort extraction of the upstream error message: structured error
/// body first, raw body text otherwise.
pub(crate) fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Map a request-level failure (no HTTP response received) to a fault kind.
pub(crate) fn classify_request_error(err: reqwest::Error) -> GenerationFault {
    if err.is_timeout() {
        GenerationFault::Timeout
    } else if err.is_connect() {
        GenerationFault::Network(err.to_string())
    } else {
        GenerationFault::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_structured_error_message() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        assert_eq!(upstream_message(body), "Invalid API Key");
    }

    #[test]
    fn falls_back_to_raw_body_text() {
        assert_eq!(upstream_message("service unavailable"), "service unavailable");
        assert_eq!(upstream_message("{}"), "{}");
    }
}
