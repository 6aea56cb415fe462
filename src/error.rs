//! Typed error hierarchy for the edge-api crate.
//!
//! `EdgeError` covers every failure boundary a caller can branch on:
//! - `Validation`: a request was rejected locally, before any network call.
//! - `Network`: transport-level failure (DNS, TCP, TLS, timeout).
//! - `Api`: the API answered with a status outside the operation's
//!   success set. The raw body is kept, and decoded as an RFC 7807
//!   problem document when it parses as one.
//! - `ResourceNotFound` / `InvalidPattern`: resource matching produced no
//!   result, or the search token was not a valid regular expression.
//! - `Parse`: a success body did not match the expected shape.
//! - `Config`: the client configuration could not be loaded.

use reqwest::StatusCode;
use serde::Deserialize;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Unified error type for all edge-api library operations.
#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    /// One or more required request fields were missing or zero.
    /// Raised before the request is sent.
    #[error("struct validation: {0}")]
    Validation(#[from] ValidationErrors),

    /// A network-level failure occurred. No HTTP status is available
    /// because the request did not complete.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a status code the operation does not accept.
    #[error("API error {status}: {body}")]
    Api {
        /// The HTTP status code returned by the API.
        status: StatusCode,
        /// The raw response body text, empty if it could not be read.
        body: String,
        /// The decoded problem document, when the body is one.
        problem: Option<Problem>,
    },

    /// Resource matching found nothing for the given token.
    #[error("resource not found: {token}")]
    ResourceNotFound {
        /// The ID or pattern the caller searched for.
        token: String,
    },

    /// The resource token was not a valid regular expression.
    #[error("invalid resource pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// JSON deserialization of a success body failed.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The client configuration file or environment was unusable.
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong, including the file path or profile name.
        message: String,
        /// The underlying I/O or TOML error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EdgeError {
    /// Builds an `Api` error from a status and body, decoding the body as a
    /// problem document when possible.
    pub fn api(status: StatusCode, body: String) -> Self {
        let problem = serde_json::from_str::<Problem>(&body).ok();
        EdgeError::Api {
            status,
            body,
            problem,
        }
    }

    /// Shorthand for a configuration error without an underlying cause.
    pub fn config(message: impl Into<String>) -> Self {
        EdgeError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Sorted names of the fields that failed validation. Empty for every
    /// other variant.
    pub fn invalid_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if let EdgeError::Validation(errors) = self {
            collect_fields(errors, "", &mut fields);
        }
        fields.sort();
        fields
    }

    /// Returns the HTTP status for `Api` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            EdgeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Flattens nested validation failures into dotted field paths
/// (`activation.networks`).
fn collect_fields(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let name = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(_) => out.push(name),
            ValidationErrorsKind::Struct(inner) => {
                collect_fields(inner, &format!("{name}."), out)
            }
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_fields(inner, &format!("{name}."), out);
                }
            }
        }
    }
}

/// RFC 7807 problem details, the error body format used by the API.
///
/// All fields are optional. Upstream error bodies vary between endpoints
/// and extra members (`errors`, `fieldErrors`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// URI identifying the problem type.
    #[serde(rename = "type", default)]
    pub problem_type: Option<String>,
    /// Short summary of the problem.
    #[serde(default)]
    pub title: Option<String>,
    /// Human-readable explanation specific to this occurrence.
    #[serde(default)]
    pub detail: Option<String>,
    /// Status code echoed by the server.
    #[serde(default)]
    pub status: Option<u16>,
    /// URI reference identifying this occurrence.
    #[serde(default)]
    pub instance: Option<String>,
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, EdgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn api_error_decodes_problem_body() {
        let body = r#"{
            "type": "https://problems.example.net/appsec/error-types/NOT-FOUND",
            "title": "Not Found",
            "detail": "Configuration 42 was not found",
            "status": 404,
            "instance": "https://problems.example.net/appsec/error-instances/abc"
        }"#;
        let err = EdgeError::api(StatusCode::NOT_FOUND, body.to_string());
        match &err {
            EdgeError::Api { status, problem, .. } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                let problem = problem.as_ref().expect("problem should decode");
                assert_eq!(problem.title.as_deref(), Some("Not Found"));
                assert_eq!(problem.status, Some(404));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn api_error_keeps_non_json_body() {
        let err = EdgeError::api(
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded".to_string(),
        );
        let msg = err.to_string();
        assert!(msg.contains("500"), "display should include status code");
        assert!(msg.contains("upstream exploded"));
        match err {
            EdgeError::Api { problem, .. } => assert!(problem.is_none()),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn validation_error_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("version", validator::ValidationError::new("range"));
        errors.add("config_id", validator::ValidationError::new("range"));
        let err = EdgeError::from(errors);
        assert!(err.to_string().starts_with("struct validation:"));
        assert_eq!(err.invalid_fields(), vec!["config_id", "version"]);
    }

    #[test]
    fn non_validation_errors_have_no_fields() {
        let err = EdgeError::config("no host");
        assert!(err.invalid_fields().is_empty());
    }

    #[test]
    fn parse_error_chains_to_serde() {
        let json_err = serde_json::from_str::<String>("{{bad json}}").unwrap_err();
        let err = EdgeError::Parse(json_err);
        assert!(err.to_string().contains("failed to parse response"));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_pattern_chains_to_regex() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err = EdgeError::from(regex_err);
        assert!(err.to_string().starts_with("invalid resource pattern"));
        assert!(err.source().is_some());
    }

    #[test]
    fn config_error_with_source_chains() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = EdgeError::Config {
            message: "cannot read /nope.toml".to_string(),
            source: Some(Box::new(io_err)),
        };
        assert!(err.to_string().contains("/nope.toml"));
        assert!(err.source().is_some());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EdgeError>();
    }
}
