use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

use crate::common::polymorphic::DecodeError;

/// Result alias used by every operation in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by VPC service operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The call did not complete within the configured timeout.
    #[error("{operation}: did not complete within {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },
    /// The service answered with a non-2xx status.
    #[error(transparent)]
    Api(Box<ApiError>),
    /// The response body did not match the expected shape.
    #[error("{operation}: failed to decode response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: DecodeError,
    },
    /// The request was rejected locally before it was sent.
    #[error("{operation}: invalid request: {message}")]
    InvalidRequest {
        operation: &'static str,
        message: String,
    },
    /// The authenticator could not produce credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),
    /// External configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid(operation: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn decode(operation: &'static str, source: impl Into<DecodeError>) -> Self {
        Error::Decode {
            operation,
            source: source.into(),
        }
    }

    /// The service error, when the failure came from a non-2xx response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().map(|api| api.status)
    }

    /// Classification of the service error, if there was one.
    pub fn kind(&self) -> Option<ApiErrorKind> {
        self.api_error().map(|api| api.kind)
    }

    /// Request id reported by the service, for support correlation.
    pub fn request_id(&self) -> Option<&str> {
        self.api_error().and_then(|api| api.request_id.as_deref())
    }

    /// True when the service reported the resource as absent.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ApiErrorKind::NotFound)
    }
}

impl From<ApiError> for Error {
    fn from(error: ApiError) -> Self {
        Error::Api(Box::new(error))
    }
}

/// Classification of a non-2xx response by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400: the request was malformed or failed validation.
    Validation,
    /// 401: credentials are missing, invalid or expired.
    Unauthorized,
    /// 403: the caller lacks permission.
    Forbidden,
    /// 404: the resource does not exist.
    NotFound,
    /// 409: the resource is in a conflicting state.
    Conflict,
    /// 412: the `If-Match` precondition did not hold.
    PreconditionFailed,
    /// 429: the caller is being rate limited.
    TooManyRequests,
    /// 5xx.
    Server,
    /// Anything else.
    Other,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::Validation,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            409 => ApiErrorKind::Conflict,
            412 => ApiErrorKind::PreconditionFailed,
            429 => ApiErrorKind::TooManyRequests,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }
}

/// One entry of the `errors` array in a VPC error response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub target: Option<ErrorTarget>,
}

/// The request field or header an error refers to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorTarget {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub target_type: Option<String>,
}

/// A non-2xx response decoded from the service's error envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Operation that failed, e.g. `get_vpc`.
    pub operation: &'static str,
    pub status: u16,
    pub kind: ApiErrorKind,
    pub code: Option<String>,
    pub message: String,
    pub request_id: Option<String>,
    pub more_info: Option<String>,
    pub details: Vec<ErrorDetail>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed with status {}: {}",
            self.operation, self.status, self.message
        )?;
        if let Some(code) = &self.code {
            write!(f, " (code: {})", code)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Build an error from a failed response's status, headers and raw body.
    pub fn from_response(
        operation: &'static str,
        status: u16,
        headers: &HeaderMap,
        body: &str,
    ) -> Self {
        let json: Option<Value> = serde_json::from_str(body).ok();
        let details: Vec<ErrorDetail> = json
            .as_ref()
            .and_then(|value| value.get("errors"))
            .and_then(|errors| serde_json::from_value(errors.clone()).ok())
            .unwrap_or_default();
        let first = details.first();

        let code = json
            .as_ref()
            .and_then(|value| string_field(value, &["code", "errorCode"]))
            .or_else(|| first.and_then(|detail| detail.code.clone()));

        let message = json
            .as_ref()
            .and_then(|value| string_field(value, &["message", "errorMessage", "error"]))
            .or_else(|| first.and_then(|detail| detail.message.clone()))
            .unwrap_or_else(|| fallback_message(status, body));

        let request_id = json
            .as_ref()
            .and_then(|value| string_field(value, &["request-id", "request_id", "trace"]))
            .or_else(|| header_value(headers, "x-request-id"))
            .or_else(|| header_value(headers, "x-correlation-id"));

        let more_info = json
            .as_ref()
            .and_then(|value| string_field(value, &["more_info"]))
            .or_else(|| first.and_then(|detail| detail.more_info.clone()));

        ApiError {
            operation,
            status,
            kind: ApiErrorKind::from_status(status),
            code,
            message,
            request_id,
            more_info,
            details,
        }
    }
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(|field| field.as_str().map(str::to_string))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn fallback_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.chars().take(200).collect();
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn parses_flat_envelope() {
        let body = r#"{"code":"not_found","message":"VPC not found","request-id":"req-1"}"#;
        let error = ApiError::from_response("get_vpc", 404, &HeaderMap::new(), body);

        assert_eq!(error.kind, ApiErrorKind::NotFound);
        assert_eq!(error.code.as_deref(), Some("not_found"));
        assert_eq!(error.message, "VPC not found");
        assert_eq!(error.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn parses_errors_array_with_trace() {
        let body = r#"{
            "errors": [{
                "code": "validation_required_field_missing",
                "message": "If-Match header is required",
                "more_info": "https://cloud.ibm.com/docs",
                "target": {"name": "If-Match", "type": "header"}
            }],
            "trace": "7e2b0b42-0f13-4a37-bd9b-3d9a4a0f7c55"
        }"#;
        let error = ApiError::from_response("update_volume", 400, &HeaderMap::new(), body);

        assert_eq!(error.kind, ApiErrorKind::Validation);
        assert_eq!(
            error.code.as_deref(),
            Some("validation_required_field_missing")
        );
        assert_eq!(error.message, "If-Match header is required");
        assert_eq!(
            error.request_id.as_deref(),
            Some("7e2b0b42-0f13-4a37-bd9b-3d9a4a0f7c55")
        );
        assert_eq!(error.details.len(), 1);
        assert_eq!(
            error.details[0]
                .target
                .as_ref()
                .and_then(|target| target.target_type.as_deref()),
            Some("header")
        );
    }

    #[test]
    fn falls_back_to_headers_and_reason() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("hdr-9"));
        let error = ApiError::from_response("delete_vpc", 503, &headers, "");

        assert_eq!(error.kind, ApiErrorKind::Server);
        assert_eq!(error.message, "Service Unavailable");
        assert_eq!(error.request_id.as_deref(), Some("hdr-9"));
    }

    #[test]
    fn error_helpers_expose_api_details() {
        let api = ApiError::from_response(
            "get_subnet",
            404,
            &HeaderMap::new(),
            r#"{"message":"gone","request-id":"abc"}"#,
        );
        let error = Error::from(api);

        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.request_id(), Some("abc"));
        assert!(error.to_string().contains("get_subnet failed with status 404"));
    }
}
