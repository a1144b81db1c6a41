use reqwest::StatusCode;
use reqwest::header::{ETAG, HeaderMap};

/// The outcome of a successful call: HTTP status, response headers and the decoded body.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub status_code: StatusCode,
    pub headers: HeaderMap,
    pub result: T,
}

impl<T> DetailedResponse<T> {
    /// The `ETag` header, used as `If-Match` on a later update or delete.
    pub fn etag(&self) -> Option<&str> {
        self.headers.get(ETAG).and_then(|value| value.to_str().ok())
    }

    /// A response header by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn into_result(self) -> T {
        self.result
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse {
            status_code: self.status_code,
            headers: self.headers,
            result: f(self.result),
        }
    }
}
