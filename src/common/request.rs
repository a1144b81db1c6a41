use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::common::merge_patch::MergePatch;
use crate::error::{Error, Result};

/// A request description, resolved against the service URL at send time.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    pub(crate) operation: &'static str,
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(&'static str, String)>,
    pub(crate) headers: Vec<(&'static str, String)>,
    pub(crate) body: Option<Value>,
}

impl ApiRequest {
    pub(crate) fn new(method: Method, operation: &'static str, path: &str) -> Self {
        Self {
            operation,
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn get(operation: &'static str, path: &str) -> Self {
        Self::new(Method::GET, operation, path)
    }

    pub(crate) fn post(operation: &'static str, path: &str) -> Self {
        Self::new(Method::POST, operation, path)
    }

    pub(crate) fn put(operation: &'static str, path: &str) -> Self {
        Self::new(Method::PUT, operation, path)
    }

    pub(crate) fn patch(operation: &'static str, path: &str) -> Self {
        Self::new(Method::PATCH, operation, path)
    }

    pub(crate) fn delete(operation: &'static str, path: &str) -> Self {
        Self::new(Method::DELETE, operation, path)
    }

    /// Substitute `{name}` in the path with the percent-encoded value.
    pub(crate) fn path_param(mut self, name: &str, value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Err(Error::invalid(
                self.operation,
                format!("path parameter '{}' must not be empty", name),
            ));
        }
        let placeholder = format!("{{{}}}", name);
        if !self.path.contains(&placeholder) {
            return Err(Error::invalid(
                self.operation,
                format!("path has no parameter '{}'", name),
            ));
        }
        self.path = self
            .path
            .replace(&placeholder, &urlencoding::encode(value));
        Ok(self)
    }

    pub(crate) fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    pub(crate) fn query_opt<V: ToString>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub(crate) fn if_match(mut self, etag: Option<&str>) -> Self {
        if let Some(etag) = etag {
            self.headers.push(("If-Match", etag.to_string()));
        }
        self
    }

    /// Override the default `application/json` accept type.
    pub(crate) fn accept(mut self, media_type: &'static str) -> Self {
        self.headers.push(("Accept", media_type.to_string()));
        self
    }

    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            Error::invalid(self.operation, format!("failed to serialize body: {e}"))
        })?;
        self.body = Some(value);
        Ok(self)
    }

    pub(crate) fn merge_patch(mut self, patch: &MergePatch) -> Self {
        self.headers
            .push(("Content-Type", "application/merge-patch+json".to_string()));
        self.body = Some(Value::Object(patch.clone()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_params_are_encoded() {
        let request = ApiRequest::get(
            "get_vpc_address_prefix",
            "/vpcs/{vpc_id}/address_prefixes/{id}",
        )
        .path_param("vpc_id", "r006-1")
        .and_then(|r| r.path_param("id", "a b/c"))
        .unwrap();

        assert_eq!(request.path, "/vpcs/r006-1/address_prefixes/a%20b%2Fc");
    }

    #[test]
    fn empty_path_param_is_rejected() {
        let error = ApiRequest::get("get_vpc", "/vpcs/{id}")
            .path_param("id", " ")
            .unwrap_err();

        assert!(matches!(
            error,
            Error::InvalidRequest {
                operation: "get_vpc",
                ..
            }
        ));
    }

    #[test]
    fn optional_query_and_if_match_are_skipped_when_unset() {
        let request = ApiRequest::patch("update_volume", "/volumes/{id}")
            .query_opt("limit", None::<i64>)
            .query_opt("start", Some("abc"))
            .if_match(None);

        assert_eq!(request.query, vec![("start", "abc".to_string())]);
        assert!(request.headers.is_empty());
    }
}
