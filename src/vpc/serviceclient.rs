use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::LogLevel;
use crate::auth::Authenticator;
use crate::common::polymorphic::{self, Polymorphic};
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::config::load_service_properties;
use crate::error::{ApiError, Error, Result};
use crate::vpc::pager::{ListOptions, Pager};

/// Default endpoint (us-south region).
pub const DEFAULT_SERVICE_URL: &str = "https://us-south.iaas.cloud.ibm.com/v1";
/// Key used to find external configuration.
pub const DEFAULT_SERVICE_NAME: &str = "vpc";
/// API version date sent with every request.
pub const DEFAULT_VERSION: &str = "2024-04-30";
/// Infrastructure generation sent with every request.
pub const DEFAULT_GENERATION: i64 = 2;

const USER_AGENT: &str = concat!("ibmcloud-vpc-client/", env!("CARGO_PKG_VERSION"));
const MAX_LOG_BODY_LENGTH: usize = 2000;

/// Construction options for [`VpcService`].
#[derive(Debug, Clone, Default)]
pub struct VpcServiceOptions {
    /// Prefix for external configuration lookup; defaults to `vpc`.
    pub service_name: Option<String>,
    pub url: Option<String>,
    pub authenticator: Option<Authenticator>,
    /// API version date (`YYYY-MM-DD`).
    pub version: Option<String>,
    pub generation: Option<i64>,
    /// Upper bound on waiting for each response.
    pub timeout: Option<Duration>,
    pub log_level: LogLevel,
}

/// Client for the VPC v1 API.
///
/// Holds no per-call state: share it (or clones of it) across tasks freely.
#[derive(Debug, Clone)]
pub struct VpcService {
    client: Client,
    base_url: String,
    authenticator: Authenticator,
    version: String,
    generation: i64,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    log_level: LogLevel,
}

impl VpcService {
    /// Create a client from explicit options. An authenticator is required.
    pub fn new(options: VpcServiceOptions) -> Result<Self> {
        let authenticator = options
            .authenticator
            .ok_or_else(|| Error::Config("an authenticator is required".to_string()))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: options
                .url
                .as_deref()
                .unwrap_or(DEFAULT_SERVICE_URL)
                .trim_end_matches('/')
                .to_string(),
            authenticator,
            version: options.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            generation: options.generation.unwrap_or(DEFAULT_GENERATION),
            default_headers: HeaderMap::new(),
            timeout: options.timeout,
            log_level: options.log_level,
        })
    }

    /// Create a client, filling the authenticator, URL and version from
    /// external configuration wherever `options` leaves them unset.
    pub fn from_external_config(mut options: VpcServiceOptions) -> Result<Self> {
        let service_name = options
            .service_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());
        let properties = load_service_properties(&service_name)?;

        if options.authenticator.is_none() {
            options.authenticator = Some(Authenticator::from_properties(&properties)?);
        }
        if options.url.is_none() {
            options.url = properties.url().map(str::to_string);
        }
        if options.version.is_none() {
            options.version = properties.version().map(str::to_string);
        }

        Self::new(options)
    }

    pub fn service_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_service_url(&mut self, url: &str) {
        self.base_url = url.trim_end_matches('/').to_string();
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Headers added to every request.
    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.default_headers = headers;
    }

    /// Replace the transport, e.g. to configure proxies or TLS roots.
    pub fn set_http_client(&mut self, client: Client) {
        self.client = client;
    }

    /// A copy of this client whose calls give up after `timeout`.
    ///
    /// The copy shares the connection pool and token cache, so it is cheap to
    /// make one for a single slow call:
    /// `service.with_timeout(Duration::from_secs(5)).get_vpc(&options)`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self.clone()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// A lazy pager over a paginated list operation.
    pub fn pager<O: ListOptions>(&self, options: O) -> Pager<'_, O> {
        Pager::new(self, options)
    }

    /// Send a request and decode the JSON response body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<DetailedResponse<T>> {
        let operation = request.operation;
        let raw = self.execute(request).await?;
        let result = serde_json::from_str::<T>(&raw.body).map_err(|e| Error::decode(operation, e))?;
        Ok(raw.with_result(result))
    }

    /// Send a request whose response is a polymorphic family.
    pub(crate) async fn send_polymorphic<T: Polymorphic>(
        &self,
        request: ApiRequest,
    ) -> Result<DetailedResponse<T>> {
        let operation = request.operation;
        let raw = self.execute(request).await?;
        let value: Value = serde_json::from_str(
            &raw.body,
        )
        .map_err(|e| Error::decode(operation, e))?;
        let result = polymorphic::decode(value).map_err(|e| Error::decode(operation, e))?;
        Ok(raw.with_result(result))
    }

    /// Send a request whose response has no body.
    pub(crate) async fn send_empty(&self, request: ApiRequest) -> Result<DetailedResponse<()>> {
        let raw = self.execute(request).await?;
        Ok(raw.with_result(()))
    }

    /// Send a request whose response is plain text.
    pub(crate) async fn send_text(&self, request: ApiRequest) -> Result<DetailedResponse<String>> {
        let raw = self.execute(request).await?;
        let body = raw.body.clone();
        Ok(raw.with_result(body))
    }

    /// Run a request, bounding authorization, send and body read together by
    /// the configured timeout.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let operation = request.operation;
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.call(request))
                .await
                .map_err(|_| Error::Timeout { operation, timeout })?,
            None => self.call(request).await,
        }
    }

    async fn call(&self, request: ApiRequest) -> Result<RawResponse> {
        let operation = request.operation;
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .query(&[("version", self.version.as_str())])
            .query(&[("generation", self.generation)])
            .query(&request.query)
            .headers(self.default_headers.clone())
            .header(
                "X-IBMCloud-SDK-Analytics",
                format!(
                    "service_name={};service_version=V1;operation_id={}",
                    DEFAULT_SERVICE_NAME, operation
                ),
            )
            .header("X-Correlation-Id", uuid::Uuid::new_v4().to_string());

        if !request.headers.iter().any(|(name, _)| *name == "Accept") {
            builder = builder.header("Accept", "application/json");
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        if let Some(authorization) = self.authenticator.authorization().await? {
            builder = builder.header("Authorization", authorization);
        }

        if let Some(body) = &request.body {
            if matches!(self.log_level, LogLevel::Debug) {
                log::debug!("{} request body: {}", operation, truncate(&body.to_string()));
            }
            builder = builder.json(body);
        }

        log::debug!("{} {} {}", operation, request.method, url);

        let resp = builder
            .send()
            .await
            .map_err(|source| Error::Transport { operation, source })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .text()
            .await
            .map_err(|source| Error::Transport { operation, source })?;

        if matches!(self.log_level, LogLevel::Debug) && !body.is_empty() {
            log::debug!("{} response body: {}", operation, truncate(&body));
        }

        if !status.is_success() {
            let error = ApiError::from_response(operation, status.as_u16(), &headers, &body);
            log::warn!(
                "{} failed with status {} (request id: {})",
                operation,
                status,
                error.request_id.as_deref().unwrap_or("none")
            );
            return Err(error.into());
        }

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl RawResponse {
    fn with_result<T>(self, result: T) -> DetailedResponse<T> {
        DetailedResponse {
            status_code: self.status,
            headers: self.headers,
            result,
        }
    }
}

fn truncate(body: &str) -> String {
    if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|index| body.is_char_boundary(*index))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    }
}

/// Build a header map from name/value pairs, skipping invalid entries.
pub fn header_map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> HeaderMap {
    pairs
        .into_iter()
        .filter_map(|(name, value)| {
            let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
            let value = HeaderValue::from_str(value).ok()?;
            Some((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_authenticator() {
        let error = VpcService::new(VpcServiceOptions::default()).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn defaults_are_applied() {
        let service = VpcService::new(VpcServiceOptions {
            authenticator: Some(Authenticator::NoAuth),
            url: Some("https://eu-de.iaas.cloud.ibm.com/v1/".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(service.service_url(), "https://eu-de.iaas.cloud.ibm.com/v1");
        assert_eq!(service.version(), DEFAULT_VERSION);
    }

    #[test]
    fn with_timeout_leaves_the_original_untouched() {
        let service = VpcService::new(VpcServiceOptions {
            authenticator: Some(Authenticator::NoAuth),
            timeout: Some(Duration::from_secs(30)),
            ..Default::default()
        })
        .unwrap();

        let quick = service.with_timeout(Duration::from_secs(2));
        assert_eq!(quick.timeout(), Some(Duration::from_secs(2)));
        assert_eq!(service.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(quick.service_url(), service.service_url());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(MAX_LOG_BODY_LENGTH);
        let truncated = truncate(&body);
        assert!(truncated.contains("truncated"));
    }

    #[test]
    fn header_map_skips_invalid_names() {
        let headers = header_map([("X-Team", "network"), ("bad header", "x")]);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-team").unwrap(), "network");
    }
}
