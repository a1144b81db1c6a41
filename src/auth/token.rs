use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::auth::credentials::{DEFAULT_IAM_URL, IAM_OPERATION, now_secs, request_iam_token};
use crate::config::ServiceProperties;
use crate::error::{Error, Result};

const REFRESH_SKEW_SECS: u64 = 300;
/// Upper bound on one IAM token exchange.
pub const DEFAULT_IAM_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: Option<u64>,
}

pub fn is_expiring_soon(expires_at: Option<u64>) -> bool {
    let Some(exp) = expires_at else {
        return true;
    };
    now_secs() + REFRESH_SKEW_SECS >= exp
}

/// Produces the `Authorization` header for each request.
///
/// Clones share one token cache, so a service and its clones refresh at most once
/// per expiry no matter how many calls are in flight.
#[derive(Clone, Debug)]
pub enum Authenticator {
    /// Exchange an IBM Cloud API key for short-lived IAM access tokens.
    Iam(Arc<IamTokenManager>),
    /// Send a caller-managed bearer token as-is.
    BearerToken(String),
    /// Send no credentials.
    NoAuth,
}

impl Authenticator {
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::iam_with_url(apikey, DEFAULT_IAM_URL)
    }

    pub fn iam_with_url(apikey: impl Into<String>, iam_url: impl Into<String>) -> Self {
        Authenticator::Iam(Arc::new(IamTokenManager::new(apikey, iam_url)))
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Authenticator::BearerToken(token.into())
    }

    /// Build an authenticator from `AUTH_TYPE`, `APIKEY`, `AUTH_URL` and `BEARER_TOKEN`.
    pub fn from_properties(properties: &ServiceProperties) -> Result<Self> {
        let auth_type = properties
            .auth_type()
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| {
                if properties.bearer_token().is_some() && properties.apikey().is_none() {
                    "bearertoken".to_string()
                } else {
                    "iam".to_string()
                }
            });

        match auth_type.as_str() {
            "iam" => {
                let apikey = properties.apikey().ok_or_else(|| {
                    Error::Config("APIKEY is required for iam authentication".to_string())
                })?;
                let iam_url = properties.auth_url().unwrap_or(DEFAULT_IAM_URL);
                Ok(Self::iam_with_url(apikey, iam_url))
            }
            "bearertoken" => {
                let token = properties.bearer_token().ok_or_else(|| {
                    Error::Config(
                        "BEARER_TOKEN is required for bearertoken authentication".to_string(),
                    )
                })?;
                Ok(Self::bearer(token))
            }
            "noauth" => Ok(Authenticator::NoAuth),
            other => Err(Error::Config(format!(
                "unsupported authentication type '{}'",
                other
            ))),
        }
    }

    /// The `Authorization` header value, refreshing the IAM token when needed.
    pub async fn authorization(&self) -> Result<Option<String>> {
        match self {
            Authenticator::Iam(manager) => {
                let token = manager.access_token().await?;
                Ok(Some(format!("Bearer {}", token)))
            }
            Authenticator::BearerToken(token) => Ok(Some(format!("Bearer {}", token))),
            Authenticator::NoAuth => Ok(None),
        }
    }
}

/// Caches the IAM access token for one API key.
pub struct IamTokenManager {
    apikey: String,
    iam_url: String,
    client: Client,
    timeout: Duration,
    cache: Mutex<Option<CachedToken>>,
}

impl fmt::Debug for IamTokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamTokenManager")
            .field("iam_url", &self.iam_url)
            .field("apikey", &"<redacted>")
            .finish()
    }
}

impl IamTokenManager {
    pub fn new(apikey: impl Into<String>, iam_url: impl Into<String>) -> Self {
        Self {
            apikey: apikey.into(),
            iam_url: iam_url.into(),
            client: Client::new(),
            timeout: DEFAULT_IAM_TIMEOUT,
            cache: Mutex::new(None),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn iam_url(&self) -> &str {
        &self.iam_url
    }

    /// A valid access token, fetching a new one if the cached one is expiring.
    ///
    /// The cache lock is held across the refresh: concurrent callers wait for
    /// the in-flight exchange and then reuse its token.
    pub async fn access_token(&self) -> Result<String> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if !cached.access_token.trim().is_empty() && !is_expiring_soon(cached.expires_at) {
                return Ok(cached.access_token.clone());
            }
        }

        log::debug!("Refreshing IAM access token");
        let exchange = request_iam_token(&self.client, &self.iam_url, &self.apikey);
        let token = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| Error::Timeout {
                operation: IAM_OPERATION,
                timeout: self.timeout,
            })??;
        let access_token = token.access_token.clone();
        *cache = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Some(token.expires_at),
        });
        Ok(access_token)
    }

    /// Drop the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn properties(pairs: &[(&str, &str)]) -> ServiceProperties {
        ServiceProperties::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn missing_expiry_counts_as_expiring() {
        assert!(is_expiring_soon(None));
        assert!(is_expiring_soon(Some(now_secs() + 10)));
        assert!(!is_expiring_soon(Some(now_secs() + 3600)));
    }

    #[test]
    fn iam_is_default_when_apikey_present() {
        let auth = Authenticator::from_properties(&properties(&[
            ("APIKEY", "key"),
            ("AUTH_URL", "https://iam.test.cloud.ibm.com"),
        ]))
        .unwrap();

        match auth {
            Authenticator::Iam(manager) => {
                assert_eq!(manager.iam_url(), "https://iam.test.cloud.ibm.com")
            }
            other => panic!("unexpected authenticator: {other:?}"),
        }
    }

    #[test]
    fn bearer_token_auth_type() {
        let auth = Authenticator::from_properties(&properties(&[
            ("AUTH_TYPE", "bearerToken"),
            ("BEARER_TOKEN", "abc"),
        ]))
        .unwrap();

        assert!(matches!(auth, Authenticator::BearerToken(token) if token == "abc"));
    }

    #[test]
    fn iam_without_apikey_is_config_error() {
        let error = Authenticator::from_properties(
            &properties(&[("AUTH_TYPE", "iam")]),
        )
        .unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn debug_output_redacts_apikey() {
        let auth = Authenticator::iam("super-secret");
        assert!(!format!("{auth:?}").contains("super-secret"));
    }
}
