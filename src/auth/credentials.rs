use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Client;
use serde_json::Value;

use crate::error::{ApiError, Error, Result};

/// Production IAM token service.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

pub(crate) const IAM_OPERATION: &str = "request_iam_token";
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// An access token issued by IAM.
pub struct IamToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: u64,
}

/// Exchange an API key for an IAM access token.
pub async fn request_iam_token(client: &Client, iam_url: &str, apikey: &str) -> Result<IamToken> {
    if apikey.trim().is_empty() {
        return Err(Error::Authentication("API key was empty".to_string()));
    }

    let token_url = format!("{}/identity/token", iam_url.trim_end_matches('/'));
    let params = [
        ("grant_type", IAM_GRANT_TYPE),
        ("apikey", apikey),
        ("response_type", "cloud_iam"),
    ];

    log::debug!("Requesting IAM token from {}", token_url);

    let resp = client
        .post(&token_url)
        .header("Accept", "application/json")
        .form(&params)
        .send()
        .await
        .map_err(|source| Error::Transport {
            operation: IAM_OPERATION,
            source,
        })?;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.text().await.map_err(|source| Error::Transport {
        operation: IAM_OPERATION,
        source,
    })?;

    if !status.is_success() {
        return Err(ApiError::from_response(IAM_OPERATION, status.as_u16(), &headers, &body).into());
    }

    let json: Value =
        serde_json::from_str(&body).map_err(|e| Error::decode(IAM_OPERATION, e))?;

    let access_token = json
        .get("access_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::Authentication("No access_token in response".to_string()))?;

    if access_token.trim().is_empty() {
        return Err(Error::Authentication("Access token was empty".to_string()));
    }

    let refresh_token = json
        .get("refresh_token")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let expires_at = json
        .get("expiration")
        .and_then(|v| v.as_u64())
        .or_else(|| {
            json.get("expires_in")
                .and_then(|v| v.as_u64())
                .map(|expires_in| now_secs() + expires_in)
        })
        .or_else(|| jwt_expiration(access_token))
        .ok_or_else(|| Error::Authentication("No expiration in response".to_string()))?;

    Ok(IamToken {
        access_token: access_token.to_string(),
        refresh_token,
        expires_at,
    })
}

/// Read the `exp` claim from a JWT without verifying it.
pub fn jwt_expiration(token: &str) -> Option<u64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_u64()
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_exp_claim() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"iam_id":"iam-ServiceId-1","exp":1700003600}"#);
        let token = format!("eyJhbGciOiJSUzI1NiJ9.{}.c2lnbmF0dXJl", payload);

        assert_eq!(jwt_expiration(&token), Some(1_700_003_600));
    }

    #[test]
    fn opaque_token_has_no_expiration() {
        assert_eq!(jwt_expiration("not-a-jwt"), None);
    }
}
