//! External configuration.
//!
//! Service properties are read from a credentials file or from the
//! environment. Keys are prefixed with the upper-cased service name, e.g.
//! `VPC_URL`, `VPC_AUTH_TYPE`, `VPC_APIKEY`, `VPC_AUTH_URL`.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable naming an explicit credentials file.
pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";
/// Credentials file looked up in the working directory, then the home directory.
pub const DEFAULT_CREDENTIALS_FILE_NAME: &str = "ibm-credentials.env";

/// Properties for one service, with the service-name prefix stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProperties(HashMap<String, String>);

impl From<HashMap<String, String>> for ServiceProperties {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl ServiceProperties {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn url(&self) -> Option<&str> {
        self.get("URL")
    }

    pub fn auth_type(&self) -> Option<&str> {
        self.get("AUTH_TYPE")
    }

    pub fn apikey(&self) -> Option<&str> {
        self.get("APIKEY")
    }

    pub fn auth_url(&self) -> Option<&str> {
        self.get("AUTH_URL")
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.get("BEARER_TOKEN")
    }

    pub fn version(&self) -> Option<&str> {
        self.get("VERSION")
    }
}

/// Load properties for `service_name` from the credentials file, then the environment.
pub fn load_service_properties(service_name: &str) -> Result<ServiceProperties> {
    let prefix = property_prefix(service_name);

    if let Some(contents) = read_credentials_file()? {
        let properties = parse_properties(&contents, &prefix);
        if !properties.is_empty() {
            return Ok(properties);
        }
    }

    Ok(properties_from_vars(std::env::vars(), &prefix))
}

fn property_prefix(service_name: &str) -> String {
    format!("{}_", service_name.to_ascii_uppercase().replace('-', "_"))
}

fn read_credentials_file() -> Result<Option<String>> {
    if let Ok(explicit) = std::env::var(CREDENTIALS_FILE_ENV) {
        let path = PathBuf::from(explicit);
        return fs::read_to_string(&path).map(Some).map_err(|e| {
            Error::Config(format!(
                "Failed to read credentials file {}: {e}",
                path.display()
            ))
        });
    }

    let candidates = std::env::current_dir()
        .ok()
        .into_iter()
        .chain(dirs::home_dir())
        .map(|dir| dir.join(DEFAULT_CREDENTIALS_FILE_NAME));

    Ok(candidates
        .filter(|path| path.is_file())
        .find_map(|path| fs::read_to_string(path).ok()))
}

/// Parse `KEY=VALUE` lines, keeping keys that start with `prefix`.
pub(crate) fn parse_properties(contents: &str, prefix: &str) -> ServiceProperties {
    let pairs = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            (
                key.trim().to_string(),
                value.trim().trim_matches('"').to_string(),
            )
        });
    properties_from_vars(pairs, prefix)
}

pub(crate) fn properties_from_vars(
    vars: impl IntoIterator<Item = (String, String)>,
    prefix: &str,
) -> ServiceProperties {
    ServiceProperties(
        vars.into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix)
                    .map(|stripped| (stripped.to_string(), value))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_normalizes_service_name() {
        assert_eq!(property_prefix("vpc"), "VPC_");
        assert_eq!(property_prefix("my-vpc"), "MY_VPC_");
    }

    #[test]
    fn parses_credentials_file() {
        let contents = r#"
            # VPC service
            VPC_URL=https://us-south.iaas.cloud.ibm.com/v1
            VPC_AUTH_TYPE=iam
            VPC_APIKEY="abc=def"
            OTHER_APIKEY=ignored
            not a property line
        "#;
        let properties = parse_properties(contents, "VPC_");

        assert_eq!(properties.url(), Some("https://us-south.iaas.cloud.ibm.com/v1"));
        assert_eq!(properties.auth_type(), Some("iam"));
        assert_eq!(properties.apikey(), Some("abc=def"));
        assert_eq!(properties.get("OTHER_APIKEY"), None);
    }

    #[test]
    fn empty_values_read_as_missing() {
        let properties = properties_from_vars(
            vec![("VPC_AUTH_URL".to_string(), String::new())],
            "VPC_",
        );
        assert_eq!(properties.auth_url(), None);
    }
}
