use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Optional knobs for the tour, read from `tour.json` in the working directory.
///
/// Credentials are not stored here: the service reads them from
/// `ibm-credentials.env` or `VPC_*` environment variables.
#[derive(Debug, Deserialize)]
pub struct TourSettings {
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Only tour VPCs whose name starts with this.
    pub vpc_name_prefix: Option<String>,
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            vpc_name_prefix: None,
        }
    }
}

fn default_page_size() -> i64 {
    10
}

pub fn load_settings() -> Result<TourSettings, String> {
    let mut path = std::env::current_dir().map_err(|e| e.to_string())?;
    path.push("tour.json");
    if !path.exists() {
        return Ok(TourSettings::default());
    }
    read_settings(&path)
}

fn read_settings(path: &PathBuf) -> Result<TourSettings, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read tour.json: {e}"))?;
    serde_json::from_str(&contents).map_err(|e| format!("Invalid tour.json: {e}"))
}
