// Configuration module: everything the program reads from the
// environment is collected here once at startup and passed explicitly
// to the store and the API client.

use anyhow::Context;
use serde::Deserialize;

/// Application configuration, loaded from environment variables / .env.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the OMDb search endpoint. When unset, the sync action
    /// reports a configuration error instead of issuing a request.
    #[serde(default)]
    pub omdb_url: Option<String>,

    /// API key sent with every OMDb request.
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// Path of the JSON file backing the catalog.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
}

fn default_catalog_path() -> String {
    "data/catalog.json".to_string()
}

impl AppConfig {
    /// Read `OMDB_URL`, `OMDB_API_KEY` and `CATALOG_PATH` from the
    /// environment. A missing OMDb value is not an error here; it only
    /// degrades the sync action later on.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env if present (ignore errors, it may not exist)
        let _ = dotenvy::dotenv();

        envy::from_env::<AppConfig>().context("Failed to load config from environment")
    }
}
