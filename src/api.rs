// API client module: contains a small blocking HTTP client that talks to
// the OMDb search endpoint, plus the sync operation that merges search
// results into the catalog.

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::model::{merge_records, Catalog, Record};
use crate::store::CatalogStore;

/// Simple API client that holds a reqwest blocking client plus the
/// configured base URL and API key. Both values are optional: when either
/// is missing, `search` fails with a configuration error and the sync
/// action reports it.
pub struct OmdbClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

/// Expected response from the search endpoint. The `Search` array is
/// absent when the API found nothing, so it is kept optional and treated
/// as "zero results" rather than a parse error.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Search")]
    pub search: Option<Vec<Value>>,
}

impl OmdbClient {
    /// Create a client from the application configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(OmdbClient {
            client,
            base_url: config.omdb_url.clone(),
            api_key: config.omdb_api_key.clone(),
        })
    }

    /// Issue one GET to `<base>?apikey=<key>&s=<query>` and parse the
    /// response body. No retries.
    pub fn search(&self, query: &str) -> Result<SearchResponse> {
        let (Some(base_url), Some(api_key)) = (&self.base_url, &self.api_key) else {
            anyhow::bail!("OMDB_URL and OMDB_API_KEY must be set to sync with the API");
        };

        let res = self
            .client
            .get(base_url)
            .query(&[("apikey", api_key.as_str()), ("s", query)])
            .send()
            .context("Failed to send search request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Search failed: {} - {}", status, txt);
        }
        let resp: SearchResponse = res.json().context("Parsing search response json")?;
        Ok(resp)
    }
}

/// Validate every item of a search result individually. One bad item
/// never aborts the batch: it is turned into a diagnostic and the rest
/// of the items are kept.
pub fn collect_records(items: &[Value]) -> (Vec<Record>, Vec<String>) {
    let mut records = Vec::new();
    let mut issues = Vec::new();
    for item in items {
        match Record::from_value(item) {
            Ok(record) => records.push(record),
            Err(err) => issues.push(format!("Could not process search result {item}: {err}")),
        }
    }
    (records, issues)
}

/// Fetch search results for `query` and merge them into `catalog`,
/// overwriting existing entries with the same title, then save. A failed
/// request or an empty result leaves the catalog untouched; only a save
/// failure propagates.
pub fn sync_catalog(
    client: &OmdbClient,
    store: &CatalogStore,
    query: &str,
    mut catalog: Catalog,
) -> Result<Catalog> {
    let response = match client.search(query) {
        Ok(response) => response,
        Err(err) => {
            println!("{}", format!("Error talking to the API: {err:#}").red());
            return Ok(catalog);
        }
    };

    let Some(items) = response.search else {
        println!(
            "{}",
            format!("No results found for the search '{query}'.").red()
        );
        return Ok(catalog);
    };

    let (records, issues) = collect_records(&items);
    for issue in issues {
        println!("{}", issue.red());
    }

    merge_records(&mut catalog, records);
    store.save(&catalog)?;
    println!(
        "{}",
        format!("Movies synced for the search '{query}'.").green()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use serde_json::json;

    #[test]
    fn response_without_search_array_means_no_results() {
        let body = json!({"Response": "False", "Error": "Movie not found!"});
        let resp: SearchResponse = serde_json::from_value(body).expect("parse response");
        assert!(resp.search.is_none());
    }

    #[test]
    fn invalid_items_are_skipped_without_aborting_the_batch() {
        let items = vec![
            json!({
                "Title": "Avatar",
                "Year": "2009",
                "imdbID": "tt0499549",
                "Type": "movie",
                "Poster": null
            }),
            json!({"Title": "No id", "Year": "2001", "Type": "movie"}),
            json!("not an object"),
        ];

        let (records, issues) = collect_records(&items);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Avatar");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn merged_results_overwrite_entries_with_the_same_title() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Avatar".to_string(),
            Record::new(
                "Avatar".to_string(),
                "2009".to_string(),
                "tt0499549".to_string(),
                "movie".to_string(),
                None,
            )
            .expect("valid record"),
        );

        let items = vec![
            json!({
                "Title": "Avatar",
                "Year": "2022",
                "imdbID": "tt9999",
                "Type": "movie",
                "Poster": null
            }),
            json!({
                "Title": "Avatar: The Way of Water",
                "Year": "2022",
                "imdbID": "tt1630029",
                "Type": "movie",
                "Poster": null
            }),
        ];
        let (records, issues) = collect_records(&items);
        assert!(issues.is_empty());
        merge_records(&mut catalog, records);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog["Avatar"].year, "2022");
        assert_eq!(catalog["Avatar"].imdb_id, "tt9999");
    }
}
