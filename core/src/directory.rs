//! Human-readable service names from the public regional-services table.
//!
//! Unlike the catalogs this does not go through the parameter store: the table is a single
//! JSON document served over HTTPS.

use std::collections::BTreeSet;

use qrs_common::error::QueryError;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_INDEX_URL: &str =
    "https://api.regional-table.region-services.aws.a2z.com/index.json";

#[derive(Debug, Deserialize)]
struct RegionalTable {
    #[serde(default)]
    prices: Vec<TableEntry>,
}

#[derive(Debug, Deserialize)]
struct TableEntry {
    attributes: EntryAttributes,
}

#[derive(Debug, Deserialize)]
struct EntryAttributes {
    #[serde(rename = "aws:serviceName")]
    service_name: Option<String>,
}

pub struct ServiceDirectory {
    http: reqwest::Client,
    index_url: String,
}

impl Default for ServiceDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_URL)
    }
}

impl ServiceDirectory {
    pub fn new(index_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            index_url: index_url.into(),
        }
    }

    /// Downloads the table and returns every distinct service name, sorted.
    pub async fn fetch_names(&self) -> Result<Vec<String>, QueryError> {
        let body = self
            .http
            .get(&self.index_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| QueryError::Directory(err.to_string()))?
            .text()
            .await
            .map_err(|err| QueryError::Directory(err.to_string()))?;

        debug!(url = %self.index_url, bytes = body.len(), "downloaded service directory");
        parse_service_names(&body)
    }
}

/// Extracts the distinct service names of a regional-services table, sorted.
pub fn parse_service_names(body: &str) -> Result<Vec<String>, QueryError> {
    let table: RegionalTable =
        serde_json::from_str(body).map_err(|err| QueryError::Directory(err.to_string()))?;

    let names: BTreeSet<String> = table
        .prices
        .into_iter()
        .filter_map(|entry| entry.attributes.service_name)
        .filter(|name| !name.trim().is_empty())
        .collect();

    Ok(names.into_iter().collect())
}
