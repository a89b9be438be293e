//! PostgREST (Supabase) store backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::{Error, Result};

use super::{Query, Store};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Store backed by a PostgREST endpoint under `{base}/rest/v1`
pub struct PostgrestStore {
    client: Client,
    rest_url: Url,
}

impl PostgrestStore {
    pub fn new(base_url: &str, key: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let mut base = Url::parse(base_url.trim())
            .map_err(|e| Error::config(format!("invalid store url '{}': {}", base_url, e)))?;
        // Keep a path prefix such as `/supa` when joining
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let rest_url = base
            .join("rest/v1/")
            .map_err(|e| Error::config(format!("invalid store url '{}': {}", base_url, e)))?;

        let key = key.into();
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", key))?);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, rest_url })
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.rest_url
            .join(table)
            .map_err(|e| Error::store(format!("invalid table name '{}': {}", table, e)))
    }

    fn select_request(&self, query: &Query) -> Result<RequestBuilder> {
        let mut url = self.table_url(&query.table)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            for (column, value) in &query.filters {
                pairs.append_pair(column, &format!("eq.{}", value));
            }
        }
        Ok(self.client.get(url))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::config(format!("invalid store key: {}", e)))
}

async fn check_status(response: Response, table: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::store(format!(
        "request on '{}' failed with {}: {}",
        table, status, body
    )))
}

#[async_trait]
impl Store for PostgrestStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        let response = self.select_request(query)?.send().await?;
        let response = check_status(response, &query.table).await?;
        Ok(response.json().await?)
    }

    async fn select_single(&self, query: &Query) -> Result<Value> {
        let response = self
            .select_request(query)?
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;
        let response = check_status(response, &query.table).await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<()> {
        let response = self
            .client
            .post(self.table_url(table)?)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;
        check_status(response, table).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgrest"
    }
}
