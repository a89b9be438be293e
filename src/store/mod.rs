//! Store abstraction layer
//!
//! The hosted database is only reachable through two capabilities:
//! filtered select and insert. Rows travel as JSON values and are decoded
//! into typed records by [`select`] / [`select_one`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Result;

pub mod memory;
pub mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

/// A `select *` against one table with optional equality filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: String,
    pub filters: Vec<(String, String)>,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
        }
    }

    /// Add an equality filter on `column`
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), value.to_string()));
        self
    }
}

/// Store backend trait
#[async_trait]
pub trait Store: Send + Sync {
    /// Select all rows matching the query
    async fn select(&self, query: &Query) -> Result<Vec<Value>>;

    /// Select exactly one row; zero or several matches is an error
    async fn select_single(&self, query: &Query) -> Result<Value>;

    /// Insert one row
    async fn insert(&self, table: &str, row: Value) -> Result<()>;

    /// Short backend name used in logs
    fn name(&self) -> &'static str;
}

/// Select rows and decode them as `T`
pub async fn select<T: DeserializeOwned>(store: &dyn Store, query: &Query) -> Result<Vec<T>> {
    let rows = store.select(query).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}

/// Select a single row and decode it as `T`
pub async fn select_one<T: DeserializeOwned>(store: &dyn Store, query: &Query) -> Result<T> {
    let row = store.select_single(query).await?;
    Ok(serde_json::from_value(row)?)
}

/// Store connection settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
    pub timeout_secs: u64,
}

/// Create store backend from config
pub fn create_store(config: StoreConfig) -> Result<Box<dyn Store>> {
    let backend = PostgrestStore::new(&config.url, config.key, config.timeout_secs)?;
    Ok(Box::new(backend))
}
