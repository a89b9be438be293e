//! In-process store backend
//!
//! Holds tables as JSON rows in memory. Tables can be marked as failing so
//! callers can exercise degraded paths without a network.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{Error, Result};

use super::{Query, Store};

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    failing: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with the given rows, replacing any existing ones
    pub fn with_rows<T: Serialize>(mut self, table: &str, rows: &[T]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.tables.get_mut().insert(table.to_string(), rows);
        Ok(self)
    }

    /// Make every operation on `table` fail
    pub fn with_failing_table(mut self, table: &str) -> Self {
        self.failing.get_mut().insert(table.to_string());
        self
    }

    pub async fn fail_table(&self, table: &str) {
        self.failing.write().await.insert(table.to_string());
    }

    /// Rows currently stored in `table`
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    async fn check_available(&self, table: &str) -> Result<()> {
        if self.failing.read().await.contains(table) {
            return Err(Error::store(format!("table '{}' is unavailable", table)));
        }
        Ok(())
    }
}

fn matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(column, expected)| match row.get(column) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == *expected,
        None => false,
    })
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        self.check_available(&query.table).await?;

        let tables = self.tables.read().await;
        let rows = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches(row, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(rows)
    }

    async fn select_single(&self, query: &Query) -> Result<Value> {
        let mut rows = self.select(query).await?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            n => Err(Error::store(format!(
                "expected a single row from '{}', found {}",
                query.table, n
            ))),
        }
    }

    async fn insert(&self, table: &str, row: Value) -> Result<()> {
        self.check_available(table).await?;

        if !row.is_object() {
            return Err(Error::InvalidRequest(format!(
                "row for '{}' must be a JSON object",
                table
            )));
        }

        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
