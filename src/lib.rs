//! portfolio-api - HTTP backend for a personal portfolio site
//!
//! Serves projects, profile and services data and accepts contact form
//! submissions:
//! - Reads go through a hosted REST store (Supabase/PostgREST)
//! - Built-in fallback data when no store is configured or a query fails
//! - Simple JSON HTTP API with CORS for the frontend

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Error, Result};
