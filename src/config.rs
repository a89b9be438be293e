use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::store::StoreConfig;

/// Origin of the local frontend dev server
pub const DEFAULT_DEV_ORIGIN: &str = "http://localhost:3000";

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreSection,
    pub cors: CorsSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    ///
    /// The deployment variables `SUPABASE_URL`, `SUPABASE_ANON_KEY`,
    /// `FRONTEND_URL` and `PORT` take precedence over both.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("PORTFOLIO_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PORTFOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        config.apply_deployment_env(|name| env::var(name).ok())?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Overlay the conventional deployment variables read through `lookup`.
    pub fn apply_deployment_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SUPABASE_URL") {
            self.store.url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY") {
            self.store.key = Some(key);
        }
        if let Some(origin) = lookup("FRONTEND_URL") {
            self.cors.frontend_url = Some(origin);
        }
        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT '{}'", port))?;
        }
        Ok(())
    }

    /// Store settings, or `None` when credentials are missing and the
    /// service should run on fallback data only.
    pub fn store_runtime(&self) -> Option<StoreConfig> {
        let url = non_blank(self.store.url.as_deref())?;
        let key = non_blank(self.store.key.as_deref())?;

        Some(StoreConfig {
            url: url.to_string(),
            key: key.to_string(),
            timeout_secs: self.store.timeout_secs,
        })
    }

    /// Origins allowed by CORS: the dev origin plus the frontend, if set
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![self.cors.dev_origin.clone()];
        if let Some(frontend) = non_blank(self.cors.frontend_url.as_deref()) {
            if !origins.iter().any(|o| o == frontend) {
                origins.push(frontend.to_string());
            }
        }
        origins
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub url: Option<String>,
    pub key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            url: None,
            key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSection {
    pub frontend_url: Option<String>,
    pub dev_origin: String,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            frontend_url: None,
            dev_origin: DEFAULT_DEV_ORIGIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
