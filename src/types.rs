//! Core types for portfolio-api
//!
//! Records are decoded leniently from store rows: missing columns and
//! `null` values fall back to the field's zero value, and snake_case column
//! names are accepted next to the camelCase names used on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Seconds between 0001-01-01T00:00:00Z and the Unix epoch
const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// Timestamp carried by records that have no creation time
pub fn zero_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIMESTAMP_SECS, 0).unwrap_or_default()
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<Utc>>::deserialize(deserializer)?.unwrap_or_else(zero_timestamp))
}

/// Portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub image: String,
    #[serde(alias = "github_url", deserialize_with = "nullable")]
    pub github_url: String,
    #[serde(alias = "demo_url", deserialize_with = "nullable")]
    pub demo_url: String,
    #[serde(deserialize_with = "nullable")]
    pub technologies: Vec<String>,
    #[serde(alias = "created_at", deserialize_with = "nullable_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            description: String::new(),
            image: String::new(),
            github_url: String::new(),
            demo_url: String::new(),
            technologies: Vec::new(),
            created_at: zero_timestamp(),
        }
    }
}

/// Site owner profile (one per deployment)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub avatar: String,
    #[serde(deserialize_with = "nullable")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "nullable")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "nullable")]
    pub interests: Vec<String>,
    #[serde(alias = "social_links", deserialize_with = "nullable")]
    pub social_links: Vec<SocialLink>,
}

/// Skill category and its items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "nullable")]
    pub degree: String,
    #[serde(deserialize_with = "nullable")]
    pub institution: String,
    #[serde(deserialize_with = "nullable")]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "nullable")]
    pub platform: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

/// Service offering with its pricing tiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(deserialize_with = "nullable")]
    pub tiers: Vec<ServiceTier>,
}

/// Pricing tier, stored in `service_tiers` keyed by `service_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceTier {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub price: i64,
    #[serde(deserialize_with = "nullable")]
    pub period: String,
    #[serde(deserialize_with = "nullable")]
    pub features: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub popular: bool,
}

/// Contact form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub subject: String,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
}
