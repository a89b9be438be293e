//! Data access for portfolio content
//!
//! Every read goes to the store when one is configured and falls back to the
//! built-in records when it is not, or when the query fails. Reads never
//! fail; the returned [`Fetched`] says where the data came from.

use std::sync::Arc;

use crate::store::{self, Query, Store};
use crate::types::{ContactForm, Education, Profile, Project, Service, ServiceTier, Skill};
use crate::Result;

pub mod fallback;

pub const PROJECTS_TABLE: &str = "projects";
pub const PROFILE_TABLE: &str = "profile";
pub const SKILLS_TABLE: &str = "skills";
pub const EDUCATION_TABLE: &str = "education";
pub const SERVICES_TABLE: &str = "services";
pub const SERVICE_TIERS_TABLE: &str = "service_tiers";
pub const CONTACT_TABLE: &str = "contact_submissions";

/// Origin of the data returned by a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Store,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Store => "store",
            DataSource::Fallback => "fallback",
        }
    }
}

/// A read result tagged with its origin
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Fetched<T> {
    fn store(value: T) -> Self {
        Self {
            value,
            source: DataSource::Store,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            source: DataSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

/// Read and write access to portfolio content
pub struct Catalog {
    store: Option<Arc<dyn Store>>,
}

impl Catalog {
    pub fn new(store: Option<Arc<dyn Store>>) -> Self {
        Self { store }
    }

    /// Catalog that only ever serves fallback data
    pub fn fallback_only() -> Self {
        Self { store: None }
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub async fn projects(&self) -> Fetched<Vec<Project>> {
        let Some(store) = &self.store else {
            return Fetched::fallback(fallback::projects());
        };

        match store::select(store.as_ref(), &Query::table(PROJECTS_TABLE)).await {
            Ok(projects) => Fetched::store(projects),
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching projects; serving fallback");
                Fetched::fallback(fallback::projects())
            }
        }
    }

    pub async fn project(&self, id: &str) -> Fetched<Project> {
        let Some(store) = &self.store else {
            return Fetched::fallback(fallback::project(id));
        };

        let query = Query::table(PROJECTS_TABLE).eq("id", id);
        match store::select_one(store.as_ref(), &query).await {
            Ok(project) => Fetched::store(project),
            Err(e) => {
                tracing::warn!(%id, error = %e, "Error fetching project by id; serving fallback");
                Fetched::fallback(fallback::project(id))
            }
        }
    }

    /// Profile row plus its skills and education. A failed follow-on query
    /// keeps whatever the profile row carried for that field.
    pub async fn profile(&self) -> Fetched<Profile> {
        let Some(store) = &self.store else {
            return Fetched::fallback(fallback::profile());
        };
        let store = store.as_ref();

        let mut profile: Profile =
            match store::select_one(store, &Query::table(PROFILE_TABLE)).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!(error = %e, "Error fetching profile; serving fallback");
                    return Fetched::fallback(fallback::profile());
                }
            };

        match store::select::<Skill>(store, &Query::table(SKILLS_TABLE)).await {
            Ok(skills) => profile.skills = skills,
            Err(e) => tracing::warn!(error = %e, "Error fetching skills"),
        }

        match store::select::<Education>(store, &Query::table(EDUCATION_TABLE)).await {
            Ok(education) => profile.education = education,
            Err(e) => tracing::warn!(error = %e, "Error fetching education"),
        }

        Fetched::store(profile)
    }

    /// Services with their tiers. Tiers are fetched one service at a time; a
    /// failure for one service leaves its tiers untouched and moves on.
    pub async fn services(&self) -> Fetched<Vec<Service>> {
        let Some(store) = &self.store else {
            return Fetched::fallback(fallback::services());
        };
        let store = store.as_ref();

        let mut services: Vec<Service> =
            match store::select(store, &Query::table(SERVICES_TABLE)).await {
                Ok(services) => services,
                Err(e) => {
                    tracing::warn!(error = %e, "Error fetching services; serving fallback");
                    return Fetched::fallback(fallback::services());
                }
            };

        for service in services.iter_mut() {
            let query = Query::table(SERVICE_TIERS_TABLE).eq("service_id", service.id);
            match store::select::<ServiceTier>(store, &query).await {
                Ok(tiers) => service.tiers = tiers,
                Err(e) => {
                    tracing::warn!(service_id = service.id, error = %e, "Error fetching service tiers")
                }
            }
        }

        Fetched::store(services)
    }

    /// Persist a contact form submission. Without a store the submission is
    /// only logged.
    pub async fn save_contact(&self, form: &ContactForm) -> Result<()> {
        let Some(store) = &self.store else {
            tracing::info!(?form, "Contact form received");
            return Ok(());
        };

        let row = serde_json::to_value(form)?;
        if let Err(e) = store.insert(CONTACT_TABLE, row).await {
            tracing::error!(error = %e, store = store.name(), "Error saving contact form");
            return Err(e);
        }

        tracing::info!(email = %form.email, "Contact form saved");
        Ok(())
    }
}
