//! Entity models and their create payloads (serde-backed).
//!
//! Each entity is immutable once created. The `*Create` payloads are
//! what clients send; the full entities add a generated identifier and
//! creation timestamp. Unknown payload fields are silently ignored,
//! which is serde's default behavior for structs.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::db::timestamp;

/// A record stored in the document store, addressed by collection name
/// and identified by a caller-generated id.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// A contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    /// Assign a fresh identifier and creation timestamp to a validated
    /// create request.
    pub fn new(input: ContactCreate) -> Self {
        Self {
            id: new_record_id(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            service: input.service,
            message: input.message,
            timestamp: timestamp::now(),
        }
    }
}

impl Record for ContactSubmission {
    const COLLECTION: &'static str = "contacts";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A newsletter sign-up. Email uniqueness is enforced by a
/// check-then-insert in the handler, not by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub id: String,
    pub email: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterCreate {
    pub email: String,
}

impl NewsletterSubscription {
    pub fn new(input: NewsletterCreate) -> Self {
        Self {
            id: new_record_id(),
            email: input.email,
            timestamp: timestamp::now(),
        }
    }
}

impl Record for NewsletterSubscription {
    const COLLECTION: &'static str = "newsletters";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A portfolio showcase entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioCreate {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl PortfolioItem {
    pub fn new(input: PortfolioCreate) -> Self {
        Self {
            id: new_record_id(),
            title: input.title,
            description: input.description,
            category: input.category,
            image: input.image,
            technologies: input.technologies,
            link: input.link,
            client: input.client,
            duration: input.duration,
            timestamp: timestamp::now(),
        }
    }
}

impl Record for PortfolioItem {
    const COLLECTION: &'static str = "portfolio";

    fn id(&self) -> &str {
        &self.id
    }
}
