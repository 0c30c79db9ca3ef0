//! Service and service version entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional derived data attached to a service on request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_count: Option<i64>,
}

/// Service owned by an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub organization_id: Uuid,
    #[serde(default)]
    pub metadata: ServiceMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn new(
        organization_id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            organization_id,
            metadata: ServiceMetadata::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Released version of a service. `version` is unique per service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVersion {
    pub id: Uuid,
    pub version: String,
    pub description: String,
    pub release_timestamp: DateTime<Utc>,
    pub service_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceVersion {
    pub fn new(
        service_id: Uuid,
        version: impl Into<String>,
        description: impl Into<String>,
        release_timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: version.into(),
            description: description.into(),
            release_timestamp,
            service_id,
            created_at: now,
            updated_at: now,
        }
    }
}
