use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// Where stored captures are served when no root path is configured.
pub const DEFAULT_IMAGES_PATH: &str = "/images";

/// Opaque handle to a stored capture: the URL path it is served under, e.g. `/images/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn for_image(images_path: &str, id: Uuid) -> Self {
        Self(format!("{}/{id}", images_path.trim_end_matches('/')))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub id: Uuid,
    pub mime_type: String,
    pub payload: Bytes,
    pub created_at: DateTime<Utc>,
}

impl StoredImage {
    pub fn new(mime_type: String, payload: Bytes) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            mime_type,
            payload,
            created_at: now,
        }
    }

    pub fn reference(&self, images_path: &str) -> ImageReference {
        ImageReference::for_image(images_path, self.id)
    }
}
