use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    storage::{entities::StoredImage, ports::ImageStore},
};

/// Keeps captures in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStore {
    images: Arc<RwLock<HashMap<Uuid, StoredImage>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageStore for InMemoryImageStore {
    #[instrument(skip(self, image), fields(image_id = %image.id, bytes = image.payload.len()))]
    async fn put_image(&self, image: StoredImage) -> Result<StoredImage, CoreError> {
        self.images.write().await.insert(image.id, image.clone());
        tracing::debug!("Image stored");

        Ok(image)
    }

    async fn get_image(&self, id: Uuid) -> Result<StoredImage, CoreError> {
        self.images
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound)
    }
}
