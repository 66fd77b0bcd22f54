use std::future::Future;

use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

use super::entities::StoredImage;

/// Port for keeping captured images for the lifetime of the session
#[cfg_attr(test, mockall::automock)]
pub trait ImageStore: Send + Sync {
    /// Store an image and return it unchanged
    fn put_image(
        &self,
        image: StoredImage,
    ) -> impl Future<Output = Result<StoredImage, CoreError>> + Send;

    /// Get a stored image by ID
    fn get_image(&self, id: Uuid) -> impl Future<Output = Result<StoredImage, CoreError>> + Send;
}
