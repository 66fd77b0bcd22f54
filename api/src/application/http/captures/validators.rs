use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CaptureBase64Validator {
    /// Plain base64 or a `data:image/jpeg;base64,...` URI
    #[validate(length(min = 1, message = "image_base64 is required"))]
    pub image_base64: String,
}

/// Multipart form of a capture upload.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CaptureUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
