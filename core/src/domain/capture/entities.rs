use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureMode {
    /// Advisory lookup of one food, never recorded in the ledger.
    SingleFood,
    /// Whole-plate capture that is recorded in the ledger.
    Meal,
}

impl CaptureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::SingleFood => "single-food",
            CaptureMode::Meal => "meal",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-food" | "single_food" | "gi" => Ok(CaptureMode::SingleFood),
            "meal" => Ok(CaptureMode::Meal),
            other => Err(CoreError::CaptureFailed(format!(
                "unknown capture mode: {other}"
            ))),
        }
    }
}

/// One still frame delivered by the capture source.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub mime_type: String,
    pub payload: Bytes,
}

impl CapturedImage {
    /// Validates the payload and detects its mime type from the leading bytes.
    pub fn from_bytes(payload: Bytes, declared_mime_type: Option<&str>) -> Result<Self, CoreError> {
        if payload.is_empty() {
            return Err(CoreError::CaptureFailed("image is empty".to_string()));
        }

        if payload.len() > MAX_IMAGE_SIZE {
            return Err(CoreError::CaptureFailed(format!(
                "image too large, max size is {MAX_IMAGE_SIZE} bytes"
            )));
        }

        let sniffed: Option<&str> = sniff_mime_type(&payload);
        let mime_type = sniffed
            .or(declared_mime_type.filter(|m| m.starts_with("image/")))
            .unwrap_or("image/jpeg")
            .to_string();

        Ok(Self { mime_type, payload })
    }

    /// Accepts plain base64 or a `data:image/...;base64,` URI.
    pub fn from_base64(encoded: &str) -> Result<Self, CoreError> {
        let (declared, data) = match encoded.trim().strip_prefix("data:") {
            Some(uri) => {
                let (header, data) = uri.split_once(',').ok_or_else(|| {
                    CoreError::CaptureFailed("malformed data URI".to_string())
                })?;
                (header.split(';').next(), data)
            }
            None => (None, encoded.trim()),
        };

        let payload = general_purpose::STANDARD
            .decode(data)
            .map_err(|e| CoreError::CaptureFailed(format!("invalid base64 image: {e}")))?;

        Self::from_bytes(Bytes::from(payload), declared)
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.payload)
    }
}

fn sniff_mime_type(payload: &[u8]) -> Option<&'static str> {
    match payload {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_from_bytes_detects_jpeg() {
        let image = CapturedImage::from_bytes(Bytes::from_static(&JPEG_HEADER), None).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn test_from_bytes_prefers_sniffed_type_over_declared() {
        let png = Bytes::from_static(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]);
        let image = CapturedImage::from_bytes(png, Some("image/jpeg")).unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_from_bytes_rejects_empty_payload() {
        assert!(matches!(
            CapturedImage::from_bytes(Bytes::new(), None),
            Err(CoreError::CaptureFailed(_))
        ));
    }

    #[test]
    fn test_from_base64_accepts_data_uri() {
        let encoded = general_purpose::STANDARD.encode(JPEG_HEADER);
        let image = CapturedImage::from_base64(&format!("data:image/jpeg;base64,{encoded}")).unwrap();
        assert_eq!(image.payload.as_ref(), &JPEG_HEADER);
        assert_eq!(image.to_base64(), encoded);
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        assert!(matches!(
            CapturedImage::from_base64("not base64!"),
            Err(CoreError::CaptureFailed(_))
        ));
    }

    #[test]
    fn test_capture_mode_from_path_segment() {
        assert_eq!("meal".parse::<CaptureMode>(), Ok(CaptureMode::Meal));
        assert_eq!("single-food".parse::<CaptureMode>(), Ok(CaptureMode::SingleFood));
        assert!("dessert".parse::<CaptureMode>().is_err());
    }

    #[test]
    fn test_capture_mode_serializes_like_path_segment() {
        for mode in [CaptureMode::SingleFood, CaptureMode::Meal] {
            let json = serde_json::to_value(mode).unwrap();
            assert_eq!(json, mode.as_str());
            assert_eq!(json.as_str().unwrap().parse::<CaptureMode>(), Ok(mode));
        }
    }
}
