pub mod capture_base64;
pub mod capture_upload;
