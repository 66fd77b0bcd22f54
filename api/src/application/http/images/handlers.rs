pub mod get_image;
