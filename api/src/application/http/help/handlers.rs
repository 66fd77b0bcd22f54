pub mod get_help;
