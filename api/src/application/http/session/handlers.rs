pub mod dismiss_result;
pub mod get_session;
pub mod switch_view;
