pub mod capture;
pub mod common;
pub mod food_analysis;
pub mod ledger;
pub mod session;
pub mod speech;
pub mod storage;
