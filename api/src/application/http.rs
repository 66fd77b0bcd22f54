pub mod captures;
pub mod health;
pub mod help;
pub mod images;
pub mod ledger;
pub mod server;
pub mod session;
pub mod speech;
