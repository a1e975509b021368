pub mod analytics;
pub mod budget;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod store;
pub mod utils;
