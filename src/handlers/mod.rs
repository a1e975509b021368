pub mod activity;
pub mod analytics;
