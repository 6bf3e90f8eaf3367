pub mod alerts;
pub mod listings;
pub mod models;
pub mod saved_jobs;
pub mod session;
pub mod store;
