pub mod api_client;
pub mod config;
pub mod dedup;
pub mod errors;
pub mod forms;
pub mod models;
pub mod options;
pub mod session;
pub mod submission;
pub mod validation;
