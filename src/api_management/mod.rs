//! API Management hostname configurations

pub mod commands;
pub mod mapping;
pub mod models;
pub mod sdk;

pub use commands::ApiManagementCommand;
pub use models::HostnameConfiguration;
