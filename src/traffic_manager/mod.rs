//! Traffic Manager profiles and endpoints
//!
//! - [`models`] - Presentation objects
//! - [`sdk`] - Wire model and enum tables
//! - [`mapping`] - Pure conversions between the two
//! - [`client`] - Remote operations
//! - [`commands`] - `traffic-manager` subcommands

pub mod client;
pub mod commands;
pub mod mapping;
pub mod models;
pub mod sdk;

pub use client::TrafficManagerClient;
pub use commands::TrafficManagerCommand;
pub use models::{TrafficManagerEndpoint, TrafficManagerProfile};
