//! Load balancers, frontend IP configurations and network security groups

pub mod client;
pub mod commands;
pub mod mapping;
pub mod models;
pub mod sdk;

pub use client::NetworkClient;
pub use commands::NetworkCommand;
