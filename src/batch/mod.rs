//! Batch jobs
//!
//! The job specification graph is deep (pool information, auto pool, pool
//! specification, start task) and mostly optional; [`mapping`] walks it.

pub mod client;
pub mod commands;
pub mod mapping;
pub mod models;
pub mod sdk;

pub use client::BatchClient;
pub use commands::BatchCommand;
