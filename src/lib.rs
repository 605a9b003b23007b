//! azrm - Azure Resource Manager operations from the command line
//!
//! Each command family binds its options to a parameter set, builds the
//! request from a presentation object, calls ARM (or Graph, or a Batch
//! account) and writes the reshaped response to stdout.
//!
//! - [`arm`] - REST client, authentication, resource ids
//! - [`resource`] - Parameter sets, model mapping helpers, paging
//! - [`cmdlet`] - Per-invocation lifecycle
//! - [`output`] - Input documents and output formatting

pub mod api_management;
pub mod arm;
pub mod authorization;
pub mod batch;
pub mod cmdlet;
pub mod config;
pub mod error;
pub mod network;
pub mod output;
pub mod resource;
pub mod traffic_manager;

pub use error::{Error, Result};
