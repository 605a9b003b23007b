//! Azure Resource Manager interaction module
//!
//! Authentication, the REST client and resource identifier handling. Command
//! handlers treat everything here as the remote client boundary.
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer tokens from the environment or the Azure CLI
//! - [`client`] - Main ARM client and its [`client::ClientOptions`]
//! - [`http`] - HTTP calls, error decoding and long-running operation polling
//! - [`resource_id`] - Structured resource ID parsing
//! - [`subscriptions`] - Subscription listing
//! - [`tags`] - Resource tag parsing
//!
//! # Example
//!
//! ```ignore
//! use azrm::arm::{auth, client::{ArmClient, ClientOptions}};
//!
//! async fn example() -> azrm::Result<()> {
//!     let client = ArmClient::new("0000...", auth::default_provider(), ClientOptions::default())?;
//!     let groups = client.get(&client.arm_url("/subscriptions/0000.../resourcegroups", "2021-04-01")).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod resource_id;
pub mod subscriptions;
pub mod tags;

pub use client::{ArmClient, ClientOptions};
pub use resource_id::ResourceId;
