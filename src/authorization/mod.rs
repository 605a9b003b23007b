//! Role assignments
//!
//! Filters `Microsoft.Authorization` role assignments by principal, scope and
//! role name. Principals given by mail, UPN or SPN are looked up in Microsoft
//! Graph first.

pub mod client;
pub mod commands;
pub mod mapping;
pub mod models;
pub mod query;
pub mod sdk;

pub use client::AuthorizationClient;
pub use commands::RoleAssignmentCommand;
pub use query::{PrincipalFilter, RoleAssignmentQuery, ScopeFilter};
