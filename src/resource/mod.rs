//! Resource abstraction layer
//!
//! The generic pieces every command family is built from.
//!
//! # Architecture
//!
//! - [`parameter_set`] - Picks the one input shape a command was invoked with
//! - [`sync`] - Building blocks for presentation <-> wire model mapping
//! - [`fetcher`] - Paginated collection fetching

mod fetcher;
pub mod parameter_set;
pub mod sync;

pub use fetcher::{fetch_all, fetch_all_from, fetch_page, PaginatedResult};
pub use parameter_set::{resolve, BoundParameters, ParameterSet};
pub use sync::{EnumMapping, Named};
