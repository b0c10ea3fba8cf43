//! Back-office client for the home-service booking API.
//!
//! The crate is the data-synchronization layer of the admin tools:
//!
//! - [`api`]: query-key derivation, canonical query strings, the response
//!   envelope and the cookie-carrying HTTP transport
//! - [`cache`]: de-duplicating query cache, observers, mutations and the
//!   invalidation planner
//! - [`resources`]: per-entity queries and mutations with their invalidation
//!   policy
//! - [`auth`]: cookie-based client-side route gate

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod resources;
pub mod telemetry;

pub use homeservice_api_types as types;

pub use error::ApiError;
