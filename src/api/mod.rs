//! Wire-facing building blocks shared by every resource.

mod client;
pub mod cookies;
pub mod endpoints;
mod envelope;
mod keys;
mod query;

pub use client::ApiClient;
pub use cookies::{CookieStore, FileCookieStore, MemoryCookieStore};
pub use endpoints::Resource;
pub use envelope::{ErrorDescriptor, FieldIssue, RawEnvelope};
pub use keys::QueryKey;
pub use query::{ParamValue, QueryParams};
