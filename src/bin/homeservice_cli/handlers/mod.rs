#![deny(clippy::all, clippy::pedantic)]

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod films;
pub mod holidays;
pub mod hours;
pub mod icons;
pub mod portfolios;
pub mod promotions;
pub mod reservations;
pub mod reviews;
pub mod services;

use homeservice_admin::cache::Query;
use homeservice_admin::types::Id;
use serde::Serialize;

use crate::client::{CliError, Ctx};
use crate::print::{Summary, print_output};

pub(crate) fn parse_id(raw: &str) -> Id {
    Id::from(raw.trim())
}

pub(crate) fn parse_ids(raw: &[String]) -> Vec<Id> {
    raw.iter().map(|id| parse_id(id)).collect()
}

/// Fetches `query` through the cache and prints the result.
pub(crate) async fn show<T>(ctx: &Ctx, query: Query<T>) -> Result<(), CliError>
where
    T: Serialize + Summary + Send + Sync + 'static,
{
    let data = ctx
        .api
        .fetch(&query)
        .await?
        .ok_or_else(|| CliError::InvalidInput(format!("query {} is disabled", query.key())))?;
    print_output(data.as_ref(), ctx.summary)
}

/// Prints the record a create or update returned.
pub(crate) fn show_written<T: Serialize + Summary>(ctx: &Ctx, value: &T) -> Result<(), CliError> {
    print_output(value, ctx.summary)
}
