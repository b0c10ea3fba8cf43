use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Id;

/// Customer with aggregate counters maintained by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Id,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    #[serde(default)]
    pub total_reservations: u32,
    #[serde(default)]
    pub total_reviews: u32,
    pub average_rating: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
