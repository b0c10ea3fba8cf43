use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Id,
    pub reservation_id: Id,
    pub customer_name: Option<String>,
    pub rating: u8,
    pub content: String,
    #[serde(default)]
    pub photos: Vec<String>,
    pub is_visible: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Review {
    /// Ratings outside 1..=5 are clamped for display.
    pub fn stars(&self) -> u8 {
        self.rating.clamp(1, 5)
    }
}
