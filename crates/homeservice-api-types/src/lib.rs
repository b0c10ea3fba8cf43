//! Shared records and request payloads for the home-service admin API.
//!
//! Records mirror what the remote API returns (camelCase JSON); request
//! payloads implement [`Validate`] so malformed input is rejected before it
//! reaches the network.

mod dashboard;
mod film;
mod icons;
mod id;
mod page;
mod portfolios;
mod promotions;
mod reservations;
mod reviews;
mod services;
mod settings;
mod customers;
mod validate;

pub use customers::Customer;
pub use dashboard::DashboardStats;
pub use film::{Film, FilmInput, FilmProject, FilmProjectInput};
pub use icons::{Icon, IconInput, IconType};
pub use id::Id;
pub use page::{Page, Pagination};
pub use portfolios::{Portfolio, PortfolioInput};
pub use promotions::{Promotion, PromotionInput};
pub use reservations::{
    CancelReservationRequest, Reservation, ReservationService, ReservationStatus,
    ReservationStatusRequest,
};
pub use reviews::Review;
pub use services::{Service, ServiceInput, TravelFee};
pub use settings::{DayHours, DayOfWeek, Holiday, HolidayInput, OperatingHours};
pub use validate::{FieldErrors, Validate};

/// Body of every reorder endpoint: ids in their new display order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItem {
    pub id: Id,
    pub display_order: u32,
}

impl ReorderRequest {
    /// Assigns display orders 1..=n following the order of `ids`.
    pub fn from_ids(ids: &[Id]) -> Self {
        let items = ids
            .iter()
            .zip(1u32..)
            .map(|(id, display_order)| ReorderItem {
                id: id.clone(),
                display_order,
            })
            .collect();
        Self { items }
    }
}

impl Validate for ReorderRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.items.is_empty() {
            errors.insert("items", "at least one item is required");
        }
        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                errors.insert("items", format!("duplicate id `{}`", item.id));
            }
        }
        errors.into_result()
    }
}

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");
