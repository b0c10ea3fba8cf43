use serde::{Deserialize, Serialize};

/// Headline numbers shown on the dashboard; polled while it is open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_reservations: u64,
    pub pending_reservations: u64,
    pub confirmed_reservations: u64,
    pub completed_reservations: u64,
    pub cancelled_reservations: u64,
    pub today_reservations: u64,
    pub total_customers: u64,
    pub new_customers_this_month: u64,
    pub average_rating: Option<f64>,
}
