use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{FieldErrors, Id, Validate};

const CANCEL_REASON_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown reservation status `{other}`")),
        }
    }
}

/// Service summary embedded in a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationService {
    pub id: Id,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Id,
    pub number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service: Option<ReservationService>,
    #[serde(default, with = "crate::iso_date::option")]
    pub estimate_date: Option<Date>,
    pub estimate_time: Option<String>,
    #[serde(default, with = "crate::iso_date::option")]
    pub construction_date: Option<Date>,
    pub construction_time: Option<String>,
    pub address: String,
    #[serde(default)]
    pub detail_address: Option<String>,
    pub status: ReservationStatus,
    pub cancel_reason: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatusRequest {
    pub status: ReservationStatus,
}

impl Validate for ReservationStatusRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.status == ReservationStatus::Cancelled {
            errors.insert("status", "use the cancel action to cancel a reservation");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelReservationRequest {
    pub cancel_reason: String,
}

impl Validate for CancelReservationRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("cancelReason", &self.cancel_reason, CANCEL_REASON_MAX_CHARS);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 12,
        "number": "R-20261019-0001",
        "customerName": "Kim",
        "customerPhone": "01012345678",
        "service": {"id": 3, "title": "Window film"},
        "estimateDate": "2026-10-21",
        "estimateTime": "10:00",
        "constructionDate": null,
        "constructionTime": null,
        "address": "Seoul",
        "status": "pending",
        "cancelReason": null,
        "createdAt": "2026-10-19T01:00:00Z",
        "updatedAt": "2026-10-19T01:00:00Z"
    }"#;

    #[test]
    fn deserializes_api_record() {
        let reservation: Reservation = serde_json::from_str(SAMPLE).expect("reservation");
        assert_eq!(reservation.id, Id::from("12"));
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(
            reservation.estimate_date.map(|d| d.to_string()),
            Some("2026-10-21".to_string())
        );
        assert!(reservation.construction_date.is_none());
        assert!(reservation.detail_address.is_none());
    }

    #[test]
    fn status_request_rejects_cancelled() {
        let request = ReservationStatusRequest {
            status: ReservationStatus::Cancelled,
        };
        assert!(request.validate().is_err());

        let request = ReservationStatusRequest {
            status: ReservationStatus::Confirmed,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn cancel_requires_reason() {
        let request = CancelReservationRequest {
            cancel_reason: "  ".into(),
        };
        let errors = request.validate().expect_err("blank reason");
        assert_eq!(errors.get("cancelReason"), Some("is required"));
    }

    #[test]
    fn status_parses_both_spellings() {
        assert_eq!(
            "Canceled".parse::<ReservationStatus>(),
            Ok(ReservationStatus::Cancelled)
        );
        assert!("archived".parse::<ReservationStatus>().is_err());
    }
}
