use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{FieldErrors, Id, Validate};

const TITLE_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Extra charge for travelling to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelFee {
    pub region: String,
    pub fee: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub icon_name: Option<String>,
    pub icon_color: Option<String>,
    /// Minutes.
    pub estimated_duration: u32,
    #[serde(default)]
    pub requires_time_selection: bool,
    #[serde(default)]
    pub serviceable_regions: BTreeSet<String>,
    #[serde(default)]
    pub travel_fees: Vec<TravelFee>,
    pub is_active: bool,
    #[serde(default)]
    pub display_order: u32,
}

/// Create/update payload for a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    pub icon_name: Option<String>,
    pub icon_color: Option<String>,
    pub estimated_duration: u32,
    #[serde(default)]
    pub requires_time_selection: bool,
    #[serde(default)]
    pub serviceable_regions: BTreeSet<String>,
    #[serde(default)]
    pub travel_fees: Vec<TravelFee>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl Validate for ServiceInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title, TITLE_MAX_CHARS);
        errors.require_text("description", &self.description, DESCRIPTION_MAX_CHARS);

        if let Some(color) = self.icon_color.as_deref()
            && !is_hex_color(color)
        {
            errors.insert("iconColor", "must be a #RRGGBB color");
        }
        if self.estimated_duration == 0 {
            errors.insert("estimatedDuration", "must be greater than zero");
        }
        if self.serviceable_regions.iter().any(|r| r.trim().is_empty()) {
            errors.insert("serviceableRegions", "region names must not be blank");
        }

        let mut fee_regions = BTreeSet::new();
        for fee in &self.travel_fees {
            if !self.serviceable_regions.contains(&fee.region) {
                errors.insert(
                    "travelFees",
                    format!("region `{}` is not serviceable", fee.region),
                );
            }
            if !fee_regions.insert(fee.region.as_str()) {
                errors.insert(
                    "travelFees",
                    format!("region `{}` has more than one fee", fee.region),
                );
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ServiceInput {
        ServiceInput {
            title: "Window film".into(),
            description: "Heat-blocking film for apartment windows".into(),
            icon_name: Some("window".into()),
            icon_color: Some("#12AB9f".into()),
            estimated_duration: 120,
            requires_time_selection: true,
            serviceable_regions: ["Seoul".to_string(), "Incheon".to_string()].into(),
            travel_fees: vec![TravelFee {
                region: "Incheon".into(),
                fee: 20_000,
            }],
            is_active: true,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn fee_for_unknown_region_is_rejected() {
        let mut input = input();
        input.travel_fees.push(TravelFee {
            region: "Busan".into(),
            fee: 50_000,
        });
        let errors = input.validate().expect_err("unknown region");
        assert!(errors.get("travelFees").is_some_and(|m| m.contains("Busan")));
    }

    #[test]
    fn reports_every_offending_field() {
        let mut input = input();
        input.title = String::new();
        input.icon_color = Some("teal".into());
        input.estimated_duration = 0;
        let errors = input.validate().expect_err("invalid");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn is_active_defaults_to_true() {
        let input: ServiceInput = serde_json::from_str(
            r#"{"title":"t","description":"d","estimatedDuration":30}"#,
        )
        .expect("input");
        assert!(input.is_active);
        assert!(input.serviceable_regions.is_empty());
    }
}
