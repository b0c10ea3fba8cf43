use serde::{Deserialize, Serialize};

use crate::{FieldErrors, Id, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub display_order: u32,
    pub is_active: bool,
    /// Free-form content rendered by the storefront.
    #[serde(default)]
    pub detail: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionInput {
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl Validate for PromotionInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title, 100);
        if !(self.detail.is_null() || self.detail.is_object()) {
            errors.insert("detail", "must be an object");
        }
        errors.into_result()
    }
}
