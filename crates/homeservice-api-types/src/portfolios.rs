use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{FieldErrors, Id, Validate};

const MAX_IMAGES: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub service_id: Option<Id>,
    #[serde(default)]
    pub images: Vec<String>,
    pub is_visible: bool,
    #[serde(default)]
    pub display_order: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInput {
    pub title: String,
    pub description: Option<String>,
    pub service_id: Option<Id>,
    pub images: Vec<String>,
    #[serde(default)]
    pub is_visible: bool,
}

impl Validate for PortfolioInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title, 100);
        if self.images.is_empty() {
            errors.insert("images", "at least one image is required");
        } else if self.images.len() > MAX_IMAGES {
            errors.insert("images", format!("at most {MAX_IMAGES} images"));
        } else if self
            .images
            .iter()
            .any(|url| !(url.starts_with("https://") || url.starts_with('/')))
        {
            errors.insert("images", "image urls must be https or site-relative");
        }
        errors.into_result()
    }
}
