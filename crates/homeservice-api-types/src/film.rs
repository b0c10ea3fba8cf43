use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{FieldErrors, Id, Validate};

/// A cutting project grouping the films to be cut for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmProject {
    pub id: Id,
    pub name: String,
    pub memo: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmProjectInput {
    pub name: String,
    pub memo: Option<String>,
}

impl Validate for FilmProjectInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name, 100);
        errors.into_result()
    }
}

/// Film roll stock; dimensions in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: Id,
    pub name: String,
    pub width: u32,
    pub length: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmInput {
    pub name: String,
    pub width: u32,
    pub length: u32,
}

impl Validate for FilmInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name, 100);
        if self.width == 0 {
            errors.insert("width", "must be greater than zero");
        }
        if self.length == 0 {
            errors.insert("length", "must be greater than zero");
        }
        errors.into_result()
    }
}
