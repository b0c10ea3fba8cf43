use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{FieldErrors, Id, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IconType {
    Fill,
    Mono,
    Color,
}

impl IconType {
    pub fn as_str(self) -> &'static str {
        match self {
            IconType::Fill => "FILL",
            IconType::Mono => "MONO",
            IconType::Color => "COLOR",
        }
    }
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FILL" => Ok(Self::Fill),
            "MONO" => Ok(Self::Mono),
            "COLOR" => Ok(Self::Color),
            other => Err(format!("unknown icon type `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub icon_type: IconType,
    pub svg: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconInput {
    pub name: String,
    #[serde(rename = "type")]
    pub icon_type: IconType,
    pub svg: String,
}

impl Validate for IconInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name, 50);
        if self
            .name
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        {
            errors.insert("name", "only letters, digits, '-' and '_' are allowed");
        }
        if !self.svg.trim_start().starts_with("<svg") {
            errors.insert("svg", "must be inline <svg> markup");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_type_round_trips_uppercase() {
        let json = serde_json::to_string(&IconType::Mono).expect("serialize");
        assert_eq!(json, "\"MONO\"");
        assert_eq!("color".parse::<IconType>(), Ok(IconType::Color));
    }

    #[test]
    fn input_rejects_bad_name_and_markup() {
        let input = IconInput {
            name: "air con".into(),
            icon_type: IconType::Fill,
            svg: "<png/>".into(),
        };
        let errors = input.validate().expect_err("invalid icon");
        assert!(errors.get("name").is_some());
        assert!(errors.get("svg").is_some());
    }
}
