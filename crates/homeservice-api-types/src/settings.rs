use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Time};

use crate::{FieldErrors, Id, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Opening hours of one weekday, times as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub day: DayOfWeek,
    pub is_open: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHours {
    pub days: Vec<DayHours>,
}

fn parse_clock(value: &str) -> Option<Time> {
    Time::parse(value, format_description!("[hour]:[minute]")).ok()
}

impl Validate for OperatingHours {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut seen = HashSet::new();

        for (index, day) in self.days.iter().enumerate() {
            if !seen.insert(day.day) {
                errors.insert(format!("days[{index}].day"), "day listed more than once");
            }
            if !day.is_open {
                continue;
            }
            let open = day.open_time.as_deref().and_then(parse_clock);
            let close = day.close_time.as_deref().and_then(parse_clock);
            match (open, close) {
                (Some(open), Some(close)) if open >= close => {
                    errors.insert(
                        format!("days[{index}].closeTime"),
                        "must be later than the opening time",
                    );
                }
                (Some(_), Some(_)) => {}
                (None, _) => {
                    errors.insert(format!("days[{index}].openTime"), "must be HH:MM");
                }
                (_, None) => {
                    errors.insert(format!("days[{index}].closeTime"), "must be HH:MM");
                }
            }
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: Id,
    #[serde(with = "crate::iso_date")]
    pub date: Date,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayInput {
    #[serde(with = "crate::iso_date")]
    pub date: Date,
    pub reason: Option<String>,
}

impl Validate for HolidayInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(reason) = self.reason.as_deref()
            && reason.chars().count() > 100
        {
            errors.insert("reason", "must be at most 100 characters");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn day(day: DayOfWeek, open: &str, close: &str) -> DayHours {
        DayHours {
            day,
            is_open: true,
            open_time: Some(open.into()),
            close_time: Some(close.into()),
        }
    }

    #[test]
    fn closing_must_follow_opening() {
        let hours = OperatingHours {
            days: vec![
                day(DayOfWeek::Monday, "09:00", "18:00"),
                day(DayOfWeek::Tuesday, "18:00", "09:00"),
            ],
        };
        let errors = hours.validate().expect_err("inverted hours");
        assert!(errors.get("days[1].closeTime").is_some());
        assert!(errors.get("days[0].closeTime").is_none());
    }

    #[test]
    fn closed_days_skip_time_checks_but_not_duplicates() {
        let hours = OperatingHours {
            days: vec![
                DayHours {
                    day: DayOfWeek::Sunday,
                    is_open: false,
                    open_time: None,
                    close_time: None,
                },
                day(DayOfWeek::Sunday, "10:00", "12:00"),
            ],
        };
        let errors = hours.validate().expect_err("duplicate day");
        assert_eq!(errors.len(), 1);
        assert!(errors.get("days[1].day").is_some());
    }

    #[test]
    fn malformed_clock_is_reported() {
        let hours = OperatingHours {
            days: vec![day(DayOfWeek::Friday, "9am", "18:00")],
        };
        let errors = hours.validate().expect_err("bad clock");
        assert_eq!(errors.get("days[0].openTime"), Some("must be HH:MM"));
    }

    #[test]
    fn holiday_uses_iso_dates() {
        let input = HolidayInput {
            date: date!(2026 - 12 - 25),
            reason: Some("Christmas".into()),
        };
        let json = serde_json::to_value(&input).expect("serialize");
        assert_eq!(json["date"], "2026-12-25");

        let holiday: Holiday =
            serde_json::from_str(r#"{"id":1,"date":"2026-01-01","reason":null}"#).expect("holiday");
        assert_eq!(holiday.date, date!(2026 - 01 - 01));
    }
}
