#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::format::{
    format_amount, format_datetime, format_duration_minutes, format_phone,
};
use homeservice_admin::types::{
    Customer, DashboardStats, Film, FilmProject, Holiday, Icon, OperatingHours, Page, Portfolio,
    Promotion, Reservation, Review, Service,
};
use serde::Serialize;

use crate::client::CliError;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{out}");
    Ok(())
}

/// One-line human rendering used by `--summary`.
pub trait Summary {
    fn summary(&self) -> String;
}

/// Prints `value` as pretty JSON, or as summary lines when requested.
pub fn print_output<T>(value: &T, summary: bool) -> Result<(), CliError>
where
    T: Serialize + Summary + ?Sized,
{
    if summary {
        println!("{}", value.summary());
        Ok(())
    } else {
        print_json(value)
    }
}

impl<T: Summary> Summary for [T] {
    fn summary(&self) -> String {
        if self.is_empty() {
            return "(none)".to_string();
        }
        self.iter()
            .map(Summary::summary)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<T: Summary> Summary for Vec<T> {
    fn summary(&self) -> String {
        self.as_slice().summary()
    }
}

impl<T: Summary> Summary for Page<T> {
    fn summary(&self) -> String {
        format!(
            "{}\npage {}/{} ({} total)",
            self.items.summary(),
            self.page,
            self.total_pages,
            format_amount(i64::try_from(self.total).unwrap_or(i64::MAX))
        )
    }
}

impl Summary for Reservation {
    fn summary(&self) -> String {
        let service = self.service.as_ref().map_or("-", |s| s.title.as_str());
        format!(
            "{}  {:<9}  {}  {}  {}  {}",
            self.number,
            self.status.as_str(),
            self.customer_name,
            format_phone(&self.customer_phone),
            service,
            format_datetime(self.created_at)
        )
    }
}

impl Summary for Customer {
    fn summary(&self) -> String {
        format!(
            "{}  {}  {}  reservations={} reviews={}",
            self.id,
            self.name,
            format_phone(&self.phone),
            self.total_reservations,
            self.total_reviews
        )
    }
}

impl Summary for Review {
    fn summary(&self) -> String {
        let stars = "*".repeat(usize::from(self.stars()));
        let visibility = if self.is_visible { "shown" } else { "hidden" };
        format!(
            "{}  {:<5}  {}  {}  {}",
            self.id,
            stars,
            visibility,
            self.customer_name.as_deref().unwrap_or("anonymous"),
            format_datetime(self.created_at)
        )
    }
}

impl Summary for Service {
    fn summary(&self) -> String {
        let state = if self.is_active { "active" } else { "inactive" };
        format!(
            "#{} {}  {}  {}  regions={}",
            self.display_order,
            self.title,
            format_duration_minutes(self.estimated_duration),
            state,
            self.serviceable_regions.len()
        )
    }
}

impl Summary for Promotion {
    fn summary(&self) -> String {
        let state = if self.is_active { "active" } else { "inactive" };
        format!("#{} {}  {}  (id {})", self.display_order, self.title, state, self.id)
    }
}

impl Summary for Portfolio {
    fn summary(&self) -> String {
        let visibility = if self.is_visible { "shown" } else { "hidden" };
        format!(
            "{}  {}  {}  images={}",
            self.id,
            self.title,
            visibility,
            self.images.len()
        )
    }
}

impl Summary for Icon {
    fn summary(&self) -> String {
        format!("{}  {}  {}", self.id, self.name, self.icon_type)
    }
}

impl Summary for Holiday {
    fn summary(&self) -> String {
        format!(
            "{}  {}  {}",
            self.id,
            self.date,
            self.reason.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_string()
    }
}

impl Summary for OperatingHours {
    fn summary(&self) -> String {
        if self.days.is_empty() {
            return "(no hours configured)".to_string();
        }
        self.days
            .iter()
            .map(|day| {
                let name = format!("{:?}", day.day).to_lowercase();
                match (day.is_open, &day.open_time, &day.close_time) {
                    (true, Some(open), Some(close)) => format!("{name:<9} {open}-{close}"),
                    _ => format!("{name:<9} closed"),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Summary for FilmProject {
    fn summary(&self) -> String {
        format!("{}  {}  {}", self.id, self.name, format_datetime(self.created_at))
    }
}

impl Summary for Film {
    fn summary(&self) -> String {
        format!(
            "{}  {}  {}mm x {}mm",
            self.id,
            self.name,
            format_amount(i64::from(self.width)),
            format_amount(i64::from(self.length))
        )
    }
}

impl Summary for DashboardStats {
    fn summary(&self) -> String {
        let rating = self
            .average_rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        format!(
            "reservations {} (today {}, pending {}, confirmed {}, completed {}, cancelled {})\n\
             customers {} (new this month {})  rating {}",
            self.total_reservations,
            self.today_reservations,
            self.pending_reservations,
            self.confirmed_reservations,
            self.completed_reservations,
            self.cancelled_reservations,
            self.total_customers,
            self.new_customers_this_month,
            rating
        )
    }
}
