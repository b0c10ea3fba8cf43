//! Endpoint paths of the admin API.
//!
//! Every query key is derived from one of these paths, so reads and the
//! invalidations planned for writes always agree on identity.

use std::fmt;

use homeservice_api_types::Id;

use super::keys::QueryKey;

pub const LOGOUT_PATH: &str = "/api/auth/logout";
pub const DASHBOARD_STATS_PATH: &str = "/api/admin/dashboard/stats";
pub const OPERATING_HOURS_PATH: &str = "/api/admin/settings/operating-hours";

/// A resource collection exposed by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Reservations,
    Customers,
    Reviews,
    Services,
    Promotions,
    Portfolios,
    Icons,
    OperatingHours,
    Holidays,
    FilmProjects,
    Films,
    Dashboard,
}

impl Resource {
    pub const ALL: [Resource; 12] = [
        Resource::Reservations,
        Resource::Customers,
        Resource::Reviews,
        Resource::Services,
        Resource::Promotions,
        Resource::Portfolios,
        Resource::Icons,
        Resource::OperatingHours,
        Resource::Holidays,
        Resource::FilmProjects,
        Resource::Films,
        Resource::Dashboard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Reservations => "reservations",
            Resource::Customers => "customers",
            Resource::Reviews => "reviews",
            Resource::Services => "services",
            Resource::Promotions => "promotions",
            Resource::Portfolios => "portfolios",
            Resource::Icons => "icons",
            Resource::OperatingHours => "operating_hours",
            Resource::Holidays => "holidays",
            Resource::FilmProjects => "film_projects",
            Resource::Films => "films",
            Resource::Dashboard => "dashboard",
        }
    }

    /// Collection root; creates are posted here.
    pub fn collection_path(self) -> &'static str {
        match self {
            Resource::Reservations => "/api/admin/reservations",
            Resource::Customers => "/api/admin/customers",
            Resource::Reviews => "/api/admin/reviews",
            Resource::Services => "/api/admin/services",
            Resource::Promotions => "/api/admin/promotions",
            Resource::Portfolios => "/api/admin/portfolios",
            Resource::Icons => "/api/admin/icons",
            Resource::OperatingHours => OPERATING_HOURS_PATH,
            Resource::Holidays => "/api/admin/settings/holidays",
            Resource::FilmProjects => "/api/admin/film-optimizer/projects",
            Resource::Films => "/api/admin/film-optimizer/films",
            Resource::Dashboard => DASHBOARD_STATS_PATH,
        }
    }

    /// Path of the list read. Singletons read their collection root.
    pub fn list_path(self) -> String {
        match self {
            Resource::Services => "/api/services/admin/list".to_string(),
            Resource::OperatingHours | Resource::Dashboard => self.collection_path().to_string(),
            _ => format!("{}/list", self.collection_path()),
        }
    }

    /// Whether single items have their own cached read.
    pub fn has_detail(self) -> bool {
        matches!(
            self,
            Resource::Reservations
                | Resource::Customers
                | Resource::Reviews
                | Resource::Services
                | Resource::Promotions
                | Resource::Portfolios
        )
    }

    pub fn detail_path(self, id: &Id) -> String {
        format!("{}/{id}", self.collection_path())
    }

    /// Key for a detail read whose id is not known yet. It sits beside the
    /// real entries and is never a prefix of any of them.
    pub fn pending_detail_key(self) -> QueryKey {
        QueryKey::from_url(&format!("{}/detail", self.collection_path()))
    }

    pub fn create_path(self) -> String {
        self.collection_path().to_string()
    }

    pub fn update_path(self, id: &Id) -> String {
        format!("{}/{id}/update", self.collection_path())
    }

    pub fn delete_path(self, id: &Id) -> String {
        format!("{}/{id}/delete", self.collection_path())
    }

    pub fn toggle_path(self, id: &Id) -> String {
        format!("{}/{id}/toggle", self.collection_path())
    }

    pub fn status_path(self, id: &Id) -> String {
        format!("{}/{id}/status", self.collection_path())
    }

    pub fn cancel_path(self, id: &Id) -> String {
        format!("{}/{id}/cancel", self.collection_path())
    }

    pub fn reorder_path(self) -> String {
        match self {
            Resource::Services => "/api/services/admin/order".to_string(),
            _ => format!("{}/reorder", self.collection_path()),
        }
    }

    /// Prefix covering every paginated or filtered variant of the list.
    pub fn list_key(self) -> QueryKey {
        QueryKey::from_url(&self.list_path())
    }

    pub fn detail_key(self, id: &Id) -> QueryKey {
        QueryKey::from_url(&self.detail_path(id))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_use_the_public_admin_list_and_order_paths() {
        assert_eq!(Resource::Services.list_path(), "/api/services/admin/list");
        assert_eq!(Resource::Services.reorder_path(), "/api/services/admin/order");
        assert_eq!(
            Resource::Services.list_key().segments(),
            ["services", "admin", "list"]
        );
        assert_eq!(
            Resource::Services.detail_path(&Id::from(7)),
            "/api/admin/services/7"
        );
    }

    #[test]
    fn write_paths_follow_the_collection() {
        let id = Id::from("r-1");
        assert_eq!(
            Resource::Reservations.status_path(&id),
            "/api/admin/reservations/r-1/status"
        );
        assert_eq!(
            Resource::Reservations.cancel_path(&id),
            "/api/admin/reservations/r-1/cancel"
        );
        assert_eq!(
            Resource::Promotions.reorder_path(),
            "/api/admin/promotions/reorder"
        );
        assert_eq!(
            Resource::Holidays.delete_path(&id),
            "/api/admin/settings/holidays/r-1/delete"
        );
    }

    #[test]
    fn singleton_keys() {
        assert_eq!(
            Resource::OperatingHours.list_key().segments(),
            ["admin", "settings", "operating-hours"]
        );
        assert_eq!(
            Resource::Dashboard.list_key().segments(),
            ["admin", "dashboard", "stats"]
        );
    }

    #[test]
    fn pending_detail_key_does_not_cover_real_entries() {
        for resource in Resource::ALL.iter().filter(|r| r.has_detail()) {
            let pending = resource.pending_detail_key();
            assert!(!resource.list_key().starts_with(&pending));
            assert!(!resource.detail_key(&Id::from(7)).starts_with(&pending));
            assert_ne!(pending, QueryKey::from_url(resource.collection_path()));
        }
    }

    #[test]
    fn detail_views() {
        let with_detail: Vec<_> = Resource::ALL.iter().filter(|r| r.has_detail()).collect();
        assert_eq!(with_detail.len(), 6);
        assert!(!Resource::Icons.has_detail());
        assert!(!Resource::FilmProjects.has_detail());
    }
}
