//! Command-line surface for `homeservice-cli`.
//! Kept in one file so tests can build commands with the same definitions as
//! the binary itself.

#![deny(clippy::all, clippy::pedantic)]

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use homeservice_admin::config::ConfigOverrides;
use homeservice_admin::types::{IconType, ReservationStatus};

#[derive(Parser, Debug)]
#[command(
    name = "homeservice-cli",
    version,
    about = "Home-service booking admin CLI",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigOverrides,

    /// Print one formatted line per record instead of JSON.
    #[arg(long, global = true, default_value_t = false)]
    pub summary: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reservation management (list/read/status/cancel/delete)
    Reservations(ReservationsArgs),
    /// Customer records
    Customers(CustomersArgs),
    /// Review moderation
    Reviews(ReviewsArgs),
    /// Service catalogue
    Services(ServicesArgs),
    /// Promotions shown on the storefront
    Promotions(PromotionsArgs),
    /// Portfolio entries
    Portfolios(PortfoliosArgs),
    /// Icon library
    Icons(IconsArgs),
    /// Weekly operating hours
    Hours(HoursArgs),
    /// Holiday calendar
    Holidays(HolidaysArgs),
    /// Film optimizer projects and film stock
    Films(FilmsArgs),
    /// Dashboard statistics
    Dashboard(DashboardArgs),
    /// Session inspection and sign-out
    Auth(AuthArgs),
}

impl Commands {
    /// Admin route the command stands in for; `None` for unguarded commands.
    #[must_use]
    pub fn route(&self) -> Option<&'static str> {
        match self {
            Self::Reservations(_) => Some("/reservations"),
            Self::Customers(_) => Some("/customers"),
            Self::Reviews(_) => Some("/reviews"),
            Self::Services(_) => Some("/services"),
            Self::Promotions(_) => Some("/promotions"),
            Self::Portfolios(_) => Some("/portfolios"),
            Self::Icons(_) => Some("/icons"),
            Self::Hours(_) | Self::Holidays(_) => Some("/settings"),
            Self::Films(_) => Some("/film-optimizer"),
            Self::Dashboard(_) => Some("/"),
            Self::Auth(_) => None,
        }
    }
}

/// Inline JSON or a file holding it; the file wins when both are given.
#[derive(Args, Debug, Clone, Default)]
pub struct JsonInput {
    /// JSON payload
    #[arg(long)]
    pub data: Option<String>,
    /// File containing the JSON payload
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ReservationsArgs {
    #[command(subcommand)]
    pub action: ReservationsCmd,
}

#[derive(Subcommand, Debug)]
pub enum ReservationsCmd {
    /// List reservations with optional filters
    List {
        #[arg(long)]
        status: Option<ReservationStatusArg>,
        #[arg(long)]
        search: Option<String>,
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a reservation by id
    Get { id: String },
    /// Move a reservation to pending, confirmed or completed
    Status {
        id: String,
        #[arg(long)]
        status: ReservationStatusArg,
    },
    /// Cancel a reservation with a reason
    Cancel {
        id: String,
        #[arg(long)]
        reason: String,
    },
    /// Delete a reservation
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub action: CustomersCmd,
}

#[derive(Subcommand, Debug)]
pub enum CustomersCmd {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct ReviewsArgs {
    #[command(subcommand)]
    pub action: ReviewsCmd,
}

#[derive(Subcommand, Debug)]
pub enum ReviewsCmd {
    List {
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        visible: Option<bool>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: String,
    },
    /// Show or hide a review on the public site
    ToggleVisibility {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub action: CatalogueCmd,
}

#[derive(Parser, Debug)]
pub struct PromotionsArgs {
    #[command(subcommand)]
    pub action: CatalogueCmd,
}

/// Shared by services and promotions, which expose the same operations.
#[derive(Subcommand, Debug)]
pub enum CatalogueCmd {
    List,
    Get {
        id: String,
    },
    Create {
        #[command(flatten)]
        input: JsonInput,
    },
    Update {
        id: String,
        #[command(flatten)]
        input: JsonInput,
    },
    /// Activate or deactivate
    Toggle {
        id: String,
    },
    /// Save a new display order, front to back
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct PortfoliosArgs {
    #[command(subcommand)]
    pub action: PortfoliosCmd,
}

#[derive(Subcommand, Debug)]
pub enum PortfoliosCmd {
    List {
        #[arg(long)]
        service_id: Option<String>,
        #[arg(long)]
        visible: Option<bool>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: String,
    },
    Create {
        #[command(flatten)]
        input: JsonInput,
    },
    Update {
        id: String,
        #[command(flatten)]
        input: JsonInput,
    },
    ToggleVisibility {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct IconsArgs {
    #[command(subcommand)]
    pub action: IconsCmd,
}

#[derive(Subcommand, Debug)]
pub enum IconsCmd {
    List {
        #[arg(long = "type")]
        icon_type: Option<IconTypeArg>,
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        icon_type: IconTypeArg,
        #[arg(long)]
        svg: Option<String>,
        #[arg(long)]
        svg_file: Option<PathBuf>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        icon_type: IconTypeArg,
        #[arg(long)]
        svg: Option<String>,
        #[arg(long)]
        svg_file: Option<PathBuf>,
    },
    Delete {
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct HoursArgs {
    #[command(subcommand)]
    pub action: HoursCmd,
}

#[derive(Subcommand, Debug)]
pub enum HoursCmd {
    Get,
    /// Replace the whole week
    Set {
        #[command(flatten)]
        input: JsonInput,
    },
}

#[derive(Parser, Debug)]
pub struct HolidaysArgs {
    #[command(subcommand)]
    pub action: HolidaysCmd,
}

#[derive(Subcommand, Debug)]
pub enum HolidaysCmd {
    List {
        #[arg(long)]
        year: Option<i32>,
    },
    Add {
        /// Day off (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct FilmsArgs {
    #[command(subcommand)]
    pub action: FilmsCmd,
}

#[derive(Subcommand, Debug)]
pub enum FilmsCmd {
    /// List optimizer projects
    Projects,
    CreateProject {
        #[arg(long)]
        name: String,
        #[arg(long)]
        memo: Option<String>,
    },
    DeleteProject {
        id: String,
    },
    /// List registered film stock
    List,
    Create {
        #[arg(long)]
        name: String,
        /// Roll width in millimetres
        #[arg(long)]
        width: u32,
        /// Roll length in millimetres
        #[arg(long)]
        length: u32,
    },
    Delete {
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct DashboardArgs {
    #[command(subcommand)]
    pub action: DashboardCmd,
}

#[derive(Subcommand, Debug)]
pub enum DashboardCmd {
    Stats,
    /// Keep polling and print each refresh
    Watch {
        /// Stop after this many refreshes
        #[arg(long, default_value_t = 3)]
        count: u32,
    },
}

#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthCmd,
}

#[derive(Subcommand, Debug)]
pub enum AuthCmd {
    /// Report whether an access token is present
    Status,
    /// Evaluate the route guard for a path
    Guard { path: String },
    /// Store an access token in the cookie jar
    SetToken {
        /// File containing the token (takes precedence over env)
        #[arg(long, env = "HOMESERVICE_ACCESS_TOKEN_FILE")]
        token_file: Option<PathBuf>,
        /// Token from env (no CLI flag to keep it out of shell history)
        #[arg(hide = true, env = "HOMESERVICE_ACCESS_TOKEN")]
        token_env: Option<String>,
    },
    /// Log out and clear the local session
    Logout,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReservationStatusArg {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatusArg {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.to_status().as_str()
    }

    #[must_use]
    pub fn to_status(self) -> ReservationStatus {
        match self {
            Self::Pending => ReservationStatus::Pending,
            Self::Confirmed => ReservationStatus::Confirmed,
            Self::Completed => ReservationStatus::Completed,
            Self::Cancelled => ReservationStatus::Cancelled,
        }
    }
}

impl fmt::Display for ReservationStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum IconTypeArg {
    Fill,
    Mono,
    Color,
}

impl IconTypeArg {
    #[must_use]
    pub fn to_icon_type(self) -> IconType {
        match self {
            Self::Fill => IconType::Fill,
            Self::Mono => IconType::Mono,
            Self::Color => IconType::Color,
        }
    }
}

impl fmt::Display for IconTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_icon_type().as_str())
    }
}
