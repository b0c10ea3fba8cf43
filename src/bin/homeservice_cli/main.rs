//! homeservice-cli: back-office command-line client for the booking API.
//! Every resource command passes the route guard before any request is made.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;

#[cfg(test)]
mod tests;

use clap::Parser;
use homeservice_admin::{config, telemetry};

use args::{Cli, Commands};
use client::{CliError, Ctx};
use config::Settings;
use handlers::{
    auth, customers, dashboard, films, holidays, hours, icons, portfolios, promotions,
    reservations, reviews, services,
};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = config::load(&cli.config)?;
    telemetry::init(&settings.logging)?;

    match cli.command {
        Commands::Auth(cmd) => auth::handle(&settings, cli.summary, cmd.action).await,
        command => run(&settings, cli.summary, command).await,
    }
}

async fn run(settings: &Settings, summary: bool, command: Commands) -> Result<(), CliError> {
    let ctx = Ctx::new(settings, summary)?;
    if let Some(route) = command.route() {
        ctx.guard(route)?;
    }

    match command {
        Commands::Reservations(cmd) => reservations::handle(&ctx, cmd.action).await,
        Commands::Customers(cmd) => customers::handle(&ctx, cmd.action).await,
        Commands::Reviews(cmd) => reviews::handle(&ctx, cmd.action).await,
        Commands::Services(cmd) => services::handle(&ctx, cmd.action).await,
        Commands::Promotions(cmd) => promotions::handle(&ctx, cmd.action).await,
        Commands::Portfolios(cmd) => portfolios::handle(&ctx, cmd.action).await,
        Commands::Icons(cmd) => icons::handle(&ctx, cmd.action).await,
        Commands::Hours(cmd) => hours::handle(&ctx, cmd.action).await,
        Commands::Holidays(cmd) => holidays::handle(&ctx, cmd.action).await,
        Commands::Films(cmd) => films::handle(&ctx, cmd.action).await,
        Commands::Dashboard(cmd) => dashboard::handle(&ctx, cmd.action).await,
        Commands::Auth(cmd) => auth::handle(settings, summary, cmd.action).await,
    }
}
