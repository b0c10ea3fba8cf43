#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::cache::QueryState;
use tracing::debug;

use super::show;
use crate::args::DashboardCmd;
use crate::client::{CliError, Ctx};
use crate::print::print_output;

pub async fn handle(ctx: &Ctx, cmd: DashboardCmd) -> Result<(), CliError> {
    match cmd {
        DashboardCmd::Stats => show(ctx, ctx.api.dashboard().stats()).await,
        DashboardCmd::Watch { count } => watch(ctx, count).await,
    }
}

async fn watch(ctx: &Ctx, count: u32) -> Result<(), CliError> {
    let dashboard = ctx.api.dashboard();
    if count > 1 && dashboard.stats().options().refetch_interval.is_none() {
        return Err(CliError::InvalidInput(
            "dashboard polling is disabled (cache.dashboard_refetch_ms = 0)".into(),
        ));
    }

    let mut observer = dashboard.observe();
    let mut printed = 0;
    let mut state = observer.settled().await;
    while let Some(current) = state {
        match current {
            QueryState::Ready { data, .. } => {
                print_output(data.as_ref(), ctx.summary)?;
                printed += 1;
                if printed >= count {
                    break;
                }
            }
            QueryState::Failed { error, .. } => return Err(error.into()),
            QueryState::Idle { .. } | QueryState::Loading { .. } => {
                debug!("dashboard refresh in progress");
            }
        }
        state = observer.changed().await;
    }
    Ok(())
}
