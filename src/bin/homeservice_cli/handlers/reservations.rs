#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::resources::ReservationFilter;

use super::{parse_id, show};
use crate::args::ReservationsCmd;
use crate::client::{CliError, Ctx};
use crate::io::parse_date_opt;

pub async fn handle(ctx: &Ctx, cmd: ReservationsCmd) -> Result<(), CliError> {
    let reservations = ctx.api.reservations();
    match cmd {
        ReservationsCmd::List {
            status,
            search,
            start_date,
            end_date,
            page,
            limit,
        } => {
            let filter = ReservationFilter {
                status: status.map(|s| s.to_status()),
                search,
                start_date: parse_date_opt(start_date)?,
                end_date: parse_date_opt(end_date)?,
                page,
                limit,
            };
            show(ctx, reservations.list(&filter)).await
        }
        ReservationsCmd::Get { id } => show(ctx, reservations.detail(Some(&parse_id(&id)))).await,
        ReservationsCmd::Status { id, status } => {
            reservations
                .update_status(&parse_id(&id), status.to_status())
                .await?;
            Ok(())
        }
        ReservationsCmd::Cancel { id, reason } => {
            reservations.cancel(&parse_id(&id), reason).await?;
            Ok(())
        }
        ReservationsCmd::Delete { id } => {
            reservations.delete(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
