#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::resources::HolidayFilter;
use homeservice_admin::types::HolidayInput;

use super::{parse_id, show, show_written};
use crate::args::HolidaysCmd;
use crate::client::{CliError, Ctx};
use crate::io::parse_date;

pub async fn handle(ctx: &Ctx, cmd: HolidaysCmd) -> Result<(), CliError> {
    let settings = ctx.api.settings();
    match cmd {
        HolidaysCmd::List { year } => show(ctx, settings.holidays(&HolidayFilter { year })).await,
        HolidaysCmd::Add { date, reason } => {
            let input = HolidayInput {
                date: parse_date(&date)?,
                reason,
            };
            let added = settings.add_holiday(&input).await?;
            show_written(ctx, &added)
        }
        HolidaysCmd::Delete { id } => {
            settings.delete_holiday(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
