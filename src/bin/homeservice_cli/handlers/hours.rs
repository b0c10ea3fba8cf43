#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::types::OperatingHours;

use super::show;
use crate::args::HoursCmd;
use crate::client::{CliError, Ctx};
use crate::io::read_json;

pub async fn handle(ctx: &Ctx, cmd: HoursCmd) -> Result<(), CliError> {
    let settings = ctx.api.settings();
    match cmd {
        HoursCmd::Get => show(ctx, settings.hours()).await,
        HoursCmd::Set { input } => {
            let hours: OperatingHours = read_json(input)?;
            settings.update_hours(&hours).await?;
            Ok(())
        }
    }
}
