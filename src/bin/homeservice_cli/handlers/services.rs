#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::types::ServiceInput;

use super::{parse_id, parse_ids, show, show_written};
use crate::args::CatalogueCmd;
use crate::client::{CliError, Ctx};
use crate::io::read_json;

pub async fn handle(ctx: &Ctx, cmd: CatalogueCmd) -> Result<(), CliError> {
    let services = ctx.api.services();
    match cmd {
        CatalogueCmd::List => show(ctx, services.list()).await,
        CatalogueCmd::Get { id } => show(ctx, services.detail(Some(&parse_id(&id)))).await,
        CatalogueCmd::Create { input } => {
            let input: ServiceInput = read_json(input)?;
            let created = services.create(&input).await?;
            show_written(ctx, &created)
        }
        CatalogueCmd::Update { id, input } => {
            let input: ServiceInput = read_json(input)?;
            let updated = services.update(&parse_id(&id), &input).await?;
            show_written(ctx, &updated)
        }
        CatalogueCmd::Toggle { id } => {
            services.toggle(&parse_id(&id)).await?;
            Ok(())
        }
        CatalogueCmd::Reorder { ids } => {
            services.reorder(&parse_ids(&ids)).await?;
            Ok(())
        }
        CatalogueCmd::Delete { id } => {
            services.delete(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
