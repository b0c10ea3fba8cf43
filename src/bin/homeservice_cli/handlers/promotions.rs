#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::types::PromotionInput;

use super::{parse_id, parse_ids, show, show_written};
use crate::args::CatalogueCmd;
use crate::client::{CliError, Ctx};
use crate::io::read_json;

pub async fn handle(ctx: &Ctx, cmd: CatalogueCmd) -> Result<(), CliError> {
    let promotions = ctx.api.promotions();
    match cmd {
        CatalogueCmd::List => show(ctx, promotions.list()).await,
        CatalogueCmd::Get { id } => show(ctx, promotions.detail(Some(&parse_id(&id)))).await,
        CatalogueCmd::Create { input } => {
            let input: PromotionInput = read_json(input)?;
            let created = promotions.create(&input).await?;
            show_written(ctx, &created)
        }
        CatalogueCmd::Update { id, input } => {
            let input: PromotionInput = read_json(input)?;
            let updated = promotions.update(&parse_id(&id), &input).await?;
            show_written(ctx, &updated)
        }
        CatalogueCmd::Toggle { id } => {
            promotions.toggle(&parse_id(&id)).await?;
            Ok(())
        }
        CatalogueCmd::Reorder { ids } => {
            promotions.reorder(&parse_ids(&ids)).await?;
            Ok(())
        }
        CatalogueCmd::Delete { id } => {
            promotions.delete(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
