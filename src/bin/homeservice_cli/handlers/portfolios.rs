#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::resources::PortfolioFilter;
use homeservice_admin::types::PortfolioInput;

use super::{parse_id, show, show_written};
use crate::args::PortfoliosCmd;
use crate::client::{CliError, Ctx};
use crate::io::read_json;

pub async fn handle(ctx: &Ctx, cmd: PortfoliosCmd) -> Result<(), CliError> {
    let portfolios = ctx.api.portfolios();
    match cmd {
        PortfoliosCmd::List {
            service_id,
            visible,
            page,
            limit,
        } => {
            let filter = PortfolioFilter {
                service_id: service_id.as_deref().map(parse_id),
                is_visible: visible,
                page,
                limit,
            };
            show(ctx, portfolios.list(&filter)).await
        }
        PortfoliosCmd::Get { id } => show(ctx, portfolios.detail(Some(&parse_id(&id)))).await,
        PortfoliosCmd::Create { input } => {
            let input: PortfolioInput = read_json(input)?;
            let created = portfolios.create(&input).await?;
            show_written(ctx, &created)
        }
        PortfoliosCmd::Update { id, input } => {
            let input: PortfolioInput = read_json(input)?;
            let updated = portfolios.update(&parse_id(&id), &input).await?;
            show_written(ctx, &updated)
        }
        PortfoliosCmd::ToggleVisibility { id } => {
            portfolios.toggle_visibility(&parse_id(&id)).await?;
            Ok(())
        }
        PortfoliosCmd::Delete { id } => {
            portfolios.delete(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
