#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::resources::ReviewFilter;

use super::{parse_id, show};
use crate::args::ReviewsCmd;
use crate::client::{CliError, Ctx};

pub async fn handle(ctx: &Ctx, cmd: ReviewsCmd) -> Result<(), CliError> {
    let reviews = ctx.api.reviews();
    match cmd {
        ReviewsCmd::List {
            rating,
            visible,
            search,
            page,
            limit,
        } => {
            let filter = ReviewFilter {
                rating,
                is_visible: visible,
                search,
                page,
                limit,
            };
            show(ctx, reviews.list(&filter)).await
        }
        ReviewsCmd::Get { id } => show(ctx, reviews.detail(Some(&parse_id(&id)))).await,
        ReviewsCmd::ToggleVisibility { id } => {
            reviews.toggle_visibility(&parse_id(&id)).await?;
            Ok(())
        }
        ReviewsCmd::Delete { id } => {
            reviews.delete(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
