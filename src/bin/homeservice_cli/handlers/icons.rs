#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::resources::IconFilter;
use homeservice_admin::types::IconInput;

use super::{parse_id, show, show_written};
use crate::args::IconsCmd;
use crate::client::{CliError, Ctx};
use crate::io::read_value;

pub async fn handle(ctx: &Ctx, cmd: IconsCmd) -> Result<(), CliError> {
    let icons = ctx.api.icons();
    match cmd {
        IconsCmd::List { icon_type, search } => {
            let filter = IconFilter {
                icon_type: icon_type.map(|t| t.to_icon_type()),
                search,
            };
            show(ctx, icons.list(&filter)).await
        }
        IconsCmd::Create {
            name,
            icon_type,
            svg,
            svg_file,
        } => {
            let input = IconInput {
                name,
                icon_type: icon_type.to_icon_type(),
                svg: read_value(svg, svg_file)?,
            };
            let created = icons.create(&input).await?;
            show_written(ctx, &created)
        }
        IconsCmd::Update {
            id,
            name,
            icon_type,
            svg,
            svg_file,
        } => {
            let input = IconInput {
                name,
                icon_type: icon_type.to_icon_type(),
                svg: read_value(svg, svg_file)?,
            };
            let updated = icons.update(&parse_id(&id), &input).await?;
            show_written(ctx, &updated)
        }
        IconsCmd::Delete { id } => {
            icons.delete(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
