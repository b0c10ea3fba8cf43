#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::types::{FilmInput, FilmProjectInput};

use super::{parse_id, show, show_written};
use crate::args::FilmsCmd;
use crate::client::{CliError, Ctx};

pub async fn handle(ctx: &Ctx, cmd: FilmsCmd) -> Result<(), CliError> {
    let film = ctx.api.film();
    match cmd {
        FilmsCmd::Projects => show(ctx, film.projects()).await,
        FilmsCmd::CreateProject { name, memo } => {
            let created = film
                .create_project(&FilmProjectInput { name, memo })
                .await?;
            show_written(ctx, &created)
        }
        FilmsCmd::DeleteProject { id } => {
            film.delete_project(&parse_id(&id)).await?;
            Ok(())
        }
        FilmsCmd::List => show(ctx, film.films()).await,
        FilmsCmd::Create {
            name,
            width,
            length,
        } => {
            let created = film
                .create_film(&FilmInput {
                    name,
                    width,
                    length,
                })
                .await?;
            show_written(ctx, &created)
        }
        FilmsCmd::Delete { id } => {
            film.delete_film(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
