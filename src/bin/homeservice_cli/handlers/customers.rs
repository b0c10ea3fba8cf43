#![deny(clippy::all, clippy::pedantic)]

use homeservice_admin::resources::CustomerFilter;

use super::{parse_id, show};
use crate::args::CustomersCmd;
use crate::client::{CliError, Ctx};

pub async fn handle(ctx: &Ctx, cmd: CustomersCmd) -> Result<(), CliError> {
    let customers = ctx.api.customers();
    match cmd {
        CustomersCmd::List {
            search,
            page,
            limit,
        } => {
            let filter = CustomerFilter {
                search,
                page,
                limit,
            };
            show(ctx, customers.list(&filter)).await
        }
        CustomersCmd::Get { id } => show(ctx, customers.detail(Some(&parse_id(&id)))).await,
        CustomersCmd::Delete { id } => {
            customers.delete(&parse_id(&id)).await?;
            Ok(())
        }
    }
}
