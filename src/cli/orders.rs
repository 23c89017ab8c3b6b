//! Order history commands

use std::io;

use clap::{Args, Subcommand};
use storefront::{Storefront, receipt};

use super::error_chain;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: Option<OrdersSubcommand>,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List placed orders
    List,

    /// Show one order
    Show {
        /// Order number
        id: String,
    },
}

pub(crate) fn run(store: &Storefront, command: OrdersCommand) -> Result<(), String> {
    match command.command.unwrap_or(OrdersSubcommand::List) {
        OrdersSubcommand::List => receipt::write_orders(io::stdout().lock(), store.orders.all()),
        OrdersSubcommand::Show { id } => {
            let order = store
                .orders
                .get(&id)
                .ok_or_else(|| format!("order not found: {id}"))?;

            receipt::write_order(io::stdout().lock(), order)
        }
    }
    .map_err(|error| error_chain(&error))
}
