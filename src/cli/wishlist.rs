//! Wishlist commands

use std::io;

use clap::{Args, Subcommand};
use storefront::{Storefront, receipt};

use super::{cart, error_chain, say};

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: Option<WishlistSubcommand>,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Show saved products
    Show,

    /// Save a product
    Add {
        /// Product id
        id: String,
    },

    /// Unsave a product
    Remove {
        /// Product id
        id: String,
    },

    /// Move a saved product into the cart
    Move {
        /// Product id
        id: String,
    },
}

pub(crate) fn run(store: &mut Storefront, command: WishlistCommand) -> Result<(), String> {
    match command.command.unwrap_or(WishlistSubcommand::Show) {
        WishlistSubcommand::Show => {}
        WishlistSubcommand::Add { id } => {
            if !store.wishlist.add(&id).map_err(|error| error_chain(&error))? {
                say(format_args!("{id} is already on your wishlist"))?;
            }
        }
        WishlistSubcommand::Remove { id } => {
            if !store.wishlist.remove(&id) {
                say(format_args!("{id} was not on your wishlist"))?;
            }
        }
        WishlistSubcommand::Move { id } => {
            store
                .wishlist
                .move_to_cart(&id, &mut store.cart)
                .map_err(|error| error_chain(&error))?;

            return cart::show(store);
        }
    }

    receipt::write_products(io::stdout().lock(), &store.wishlist.items())
        .map_err(|error| error_chain(&error))
}
