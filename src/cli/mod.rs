//! Command line interface

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use storefront::{
    Storefront,
    config::{StorefrontConfig, observability::LoggingConfig},
};

mod account;
mod cart;
mod checkout;
mod orders;
mod products;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart and order CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products
    Products(products::ProductsArgs),

    /// List product categories
    Categories,

    /// Show or change the cart
    Cart(cart::CartCommand),

    /// Show or change the wishlist
    Wishlist(wishlist::WishlistCommand),

    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),

    /// Show placed orders
    Orders(orders::OrdersCommand),

    /// Sign in
    Login(account::LoginArgs),

    /// Create an account and sign in
    Signup(account::SignupArgs),

    /// Update the signed-in profile
    Profile(account::ProfileArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let mut store = Storefront::from_config(&self.config)
            .map_err(|error| format!("failed to open storefront: {}", error_chain(&error)))?;

        match self.command {
            Commands::Products(args) => products::run(&store, &args),
            Commands::Categories => products::categories(&store),
            Commands::Cart(command) => cart::run(&mut store, command),
            Commands::Wishlist(command) => wishlist::run(&mut store, command),
            Commands::Checkout(args) => checkout::run(&mut store, &args).await,
            Commands::Orders(command) => orders::run(&store, command),
            Commands::Login(args) => account::login(&store, &args).await,
            Commands::Signup(args) => account::signup(&store, &args).await,
            Commands::Profile(args) => account::update_profile(&store, args).await,
            Commands::Logout => account::logout(&store),
            Commands::Whoami => account::whoami(&store),
        }
    }
}

/// Render an error with its sources, outermost first.
pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

pub(crate) fn say(line: impl std::fmt::Display) -> Result<(), String> {
    writeln!(io::stdout().lock(), "{line}").map_err(|error| format!("failed to write output: {error}"))
}
