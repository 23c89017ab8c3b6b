//! Catalog listing commands

use std::io;

use clap::Args;
use storefront::{Storefront, catalog::SortOrder, pricing::parse_amount, receipt};

use super::{error_chain, say};

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only products in this category
    #[arg(long)]
    category: Option<String>,

    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,

    /// Minimum price, inclusive
    #[arg(long)]
    min: Option<String>,

    /// Maximum price, inclusive
    #[arg(long)]
    max: Option<String>,

    /// featured, price-low-high, price-high-low, rating, name-a-z, name-z-a
    #[arg(long, default_value = "featured")]
    sort: String,
}

pub(crate) fn run(store: &Storefront, args: &ProductsArgs) -> Result<(), String> {
    let catalog = &store.catalog;
    let mut products = catalog.search(args.search.as_deref().unwrap_or_default());

    if let Some(category) = &args.category {
        let in_category = catalog.by_category(category);
        products.retain(|product| in_category.iter().any(|other| other.id == product.id));
    }

    if args.min.is_some() || args.max.is_some() {
        let currency = catalog.currency();
        let min = parse_amount(args.min.as_deref().unwrap_or("0"), currency)
            .map_err(|error| error_chain(&error))?;
        let max = match &args.max {
            Some(max) => parse_amount(max, currency).map_err(|error| error_chain(&error))?,
            None => rusty_money::Money::from_minor(i64::MAX, currency),
        };

        let in_range = catalog.filter_by_price(&min, &max);
        products.retain(|product| in_range.iter().any(|other| other.id == product.id));
    }

    let products = SortOrder::parse(&args.sort).sorted(products);

    receipt::write_products(io::stdout().lock(), &products).map_err(|error| error_chain(&error))
}

pub(crate) fn categories(store: &Storefront) -> Result<(), String> {
    for category in store.catalog.categories() {
        say(category)?;
    }

    Ok(())
}
