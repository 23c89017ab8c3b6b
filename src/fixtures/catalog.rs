//! Catalog fixtures

use std::path::Path;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use tracing::debug;

use crate::{
    catalog::Catalog,
    pricing::{Amount, parse_amount, parse_currency},
    products::Product,
};

use super::{FixtureError, read_yaml};

const DEFAULT_CATALOG: &str = include_str!("../../fixtures/catalog/default.yml");

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency every product is priced in
    pub currency: String,

    /// Products in listing order
    pub products: Vec<ProductFixture>,
}

/// Product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "2.99 GBP")
    pub price: String,

    /// Product image
    #[serde(default)]
    pub image: String,

    /// Average rating
    #[serde(default)]
    pub rating: f64,

    /// Product category
    pub category: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Feature bullet points
    #[serde(default)]
    pub features: Vec<String>,

    /// Whether the product can be bought
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,

    /// Number of reviews
    #[serde(default)]
    pub review_count: u32,
}

fn in_stock_default() -> bool {
    true
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        Ok(Product {
            id: fixture.id.into(),
            name: fixture.name,
            price,
            image: fixture.image,
            rating: fixture.rating,
            category: fixture.category,
            description: fixture.description,
            features: fixture.features,
            in_stock: fixture.in_stock,
            review_count: fixture.review_count,
        })
    }
}

/// Parse price string (e.g., "2.99 GBP") into an amount.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not `AMOUNT CURRENCY`,
/// or a pricing error if either part cannot be parsed.
pub fn parse_price(s: &str) -> Result<Amount, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency: &'static Currency = parse_currency(code)?;
    let amount = parse_amount(amount, currency)?;

    Ok(Money::from_minor(amount.to_minor_units(), currency))
}

/// Build a catalog from YAML text.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed or a product is invalid.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    build_catalog(fixture)
}

/// Load a catalog from a YAML file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or is invalid.
pub fn load_catalog(path: &Path) -> Result<Catalog, FixtureError> {
    let fixture: CatalogFixture = read_yaml(path)?;

    debug!(path = %path.display(), products = fixture.products.len(), "loading catalog");

    build_catalog(fixture)
}

/// The built-in eight-product catalog.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the bundled catalog is invalid.
pub fn default_catalog() -> Result<Catalog, FixtureError> {
    parse_catalog(DEFAULT_CATALOG)
}

fn build_catalog(fixture: CatalogFixture) -> Result<Catalog, FixtureError> {
    let currency = parse_currency(&fixture.currency)?;
    let mut catalog = Catalog::new(currency);

    for product in fixture.products {
        catalog.insert(product.try_into()?)?;
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::{catalog::CatalogError, pricing::PricingError};

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        assert_eq!(parse_price("2.99 GBP")?, Money::from_minor(2_99, GBP));
        assert_eq!(parse_price("129.99 USD")?, Money::from_minor(129_99, USD));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        assert!(matches!(parse_price("2.99GBP"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("2.99 GBP extra"), Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        assert!(matches!(
            parse_price("2.99 ABC"),
            Err(FixtureError::Pricing(PricingError::UnknownCurrency(code))) if code == "ABC"
        ));
    }

    #[test]
    fn default_catalog_has_eight_products() -> TestResult {
        let catalog = default_catalog()?;

        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.currency(), USD);
        assert_eq!(
            catalog.categories(),
            vec!["Audio", "Accessories", "Computing", "Wearables"]
        );

        let headphones = catalog.get("prod-001").ok_or("missing prod-001")?;

        assert_eq!(headphones.price, Money::from_minor(129_99, USD));
        assert_eq!(headphones.review_count, 127);
        assert_eq!(headphones.features.len(), 6);

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let yaml = "currency: USD\n\
                    products:\n\
                    \x20 - id: a\n\
                    \x20   name: A\n\
                    \x20   price: 1.00 GBP\n\
                    \x20   category: X\n";

        assert!(matches!(
            parse_catalog(yaml),
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch(..)))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = "currency: USD\n\
                    products:\n\
                    \x20 - {id: a, name: A, price: 1.00 USD, category: X}\n\
                    \x20 - {id: a, name: B, price: 2.00 USD, category: X}\n";

        assert!(matches!(
            parse_catalog(yaml),
            Err(FixtureError::Catalog(CatalogError::DuplicateId(_)))
        ));
    }
}
