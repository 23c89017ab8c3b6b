//! Fixtures
//!
//! YAML inputs: the product catalog and the checkout forms the CLI submits.

use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{catalog::CatalogError, pricing::PricingError};

pub mod catalog;
pub mod checkout;

pub use catalog::{default_catalog, load_catalog, parse_catalog, parse_price};
pub use checkout::{load_payment, load_shipping};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Amount or currency could not be parsed
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Products failed catalog validation
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let contents = fs::read_to_string(path)?;

    Ok(serde_norway::from_str(&contents)?)
}
