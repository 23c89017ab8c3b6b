//! Checkout form fixtures

use std::path::Path;

use crate::checkout::{PaymentInfo, ShippingInfo};

use super::{FixtureError, read_yaml};

/// Read shipping details from a YAML file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_shipping(path: &Path) -> Result<ShippingInfo, FixtureError> {
    read_yaml(path)
}

/// Read payment details from a YAML file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_payment(path: &Path) -> Result<PaymentInfo, FixtureError> {
    read_yaml(path)
}
