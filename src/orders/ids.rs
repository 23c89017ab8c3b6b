//! Order identifiers

use std::{borrow::Borrow, fmt};

use jiff::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Order number of the form `ORD-<unix millis>-<0..10000>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Prefix shared by every generated order number.
    pub const PREFIX: &'static str = "ORD";

    /// Generate an order number for an order placed at `now`.
    pub fn generate_with<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> Self {
        let suffix: u16 = rng.gen_range(0..10_000);

        Self(format!("{}-{}-{suffix}", Self::PREFIX, now.as_millisecond()))
    }

    /// Wrap an existing order number.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The order number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for OrderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
