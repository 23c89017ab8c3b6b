//! Cart Records

use serde::{Deserialize, Serialize};

use crate::products::ProductId;

/// Persisted cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CartLineRecord {
    pub product_id: ProductId,
    pub quantity: u32,
}
