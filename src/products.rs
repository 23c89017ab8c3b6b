//! Products

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::pricing::Amount;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Catalog-wide unique product identifier (e.g. `prod-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Amount,

    /// Image reference (URL or asset path)
    pub image: String,

    /// Average rating, 0.0 to 5.0
    pub rating: f64,

    /// Category label
    pub category: String,

    /// Long-form description
    pub description: String,

    /// Feature bullet points
    pub features: Vec<String>,

    /// Whether the product can currently be shipped
    pub in_stock: bool,

    /// Number of reviews behind the rating
    pub review_count: u32,
}

impl Product {
    /// Create a product with the required catalog fields; the rest start empty.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Amount,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            rating: 0.0,
            category: category.into(),
            description: String::new(),
            features: Vec::new(),
            in_stock: true,
            review_count: 0,
        }
    }

    /// Set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;
    use rusty_money::{Money, iso::USD};

    use super::*;

    #[test]
    fn product_id_borrows_as_str_for_lookups() {
        let mut index = FxHashMap::default();
        index.insert(ProductId::new("prod-001"), 1);

        assert_eq!(index.get("prod-001"), Some(&1));
        assert_eq!(ProductId::from("prod-001").to_string(), "prod-001");
    }

    #[test]
    fn builder_sets_optional_fields() {
        let product = Product::new("prod-001", "Headphones", Money::from_minor(129_99, USD), "Audio")
            .with_rating(4.5)
            .with_image("headphones.jpg");

        assert_eq!(product.id.as_str(), "prod-001");
        assert!((product.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(product.image, "headphones.jpg");
        assert!(product.in_stock);
    }
}
