//! Payment details
//!
//! Card data is accepted and masked, never charged. The full card number and
//! the CVV are wiped from memory on drop and never leave this module unmasked.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::validation::{ValidationErrors, Validator};

/// A card field that must not outlive the checkout.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CardSecret(String);

impl CardSecret {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CardSecret(**redacted**)")
    }
}

impl Drop for CardSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Card details entered at the payment stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentInfo {
    /// Name printed on the card
    pub cardholder_name: String,

    /// Full card number
    pub card_number: CardSecret,

    /// Expiry date, e.g. "12/29"
    pub expiry: String,

    /// Card verification value
    pub cvv: CardSecret,

    /// Billing address
    pub billing_address: String,
}

impl PaymentInfo {
    /// Assemble payment details from raw form values.
    pub fn new(
        cardholder_name: impl Into<String>,
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
        billing_address: impl Into<String>,
    ) -> Self {
        Self {
            cardholder_name: cardholder_name.into(),
            card_number: CardSecret::new(card_number),
            expiry: expiry.into(),
            cvv: CardSecret::new(cvv),
            billing_address: billing_address.into(),
        }
    }

    /// Check every required field, reporting all failures at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each field that is too short.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .min_len(
                "cardholder_name",
                &self.cardholder_name,
                2,
                "Name on card is required",
            )
            .min_len(
                "card_number",
                self.card_number.expose(),
                16,
                "Valid card number is required",
            )
            .min_len("expiry", &self.expiry, 5, "Valid expiry date is required")
            .min_len("cvv", self.cvv.expose(), 3, "Valid CVV is required")
            .min_len(
                "billing_address",
                &self.billing_address,
                5,
                "Billing address is required",
            )
            .finish()
    }

    /// The form of these details that may be stored with an order.
    #[must_use]
    pub fn masked(&self) -> MaskedPayment {
        MaskedPayment {
            cardholder_name: self.cardholder_name.trim().to_string(),
            card_number: mask_card_number(self.card_number.expose()),
            expiry: self.expiry.trim().to_string(),
            billing_address: self.billing_address.trim().to_string(),
        }
    }
}

/// Payment details as stored on an order. Carries no CVV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedPayment {
    /// Name printed on the card
    pub cardholder_name: String,

    /// Card number with all but the last four digits hidden
    pub card_number: String,

    /// Expiry date
    pub expiry: String,

    /// Billing address
    pub billing_address: String,
}

/// Hide all but the last four digits of a card number.
#[must_use]
pub fn mask_card_number(card_number: &str) -> String {
    let digits: Vec<char> = card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    let last_four: String = digits.iter().skip(digits.len().saturating_sub(4)).collect();

    format!("**** **** **** {last_four}")
}
