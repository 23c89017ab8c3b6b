//! Shipping details

use serde::{Deserialize, Serialize};

use super::validation::{ValidationErrors, Validator};

/// Where and to whom an order ships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    /// Recipient name
    pub full_name: String,

    /// Street address
    pub address_line1: String,

    /// Apartment, suite, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// Postal or zip code
    pub postal_code: String,

    /// Country
    pub country: String,

    /// Contact phone number
    pub phone: String,
}

impl ShippingInfo {
    /// Check every required field, reporting all failures at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each field that is too short.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .min_len("full_name", &self.full_name, 2, "Full name is required")
            .min_len("address_line1", &self.address_line1, 5, "Address is required")
            .min_len("city", &self.city, 2, "City is required")
            .min_len("state", &self.state, 2, "State is required")
            .min_len(
                "postal_code",
                &self.postal_code,
                5,
                "Valid zip code is required",
            )
            .min_len("country", &self.country, 2, "Country is required")
            .min_len("phone", &self.phone, 10, "Valid phone number is required")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_shipping() -> ShippingInfo {
        ShippingInfo {
            full_name: "Ada Lovelace".to_string(),
            address_line1: "12 Analytical Way".to_string(),
            address_line2: None,
            city: "London".to_string(),
            state: "LDN".to_string(),
            postal_code: "10001".to_string(),
            country: "UK".to_string(),
            phone: "0123456789".to_string(),
        }
    }

    #[test]
    fn complete_address_passes() {
        assert_eq!(valid_shipping().validate(), Ok(()));
    }

    #[test]
    fn short_fields_are_all_reported() {
        let shipping = ShippingInfo {
            full_name: " A ".to_string(),
            postal_code: "1234".to_string(),
            phone: "555-0100".to_string(),
            ..valid_shipping()
        };

        let errors = shipping.validate().err().unwrap_or_default();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("full_name"), Some("Full name is required"));
        assert_eq!(errors.get("postal_code"), Some("Valid zip code is required"));
        assert_eq!(errors.get("phone"), Some("Valid phone number is required"));
    }

    #[test]
    fn address_line2_is_optional() {
        let shipping = ShippingInfo {
            address_line2: Some(String::new()),
            ..valid_shipping()
        };

        assert!(shipping.validate().is_ok());
    }

    #[test]
    fn reads_from_yaml() -> testresult::TestResult {
        let shipping: ShippingInfo = serde_norway::from_str(
            "full_name: Ada Lovelace\n\
             address_line1: 12 Analytical Way\n\
             city: London\n\
             state: LDN\n\
             postal_code: '10001'\n\
             country: UK\n\
             phone: '0123456789'\n",
        )?;

        assert_eq!(shipping, valid_shipping());

        Ok(())
    }
}
