//! Pricing
//!
//! Money arithmetic shared by the cart, the checkout summary and persisted orders.
//! Every place that shows a subtotal, tax, shipping fee or total goes through
//! [`OrderTotals::from_subtotal`], so the figures cannot drift apart.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money, MoneyError,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// A money amount in one of the supported ISO currencies.
pub type Amount = Money<'static, Currency>;

/// Errors that can occur while pricing carts and orders.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A percentage calculation could not be represented in minor units.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// Multiplying a unit price by a quantity overflowed.
    #[error("line total overflowed: {unit_minor} x {quantity}")]
    LineOverflow {
        /// Unit price in minor units
        unit_minor: i64,
        /// Quantity on the line
        quantity: u32,
    },

    /// Currency code is not one the store can price in.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Amount string could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Percentage string could not be parsed.
    #[error("invalid percentage: {0}")]
    InvalidPercentage(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Tax and shipping rules applied on top of a cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    /// Tax charged on the subtotal.
    pub tax_rate: Percentage,

    /// Subtotals strictly above this amount ship for free.
    pub free_shipping_threshold: Amount,

    /// Shipping fee charged when the subtotal does not exceed the threshold.
    pub flat_shipping_fee: Amount,
}

impl PricingPolicy {
    /// 8% tax, free shipping over 100.00, otherwise a flat 9.99 fee.
    #[must_use]
    pub fn standard(currency: &'static Currency) -> Self {
        Self {
            tax_rate: Percentage::from(Decimal::new(8, 2)),
            free_shipping_threshold: Money::from_minor(100_00, currency),
            flat_shipping_fee: Money::from_minor(9_99, currency),
        }
    }

    /// Currency the policy amounts are expressed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.flat_shipping_fee.currency()
    }

    /// Tax due on the given subtotal, rounded half away from zero to the minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::PercentConversion`] if the result cannot be represented.
    pub fn tax_on(&self, subtotal: &Amount) -> Result<Amount, PricingError> {
        let tax_minor = percent_of_minor(&self.tax_rate, subtotal.to_minor_units())?;

        Ok(Money::from_minor(tax_minor, subtotal.currency()))
    }

    /// Shipping fee due on the given subtotal.
    #[must_use]
    pub fn shipping_on(&self, subtotal: &Amount) -> Amount {
        if subtotal.to_minor_units() > self.free_shipping_threshold.to_minor_units() {
            Money::from_minor(0, subtotal.currency())
        } else {
            self.flat_shipping_fee
        }
    }
}

/// Subtotal, tax, shipping fee and grand total for a cart or order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    /// Sum of unit price x quantity over all lines
    pub subtotal: Amount,

    /// Tax on the subtotal
    pub tax: Amount,

    /// Shipping fee
    pub shipping: Amount,

    /// Subtotal + tax + shipping
    pub total: Amount,
}

impl OrderTotals {
    /// Derive tax, shipping and total from a subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the tax cannot be represented or the subtotal
    /// currency differs from the policy currency.
    pub fn from_subtotal(subtotal: Amount, policy: &PricingPolicy) -> Result<Self, PricingError> {
        let tax = policy.tax_on(&subtotal)?;
        let shipping = policy.shipping_on(&subtotal);
        let total = subtotal.add(tax)?.add(shipping)?;

        Ok(Self {
            subtotal,
            tax,
            shipping,
            total,
        })
    }

    /// Totals for an empty cart.
    #[must_use]
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal: zero,
            tax: zero,
            shipping: zero,
            total: zero,
        }
    }

    /// Whether the order qualified for free shipping.
    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping.to_minor_units() == 0
    }
}

/// Calculates the total for a line of `quantity` units at `unit` each.
///
/// # Errors
///
/// Returns [`PricingError::LineOverflow`] if the product does not fit in minor units.
pub fn line_total(unit: &Amount, quantity: u32) -> Result<Amount, PricingError> {
    let unit_minor = unit.to_minor_units();

    let total_minor =
        unit_minor
            .checked_mul(i64::from(quantity))
            .ok_or(PricingError::LineOverflow {
                unit_minor,
                quantity,
            })?;

    Ok(Money::from_minor(total_minor, unit.currency()))
}

/// Calculates the sum of a list of amounts.
///
/// # Errors
///
/// Returns [`PricingError::Money`] if any amount is in a different currency.
pub fn total_price(
    amounts: impl IntoIterator<Item = Amount>,
    currency: &'static Currency,
) -> Result<Amount, PricingError> {
    let total = amounts
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, amount| acc.add(amount))?;

    Ok(total)
}

/// Calculate a percentage of a minor unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the result overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Look up one of the supported currencies by its ISO code.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] for any other code.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PricingError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(PricingError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a decimal amount (e.g. "9.99") in the given currency.
///
/// # Errors
///
/// Returns [`PricingError::InvalidAmount`] if the string is not a non-negative
/// decimal that fits in minor units.
pub fn parse_amount(s: &str, currency: &'static Currency) -> Result<Amount, PricingError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| PricingError::InvalidAmount(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(PricingError::InvalidAmount(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PricingError::InvalidAmount(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse a percentage string (e.g. "8%" or "0.08").
///
/// # Errors
///
/// Returns [`PricingError::InvalidPercentage`] if the value cannot be parsed or is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, PricingError> {
    let trimmed = s.trim();

    let value = if let Some(points) = trimmed.strip_suffix('%') {
        points
            .trim()
            .parse::<Decimal>()
            .map(|points| points / Decimal::ONE_HUNDRED)
    } else {
        trimmed.parse::<Decimal>()
    }
    .map_err(|_err| PricingError::InvalidPercentage(s.to_string()))?;

    if value.is_sign_negative() {
        return Err(PricingError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn usd(minor: i64) -> Amount {
        Money::from_minor(minor, USD)
    }

    #[test]
    fn totals_above_free_shipping_threshold() -> TestResult {
        let subtotal = line_total(&usd(60_00), 2)?;
        let totals = OrderTotals::from_subtotal(subtotal, &PricingPolicy::standard(USD))?;

        assert_eq!(totals.subtotal, usd(120_00));
        assert_eq!(totals.tax, usd(9_60));
        assert_eq!(totals.shipping, usd(0));
        assert_eq!(totals.total, usd(129_60));
        assert!(totals.ships_free());

        Ok(())
    }

    #[test]
    fn totals_below_free_shipping_threshold() -> TestResult {
        let totals = OrderTotals::from_subtotal(usd(20_00), &PricingPolicy::standard(USD))?;

        assert_eq!(totals.subtotal, usd(20_00));
        assert_eq!(totals.tax, usd(1_60));
        assert_eq!(totals.shipping, usd(9_99));
        assert_eq!(totals.total, usd(31_59));
        assert!(!totals.ships_free());

        Ok(())
    }

    #[test]
    fn subtotal_exactly_at_threshold_pays_shipping() -> TestResult {
        let totals = OrderTotals::from_subtotal(usd(100_00), &PricingPolicy::standard(USD))?;

        assert_eq!(totals.shipping, usd(9_99));
        assert_eq!(totals.tax, usd(8_00));
        assert_eq!(totals.total, usd(117_99));

        Ok(())
    }

    #[test]
    fn tax_rounds_half_away_from_zero() -> TestResult {
        // 8% of 0.31 is 0.0248, 8% of 0.44 is 0.0352
        let policy = PricingPolicy::standard(USD);

        assert_eq!(policy.tax_on(&usd(31))?, usd(2));
        assert_eq!(policy.tax_on(&usd(44))?, usd(4));
        assert_eq!(policy.tax_on(&usd(1_99))?, usd(16));

        Ok(())
    }

    #[test]
    fn totals_currency_mismatch_errors() {
        let result = OrderTotals::from_subtotal(
            Money::from_minor(20_00, GBP),
            &PricingPolicy::standard(USD),
        );

        assert!(matches!(result, Err(PricingError::Money(_))));
    }

    #[test]
    fn line_total_overflow_errors() {
        let result = line_total(&usd(i64::MAX), 2);

        assert_eq!(
            result,
            Err(PricingError::LineOverflow {
                unit_minor: i64::MAX,
                quantity: 2
            })
        );
    }

    #[test]
    fn total_price_sums_amounts() -> TestResult {
        assert_eq!(total_price([usd(100), usd(250)], USD)?, usd(350));
        assert_eq!(total_price([], USD)?, usd(0));

        Ok(())
    }

    #[test]
    fn parse_currency_accepts_supported_codes() -> TestResult {
        assert_eq!(parse_currency("usd")?, USD);
        assert_eq!(parse_currency("GBP")?, GBP);
        assert_eq!(
            parse_currency("JPY"),
            Err(PricingError::UnknownCurrency("JPY".to_string()))
        );

        Ok(())
    }

    #[test]
    fn parse_amount_handles_decimals() -> TestResult {
        assert_eq!(parse_amount("9.99", USD)?, usd(9_99));
        assert_eq!(parse_amount("100", USD)?, usd(100_00));
        assert!(parse_amount("-1", USD).is_err());
        assert!(parse_amount("ten", USD).is_err());

        Ok(())
    }

    #[test]
    fn parse_percentage_accepts_points_and_fractions() -> TestResult {
        let points = parse_percentage("8%")?;
        let fraction = parse_percentage("0.08")?;

        assert_eq!(percent_of_minor(&points, 120_00)?, 9_60);
        assert_eq!(percent_of_minor(&fraction, 120_00)?, 9_60);
        assert!(parse_percentage("-5%").is_err());

        Ok(())
    }
}
