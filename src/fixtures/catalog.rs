//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{barcode::Barcode, catalog::CatalogItem, fixtures::FixtureError};

/// Wrapper for catalog items in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Items in seed order
    pub items: Vec<ItemFixture>,
}

/// Catalog Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price (e.g., "2.99 USD")
    pub price: String,

    /// Unique barcode
    pub barcode: Barcode,

    /// Category label
    pub category: String,

    /// Initial stock flag
    #[serde(default = "in_stock_by_default")]
    pub in_stock: bool,
}

fn in_stock_by_default() -> bool {
    true
}

impl TryFrom<ItemFixture> for CatalogItem {
    type Error = FixtureError;

    fn try_from(fixture: ItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(CatalogItem {
            id: fixture.id,
            name: fixture.name,
            price: Money::from_minor(minor_units, currency),
            barcode: fixture.barcode,
            category: fixture.category,
            in_stock: fixture.in_stock,
        })
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal with at most two decimal
/// places, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FixtureError::NegativePrice(s.to_string()));
    }

    // Whole minor units only; "2.999" is not a price.
    if amount.normalize().scale() > 2 {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_accepts_catalog_format() -> Result<(), FixtureError> {
        let (minor, currency) = parse_price("4.99 USD")?;

        assert_eq!(minor, 499);
        assert_eq!(currency, USD);

        Ok(())
    }

    #[test]
    fn parse_price_accepts_whole_amounts_and_zero() -> Result<(), FixtureError> {
        assert_eq!(parse_price("3 EUR")?, (300, EUR));
        assert_eq!(parse_price("0.00 GBP")?, (0, GBP));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        assert!(matches!(
            parse_price("2.99USD"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("2.99 USD extra"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("two USD"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_sub_cent_amounts() -> Result<(), FixtureError> {
        for price in ["2.999 USD", "1.005 USD", "0.001 GBP"] {
            assert!(
                matches!(parse_price(price), Err(FixtureError::InvalidPrice(_))),
                "{price}"
            );
        }

        assert_eq!(parse_price("2.990 USD")?, (299, USD));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_negative_amount() {
        let result = parse_price("-1.00 USD");

        assert!(matches!(result, Err(FixtureError::NegativePrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn item_fixture_defaults_to_in_stock() -> Result<(), FixtureError> {
        let fixture: ItemFixture = serde_norway::from_str(
            "{ id: \"9\", name: Oats, price: 1.25 USD, barcode: \"999\", category: Pantry }",
        )?;

        let item = CatalogItem::try_from(fixture)?;

        assert!(item.in_stock);
        assert_eq!(item.barcode.as_str(), "999");
        assert_eq!(item.price, Money::from_minor(125, USD));

        Ok(())
    }
}
