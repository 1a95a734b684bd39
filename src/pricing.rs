//! Prices

use rusty_money::{Money, iso::Currency};

use crate::cart::CartLine;

/// Total of a single line in minor units (`unit price × quantity`).
pub fn line_total(line: &CartLine) -> i64 {
    line.unit_price()
        .to_minor_units()
        .saturating_mul(i64::from(line.quantity()))
}

/// Calculates the total price of a list of cart lines.
///
/// Lines are summed in minor units so the result is exact; an empty list
/// totals zero in the given currency.
pub fn total_price<'a>(
    lines: impl IntoIterator<Item = &'a CartLine>,
    currency: &'static Currency,
) -> Money<'static, Currency> {
    let minor_units = lines
        .into_iter()
        .fold(0_i64, |acc, line| acc.saturating_add(line_total(line)));

    Money::from_minor(minor_units, currency)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use crate::{barcode::Barcode, catalog::CatalogItem};

    use super::*;

    fn line(barcode: &str, minor: i64, quantity: u32) -> CartLine {
        let mut line = CartLine::new(CatalogItem {
            id: barcode.to_string(),
            name: barcode.to_string(),
            price: Money::from_minor(minor, USD),
            barcode: Barcode::from(barcode),
            category: "Test".to_string(),
            in_stock: true,
        });

        if quantity > 1 {
            assert!(line.set_quantity(quantity).is_ok(), "fresh line is unpaid");
        }

        line
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(&line("milk", 349, 2)), 698);
    }

    #[test]
    fn test_total_price() {
        let lines = [line("bread", 499, 1), line("milk", 349, 2)];

        assert_eq!(total_price(&lines, USD), Money::from_minor(1197, USD));
    }

    #[test]
    fn test_total_price_empty() {
        let lines: [CartLine; 0] = [];

        assert_eq!(total_price(&lines, USD), Money::from_minor(0, USD));
    }
}
