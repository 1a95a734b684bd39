//! Cart store properties exercised over every catalog item and a range of
//! call sequences.

use rusty_money::Money;
use testresult::TestResult;

use walkout::prelude::*;

fn store() -> Result<CartStore, FixtureError> {
    Ok(CartStore::new(grocery_catalog()?))
}

fn barcodes(store: &CartStore) -> Vec<Barcode> {
    store
        .catalog()
        .iter()
        .map(|item| item.barcode.clone())
        .collect()
}

fn gross_total(store: &CartStore) -> i64 {
    store
        .lines()
        .iter()
        .map(|line| line.unit_price().to_minor_units() * i64::from(line.quantity()))
        .sum()
}

#[test]
fn repeated_adds_keep_one_line_per_barcode() -> TestResult {
    for calls in 1..=12_u32 {
        let mut store = store()?;
        let item = store
            .catalog()
            .get("5678901234567")
            .cloned()
            .ok_or("spinach missing")?;

        for _ in 0..calls {
            store.add_to_cart(&item)?;
        }

        assert_eq!(store.lines().len(), 1);
        assert_eq!(
            store.line("5678901234567").map(CartLine::quantity),
            Some(calls)
        );
    }

    Ok(())
}

#[test]
fn total_is_sum_of_lines_and_payment_does_not_change_it() -> TestResult {
    let mut store = store()?;
    let barcodes = barcodes(&store);

    for (round, barcode) in barcodes.iter().enumerate() {
        for _ in 0..=round {
            store.scan(barcode)?;
        }
    }

    let before = store.total_price();

    assert_eq!(before.to_minor_units(), gross_total(&store));

    for barcode in barcodes.iter().step_by(2) {
        store.pay_for_items([barcode.as_str()]);

        assert_eq!(store.total_price(), before);
    }

    store.pay_unpaid()?;

    assert_eq!(store.total_price(), before);

    Ok(())
}

#[test]
fn payment_only_touches_requested_lines() -> TestResult {
    let all = barcodes(&store()?);

    for split in 0..=all.len() {
        let mut store = store()?;

        for barcode in &all {
            store.scan(barcode)?;
        }

        let (paid, unpaid) = all.split_at(split);

        store.pay_for_items(paid.iter().map(Barcode::as_str));

        for barcode in paid {
            assert!(store.line(barcode).is_some_and(CartLine::is_paid), "{barcode}");
        }

        for barcode in unpaid {
            assert!(store.line(barcode).is_some_and(|line| !line.is_paid()), "{barcode}");
        }
    }

    Ok(())
}

#[test]
fn exit_eligibility_matches_unpaid_items() -> TestResult {
    let mut store = store()?;

    assert!(store.can_exit_store());
    assert_eq!(store.unpaid_items().count(), 0);

    for barcode in barcodes(&store) {
        store.scan(&barcode)?;

        assert_eq!(store.can_exit_store(), store.unpaid_items().next().is_none());

        store.pay_for_items([barcode]);

        assert_eq!(store.can_exit_store(), store.unpaid_items().next().is_none());
    }

    assert!(store.can_exit_store());

    Ok(())
}

#[test]
fn zero_quantity_update_matches_removal() -> TestResult {
    let all = barcodes(&store()?);

    // Every prior state: absent, unpaid at several quantities, and paid.
    for target in &all {
        for quantity in 0..=3_u32 {
            for pay in [false, true] {
                let mut via_update = store()?;

                for barcode in &all {
                    via_update.scan(barcode)?;
                }

                if quantity == 0 {
                    via_update.remove_from_cart(target)?;
                } else {
                    via_update.update_quantity(target, quantity)?;
                }

                if pay {
                    via_update.pay_for_items([target.as_str()]);
                }

                let mut via_remove = via_update.clone();

                let updated = via_update.update_quantity(target, 0);
                let removed = via_remove.remove_from_cart(target);

                assert_eq!(updated.is_ok(), removed.is_ok());
                assert_eq!(via_update.lines(), via_remove.lines());
            }
        }
    }

    Ok(())
}

#[test]
fn unpaid_items_preserve_cart_order() -> TestResult {
    let mut store = store()?;
    let all = barcodes(&store);

    for barcode in all.iter().rev() {
        store.scan(barcode)?;
    }

    store.pay_for_items(all.iter().skip(1).step_by(2).map(Barcode::as_str));

    let expected: Vec<&Barcode> = store
        .lines()
        .iter()
        .filter(|line| !line.is_paid())
        .map(CartLine::barcode)
        .collect();
    let unpaid: Vec<&Barcode> = store.unpaid_items().map(CartLine::barcode).collect();

    assert_eq!(unpaid, expected);
    assert_eq!(
        store.unpaid_total(),
        Money::from_minor(
            store.unpaid_items().map(|line| line.total().to_minor_units()).sum(),
            store.currency()
        )
    );

    Ok(())
}
