//! End-to-end walk-out scenarios.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use walkout::prelude::*;

const MILK: &str = "2345678901234";
const BREAD: &str = "3456789012345";

#[test]
fn milk_twice_then_pay_then_exit() -> TestResult {
    let mut store = CartStore::new(grocery_catalog()?);
    let milk = store.catalog().get(MILK).cloned().ok_or("milk missing")?;

    assert!(store.lines().is_empty());

    store.add_to_cart(&milk)?;

    let line = store.line(MILK).ok_or("milk line missing")?;
    assert_eq!((line.quantity(), line.is_paid()), (1, false));

    store.add_to_cart(&milk)?;

    let line = store.line(MILK).ok_or("milk line missing")?;
    assert_eq!((line.quantity(), line.is_paid()), (2, false));

    store.pay_for_items([MILK]);

    assert_eq!(store.lines().len(), 1);

    let line = store.line(MILK).ok_or("milk line missing")?;
    assert_eq!((line.quantity(), line.is_paid()), (2, true));

    assert!(store.can_exit_store());
    assert_eq!(store.attempt_exit(), ExitDecision::Approved);

    Ok(())
}

#[test]
fn unpaid_bread_blocks_exit() -> TestResult {
    let mut store = CartStore::new(grocery_catalog()?);

    store.scan(MILK)?;
    store.update_quantity(MILK, 2)?;
    store.pay_for_items([MILK]);
    store.scan(BREAD)?;

    assert_eq!(store.total_price(), Money::from_minor(1197, USD));

    let unpaid: Vec<&str> = store.unpaid_items().map(CartLine::name).collect();
    assert_eq!(unpaid, ["Sourdough Bread"]);

    assert!(!store.can_exit_store());
    assert_eq!(
        store.attempt_exit(),
        ExitDecision::Denied { unpaid_lines: 1 }
    );

    Ok(())
}

#[test]
fn sold_items_cannot_be_scanned_again() -> TestResult {
    let mut store = CartStore::new(grocery_catalog()?);

    store.scan(BREAD)?;
    store.pay_unpaid()?;

    assert_eq!(
        store.scan(BREAD),
        Err(ScanError::Unavailable(Barcode::from(BREAD)))
    );
    assert_eq!(store.catalog().in_stock().count(), 5);
    assert_eq!(store.line(BREAD).map(CartLine::quantity), Some(1));

    Ok(())
}

#[test]
fn scripted_session() -> TestResult {
    let mut session = Session::new(CartStore::new(grocery_catalog()?));
    let mut out = Vec::new();

    for line in [
        "scan 2345678901234",
        "scan 2345678901234",
        "scan 3456789012345",
        "qty 3456789012345 0",
        "exit",
        "pay",
        "cart",
        "exit",
    ] {
        assert_eq!(session.execute_line(line, &mut out)?, Flow::Continue);
    }

    assert_eq!(session.execute_line("quit", &mut out)?, Flow::Quit);

    let transcript = String::from_utf8(out)?;

    assert!(transcript.contains("Exit Denied"), "{transcript}");
    assert!(transcript.contains("Paid $6.98 for 1 item(s)"), "{transcript}");
    assert!(transcript.contains("Exit Approved"), "{transcript}");
    assert!(session.store().can_exit_store());

    Ok(())
}
