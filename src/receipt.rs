//! Receipt
//!
//! Console tables for the cart (the exit gate's cart summary) and for the
//! items still available to scan.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{CartLine, PaymentStatus},
    catalog::Catalog,
    store::{CartStore, CartSummary},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Writes the cart lines and the cart summary.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, store: &CartStore) -> Result<(), ReceiptError> {
    let summary = store.summary();

    if store.lines().is_empty() {
        writeln!(out, "No items in cart")?;

        return write_summary(&mut out, &summary);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Barcode", "Qty", "Unit Price", "Total", "Status"]);

    for (idx, line) in store.lines().iter().enumerate() {
        builder.push_record(line_record(idx, line));
    }

    let mut table = builder.build();

    table.with(theme());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    for (idx, line) in store.lines().iter().enumerate() {
        table.modify((idx + 1, 6), status_color(line.status()));
    }

    writeln!(out, "{table}")?;

    write_summary(&mut out, &summary)
}

/// Writes the items that can still be scanned.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_catalog(mut out: impl io::Write, catalog: &Catalog) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Category", "Barcode", "Price"]);

    for item in catalog.in_stock() {
        builder.push_record([
            item.name.clone(),
            item.category.clone(),
            item.barcode.to_string(),
            item.price.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(theme());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn line_record(idx: usize, line: &CartLine) -> [String; 7] {
    [
        format!("#{:<3}", idx + 1),
        line.name().to_string(),
        line.barcode().to_string(),
        line.quantity().to_string(),
        line.unit_price().to_string(),
        line.total().to_string(),
        status_label(line.status()).to_string(),
    ]
}

fn write_summary(out: &mut impl io::Write, summary: &CartSummary) -> Result<(), ReceiptError> {
    let exit = if summary.can_exit {
        "ready to exit"
    } else {
        "payment required"
    };

    writeln!(out, " Total:   {}", summary.total)?;
    writeln!(out, " Unpaid:  {}", summary.unpaid_total)?;
    writeln!(out, " Paid:    {} of {}", summary.paid_lines, summary.lines)?;
    writeln!(out, " Exit:    {exit}")?;

    Ok(())
}

fn theme() -> Theme {
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    theme
}

fn status_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Unpaid => "Unpaid",
        PaymentStatus::Paid => "Paid",
    }
}

fn status_color(status: PaymentStatus) -> Color {
    match status {
        PaymentStatus::Unpaid => Color::new("\x1b[33m", "\x1b[0m"),
        PaymentStatus::Paid => Color::new("\x1b[32m", "\x1b[0m"),
    }
}
