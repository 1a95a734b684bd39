//! Cart lines

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{barcode::Barcode, catalog::CatalogItem, pricing::line_total};

/// Errors raised when editing cart lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The line has been paid for and can no longer change.
    #[error("item {0} has already been paid for")]
    LinePaid(Barcode),

    /// The item is priced in a different currency from the cart (barcode, item currency, cart currency).
    #[error("item {0} is priced in {1}, but the cart uses {2}")]
    CurrencyMismatch(Barcode, &'static str, &'static str),
}

/// Payment state of a cart line.
///
/// Lines start [`PaymentStatus::Unpaid`] and only ever move to
/// [`PaymentStatus::Paid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    /// Awaiting payment
    #[default]
    Unpaid,

    /// Paid; terminal
    Paid,
}

/// One catalog item in the cart, with its quantity and payment state.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    item: CatalogItem,
    quantity: u32,
    status: PaymentStatus,
}

impl CartLine {
    /// Create an unpaid line holding a single unit of the item.
    pub fn new(item: CatalogItem) -> Self {
        CartLine {
            item,
            quantity: 1,
            status: PaymentStatus::Unpaid,
        }
    }

    /// The catalog item snapshot taken when the line was created.
    ///
    /// The snapshot is not updated afterwards, so its `in_stock` flag is stale
    /// once the item is paid for. Ask the store's [`Catalog`](crate::catalog::Catalog)
    /// for current stock.
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// The line's barcode.
    pub fn barcode(&self) -> &Barcode {
        &self.item.barcode
    }

    /// The item's display name.
    pub fn name(&self) -> &str {
        &self.item.name
    }

    /// Price of a single unit.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.item.price
    }

    /// Number of units; always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Current payment state.
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Whether the line has been paid for.
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// `unit_price × quantity`.
    pub fn total(&self) -> Money<'static, Currency> {
        Money::from_minor(line_total(self), self.item.price.currency())
    }

    /// Add one unit, returning the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LinePaid`] if the line has been paid for.
    pub(crate) fn increment(&mut self) -> Result<u32, CartError> {
        self.ensure_unpaid()?;
        self.quantity = self.quantity.saturating_add(1);

        Ok(self.quantity)
    }

    /// Set the quantity exactly. Callers route zero to removal.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LinePaid`] if the line has been paid for.
    pub(crate) fn set_quantity(&mut self, quantity: u32) -> Result<(), CartError> {
        self.ensure_unpaid()?;
        self.quantity = quantity.max(1);

        Ok(())
    }

    /// Move the line to [`PaymentStatus::Paid`].
    ///
    /// Returns `true` if this call made the transition.
    pub(crate) fn mark_paid(&mut self) -> bool {
        let was_unpaid = self.status == PaymentStatus::Unpaid;
        self.status = PaymentStatus::Paid;

        was_unpaid
    }

    /// Guard for edits.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LinePaid`] if the line has been paid for.
    pub(crate) fn ensure_unpaid(&self) -> Result<(), CartError> {
        if self.is_paid() {
            return Err(CartError::LinePaid(self.item.barcode.clone()));
        }

        Ok(())
    }
}
