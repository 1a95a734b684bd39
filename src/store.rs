//! Cart Store
//!
//! [`CartStore`] owns the shopper's cart and the catalog it was scanned from.
//! Every mutation goes through its operations; views only ever see shared
//! references.

use std::borrow::Borrow;

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    barcode::Barcode,
    cart::{CartError, CartLine},
    catalog::{Catalog, CatalogItem},
    pricing::total_price,
};

/// Errors reported by the scanner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Nothing was scanned or entered.
    #[error("no barcode was scanned")]
    EmptyBarcode,

    /// The barcode is not in the catalog, or the item is out of stock.
    #[error("barcode {0} is not in our inventory or is out of stock")]
    Unavailable(Barcode),

    /// The item could not be added to the cart.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Errors reported when paying for the cart.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaymentError {
    /// Every line in the cart is already paid for.
    #[error("all items in the cart are already paid for")]
    NothingToPay,
}

/// Result of setting a line's quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityUpdate {
    /// The line now holds exactly this many units.
    Updated(u32),

    /// The quantity was zero, so the line was removed.
    Removed(CartLine),

    /// No line has that barcode; nothing changed.
    Missing,
}

/// Lines that moved to paid in a single payment.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    barcodes: SmallVec<[Barcode; 8]>,
    amount: Money<'static, Currency>,
}

impl Payment {
    /// Barcodes of the lines paid by this payment, in cart order.
    pub fn barcodes(&self) -> &[Barcode] {
        &self.barcodes
    }

    /// Value of the newly paid lines.
    pub fn amount(&self) -> Money<'static, Currency> {
        self.amount
    }

    /// Number of lines paid.
    pub fn len(&self) -> usize {
        self.barcodes.len()
    }

    /// Whether the payment settled no lines.
    pub fn is_empty(&self) -> bool {
        self.barcodes.is_empty()
    }
}

/// Outcome of walking up to the exit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    /// Every line is paid.
    Approved,

    /// Payment is still required.
    Denied {
        /// Number of unpaid lines
        unpaid_lines: usize,
    },
}

/// Aggregates derived from the cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary {
    /// Number of lines
    pub lines: usize,

    /// Number of paid lines
    pub paid_lines: usize,

    /// Number of unpaid lines
    pub unpaid_lines: usize,

    /// Gross cart value, paid and unpaid
    pub total: Money<'static, Currency>,

    /// Value of the unpaid lines
    pub unpaid_total: Money<'static, Currency>,

    /// Whether the shopper may leave
    pub can_exit: bool,
}

/// The shopper's cart and the catalog backing it.
#[derive(Debug, Clone)]
pub struct CartStore {
    catalog: Catalog,
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart over the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        CartStore {
            catalog,
            lines: Vec::new(),
        }
    }

    /// The catalog backing this cart.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line for a barcode.
    pub fn line(&self, barcode: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.barcode().as_str() == barcode)
    }

    /// Currency of every amount in the cart.
    pub fn currency(&self) -> &'static Currency {
        self.catalog.currency()
    }

    /// Add one unit of an item, creating its line if needed.
    ///
    /// Returns the line's quantity after the add. A paid line is never reopened
    /// or split: adding more of an already paid item fails instead, so the exit
    /// gate cannot be passed with units that were never paid for.
    ///
    /// # Errors
    ///
    /// - [`CartError::LinePaid`]: the item's line has already been paid for.
    /// - [`CartError::CurrencyMismatch`]: the item is not priced in the cart currency.
    pub fn add_to_cart(&mut self, item: &CatalogItem) -> Result<u32, CartError> {
        let item_currency = item.price.currency();

        if item_currency != self.currency() {
            return Err(CartError::CurrencyMismatch(
                item.barcode.clone(),
                item_currency.iso_alpha_code,
                self.currency().iso_alpha_code,
            ));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.barcode() == &item.barcode)
        {
            let quantity = line.increment()?;

            debug!(barcode = %item.barcode, quantity, "incremented cart line");

            return Ok(quantity);
        }

        self.lines.push(CartLine::new(item.clone()));

        debug!(barcode = %item.barcode, name = %item.name, "added cart line");

        Ok(1)
    }

    /// Scan a barcode and add the matching in-stock item.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// - [`ScanError::EmptyBarcode`]: the input was blank.
    /// - [`ScanError::Unavailable`]: no in-stock catalog item has that barcode.
    /// - [`ScanError::Cart`]: the item's line could not be changed.
    pub fn scan(&mut self, barcode: &str) -> Result<CatalogItem, ScanError> {
        let barcode = Barcode::new(barcode);

        if barcode.is_empty() {
            return Err(ScanError::EmptyBarcode);
        }

        let item = self
            .catalog
            .find_in_stock(&barcode)
            .cloned()
            .ok_or(ScanError::Unavailable(barcode))?;

        self.add_to_cart(&item)?;

        Ok(item)
    }

    /// Remove the line for a barcode.
    ///
    /// Returns the removed line, or `None` if no line has that barcode.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LinePaid`] if the line has been paid for.
    pub fn remove_from_cart(&mut self, barcode: &str) -> Result<Option<CartLine>, CartError> {
        let Some(index) = self.position(barcode) else {
            return Ok(None);
        };

        if let Some(line) = self.lines.get(index) {
            line.ensure_unpaid()?;
        }

        let removed = self.lines.remove(index);

        debug!(barcode = %removed.barcode(), "removed cart line");

        Ok(Some(removed))
    }

    /// Set a line's quantity exactly; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LinePaid`] if the line has been paid for.
    pub fn update_quantity(
        &mut self,
        barcode: &str,
        quantity: u32,
    ) -> Result<QuantityUpdate, CartError> {
        if quantity == 0 {
            return Ok(self
                .remove_from_cart(barcode)?
                .map_or(QuantityUpdate::Missing, QuantityUpdate::Removed));
        }

        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.barcode().as_str() == barcode)
        else {
            return Ok(QuantityUpdate::Missing);
        };

        line.set_quantity(quantity)?;

        debug!(barcode, quantity, "updated cart line quantity");

        Ok(QuantityUpdate::Updated(quantity))
    }

    /// Pay for the lines with the given barcodes.
    ///
    /// Each barcode settles independently: matching lines become paid and
    /// matching catalog items go out of stock. Barcodes without a line still
    /// take the catalog item out of stock. Lines that were already paid are not
    /// part of the returned [`Payment`].
    pub fn pay_for_items<I, B>(&mut self, barcodes: I) -> Payment
    where
        I: IntoIterator<Item = B>,
        B: Borrow<str>,
    {
        let barcodes: Vec<B> = barcodes.into_iter().collect();
        let requested: FxHashSet<&str> = barcodes.iter().map(Borrow::<str>::borrow).collect();

        let mut paid: SmallVec<[Barcode; 8]> = SmallVec::new();

        for line in &mut self.lines {
            if requested.contains(line.barcode().as_str()) && line.mark_paid() {
                paid.push(line.barcode().clone());
            }
        }

        for barcode in &requested {
            if self.catalog.mark_out_of_stock(barcode) {
                debug!(barcode, "catalog item sold");
            }
        }

        let amount = total_price(
            self.lines
                .iter()
                .filter(|line| paid.contains(line.barcode())),
            self.currency(),
        );

        info!(lines = paid.len(), %amount, "payment settled");

        Payment {
            barcodes: paid,
            amount,
        }
    }

    /// Pay for every unpaid line.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NothingToPay`] if there are no unpaid lines.
    pub fn pay_unpaid(&mut self) -> Result<Payment, PaymentError> {
        let unpaid: Vec<Barcode> = self
            .unpaid_items()
            .map(|line| line.barcode().clone())
            .collect();

        if unpaid.is_empty() {
            return Err(PaymentError::NothingToPay);
        }

        Ok(self.pay_for_items(unpaid))
    }

    /// Gross cart value: every line, paid or not.
    pub fn total_price(&self) -> Money<'static, Currency> {
        total_price(&self.lines, self.currency())
    }

    /// Value of the lines still awaiting payment.
    pub fn unpaid_total(&self) -> Money<'static, Currency> {
        total_price(self.unpaid_items(), self.currency())
    }

    /// Lines still awaiting payment, in cart order.
    pub fn unpaid_items(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|line| !line.is_paid())
    }

    /// Whether every line is paid. An empty cart may always exit.
    pub fn can_exit_store(&self) -> bool {
        self.lines.iter().all(CartLine::is_paid)
    }

    /// Check the cart at the exit gate.
    pub fn attempt_exit(&self) -> ExitDecision {
        let unpaid_lines = self.unpaid_items().count();

        let decision = if unpaid_lines == 0 {
            ExitDecision::Approved
        } else {
            ExitDecision::Denied { unpaid_lines }
        };

        info!(?decision, "exit gate check");

        decision
    }

    /// Derived totals and counts.
    pub fn summary(&self) -> CartSummary {
        let unpaid_lines = self.unpaid_items().count();

        CartSummary {
            lines: self.lines.len(),
            paid_lines: self.lines.len() - unpaid_lines,
            unpaid_lines,
            total: self.total_price(),
            unpaid_total: self.unpaid_total(),
            can_exit: unpaid_lines == 0,
        }
    }

    fn position(&self, barcode: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.barcode().as_str() == barcode)
    }
}
