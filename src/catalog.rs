//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::barcode::Barcode;

new_key_type! {
    /// Catalog Key
    pub struct CatalogKey;
}

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// An item has a blank barcode, so it could never be scanned.
    #[error("item {0} has no barcode")]
    EmptyBarcode(String),

    /// Two catalog entries share a barcode.
    #[error("barcode {0} is already in the catalog")]
    DuplicateBarcode(Barcode),

    /// An item's price currency differs from the catalog currency (barcode, item currency, catalog currency).
    #[error("item {0} is priced in {1}, but the catalog uses {2}")]
    CurrencyMismatch(Barcode, &'static str, &'static str),
}

/// A purchasable item
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Unique barcode
    pub barcode: Barcode,

    /// Category label
    pub category: String,

    /// Whether the item can still be scanned
    pub in_stock: bool,
}

/// Fixed reference list of purchasable items keyed by barcode.
///
/// Items keep their seed order. The only mutable state is the stock flag, which
/// only ever moves from in stock to out of stock.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: SlotMap<CatalogKey, CatalogItem>,
    barcodes: FxHashMap<Barcode, CatalogKey>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            items: SlotMap::with_key(),
            barcodes: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from a list of items.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a barcode is repeated or an item is priced
    /// in a different currency.
    pub fn with_items(
        items: impl IntoIterator<Item = CatalogItem>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new(currency);

        for item in items {
            catalog.insert(item)?;
        }

        Ok(catalog)
    }

    /// Add an item to the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyBarcode`]: the barcode is blank.
    /// - [`CatalogError::DuplicateBarcode`]: the barcode is already catalogued.
    /// - [`CatalogError::CurrencyMismatch`]: the item is not priced in the catalog currency.
    pub fn insert(&mut self, item: CatalogItem) -> Result<CatalogKey, CatalogError> {
        if item.barcode.is_empty() {
            return Err(CatalogError::EmptyBarcode(item.id));
        }

        let item_currency = item.price.currency();

        if item_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                item.barcode,
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.barcodes.contains_key(&item.barcode) {
            return Err(CatalogError::DuplicateBarcode(item.barcode));
        }

        let barcode = item.barcode.clone();
        let key = self.items.insert(item);

        self.barcodes.insert(barcode, key);

        Ok(key)
    }

    /// Look up an item by barcode, regardless of stock.
    pub fn get(&self, barcode: &str) -> Option<&CatalogItem> {
        self.barcodes
            .get(barcode)
            .and_then(|key| self.items.get(*key))
    }

    /// Look up an item by barcode, only if it can still be scanned.
    pub fn find_in_stock(&self, barcode: &str) -> Option<&CatalogItem> {
        self.get(barcode).filter(|item| item.in_stock)
    }

    /// Mark an item as permanently unavailable.
    ///
    /// Returns `true` if the item was in stock before the call.
    pub fn mark_out_of_stock(&mut self, barcode: &str) -> bool {
        let Some(item) = self
            .barcodes
            .get(barcode)
            .and_then(|key| self.items.get_mut(*key))
        else {
            return false;
        };

        std::mem::replace(&mut item.in_stock, false)
    }

    /// Iterate over all items in seed order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }

    /// Iterate over the items that can still be scanned.
    pub fn in_stock(&self) -> impl Iterator<Item = &CatalogItem> {
        self.iter().filter(|item| item.in_stock)
    }

    /// Get the catalog currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get the number of catalogued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
