//! Fixtures

use std::{fs, path::Path};

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, CatalogItem},
    fixtures::catalog::{CatalogFixture, parse_price},
};

pub mod catalog;

/// The bundled grocery catalog.
pub const GROCERY: &str = include_str!("../../fixtures/catalog/grocery.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Prices must not be negative
    #[error("Negative price: {0}")]
    NegativePrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The fixture defines no items, so the catalog currency is unknown
    #[error("Catalog fixture has no items; currency unknown")]
    EmptyCatalog,

    /// Catalog construction error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Build the bundled grocery catalog.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the bundled fixture fails to parse.
pub fn grocery_catalog() -> Result<Catalog, FixtureError> {
    parse_catalog(GROCERY)
}

/// Load a catalog from a YAML fixture file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the items do
/// not form a valid catalog.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog(&contents)
}

/// Parse a catalog from YAML fixture contents.
///
/// The currency of the first item becomes the catalog currency.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a price is invalid, the fixture
/// is empty, or the items do not form a valid catalog.
pub fn parse_catalog(contents: &str) -> Result<Catalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;

    let first = fixture.items.first().ok_or(FixtureError::EmptyCatalog)?;
    let (_minor_units, currency) = parse_price(&first.price)?;

    let items = fixture
        .items
        .into_iter()
        .map(CatalogItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::with_items(items, currency)?)
}
