//! Walkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    assistant::{Reply, greeting, reply},
    barcode::Barcode,
    cart::{CartError, CartLine, PaymentStatus},
    catalog::{Catalog, CatalogError, CatalogItem, CatalogKey},
    fixtures::{FixtureError, grocery_catalog, load_catalog},
    receipt::{ReceiptError, write_cart, write_catalog},
    session::{Command, Flow, Notice, Session, SessionError, Severity},
    store::{
        CartStore, CartSummary, ExitDecision, Payment, PaymentError, QuantityUpdate, ScanError,
    },
};
