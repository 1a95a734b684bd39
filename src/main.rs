//! Walkout simulator entry point

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use walkout::{
    config::Config,
    fixtures::{grocery_catalog, load_catalog},
    observability::init_logging,
    receipt::write_catalog,
    session::{Flow, Session},
    store::CartStore,
};

/// Reads shopper commands from stdin until `quit` or end of input.
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| e.exit());

    init_logging(&config.logging)?;

    let catalog = match config.catalog.as_deref() {
        Some(path) => load_catalog(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => grocery_catalog().context("failed to load the bundled catalog")?,
    };

    info!(
        items = catalog.len(),
        currency = catalog.currency().iso_alpha_code,
        "catalog loaded"
    );

    let mut session =
        Session::new(CartStore::new(catalog)).with_reply_delay(config.assistant_delay());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    write_catalog(&mut out, session.store().catalog())?;
    session.greet(&mut out)?;

    write!(out, "> ")?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        if session.execute_line(&line?, &mut out)? == Flow::Quit {
            break;
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    let summary = session.store().summary();

    if !summary.can_exit {
        warn!(
            unpaid_lines = summary.unpaid_lines,
            unpaid_total = %summary.unpaid_total,
            "session ended with unpaid items"
        );
    }

    Ok(())
}
