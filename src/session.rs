//! Shopping session
//!
//! A line-oriented front end over a [`CartStore`]. Each input line is parsed
//! into a [`Command`], applied to the store, and answered with an advisory
//! [`Notice`] or a table. Nothing a shopper types can end the session except
//! `quit`.

use std::{fmt, io, thread, time::Duration};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::warn;

use crate::{
    assistant::{self, Reply},
    cart::CartError,
    receipt::{ReceiptError, write_cart, write_catalog},
    store::{CartStore, ExitDecision, PaymentError, QuantityUpdate, ScanError},
};

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A table could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,

    /// The shopper quit
    Quit,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The action went through
    Info,

    /// The action was refused; state is unchanged
    Warning,
}

/// An advisory notification shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub severity: Severity,

    /// Short title
    pub title: &'static str,

    /// Detail
    pub message: String,
}

impl Notice {
    fn info(title: &'static str, message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Info,
            title,
            message: message.into(),
        }
    }

    fn warning(title: &'static str, message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Warning,
            title,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.severity {
            Severity::Info => "✓",
            Severity::Warning => "!",
        };

        write!(f, "{marker} {}: {}", self.title, self.message)
    }
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

/// A shopper command.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Scan a barcode into the cart
    Scan {
        /// Barcode to scan
        barcode: Option<String>,
    },

    /// Remove an item from the cart
    Remove {
        /// Barcode of the cart line
        barcode: String,
    },

    /// Set the quantity of a cart line (0 removes it)
    Qty {
        /// Barcode of the cart line
        barcode: String,

        /// New quantity
        quantity: u32,
    },

    /// Pay for every unpaid item
    Pay,

    /// Show the cart
    Cart,

    /// Show the items available to scan
    Catalog,

    /// Walk through the exit gate
    Exit,

    /// Ask the shopping assistant a question
    Ask {
        /// Your question
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Leave the session
    Quit,
}

impl Command {
    /// Parse an input line. Blank lines parse to `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`clap::Error`] for unknown commands or bad arguments,
    /// including requests for help.
    pub fn parse_line(line: &str) -> Result<Option<Self>, clap::Error> {
        let mut words = line.split_whitespace().peekable();

        if words.peek().is_none() {
            return Ok(None);
        }

        CommandLine::try_parse_from(words).map(|parsed| Some(parsed.command))
    }
}

/// An interactive shopping session.
#[derive(Debug)]
pub struct Session {
    store: CartStore,
    reply_delay: Duration,
}

impl Session {
    /// Start a session over a store.
    pub fn new(store: CartStore) -> Self {
        Session {
            store,
            reply_delay: Duration::ZERO,
        }
    }

    /// Pause this long before each assistant reply.
    #[must_use]
    pub fn with_reply_delay(mut self, reply_delay: Duration) -> Self {
        self.reply_delay = reply_delay;
        self
    }

    /// The store behind this session.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Write the assistant's opening message.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn greet(&self, mut out: impl io::Write) -> Result<(), SessionError> {
        write_reply(&mut out, &assistant::greeting())
    }

    /// Parse and run one input line.
    ///
    /// Parse failures and help requests are written to `out` and do not end
    /// the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn execute_line(
        &mut self,
        line: &str,
        mut out: impl io::Write,
    ) -> Result<Flow, SessionError> {
        match Command::parse_line(line) {
            Ok(Some(command)) => self.execute(command, out),
            Ok(None) => Ok(Flow::Continue),
            Err(error) => {
                write!(out, "{error}")?;

                Ok(Flow::Continue)
            }
        }
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn execute(
        &mut self,
        command: Command,
        mut out: impl io::Write,
    ) -> Result<Flow, SessionError> {
        let notice = match command {
            Command::Scan { barcode } => self.scan(barcode.as_deref().unwrap_or_default()),
            Command::Remove { barcode } => self.remove(&barcode),
            Command::Qty { barcode, quantity } => self.update_quantity(&barcode, quantity),
            Command::Pay => self.pay(),
            Command::Exit => self.exit(),
            Command::Cart => {
                write_cart(&mut out, &self.store)?;

                return Ok(Flow::Continue);
            }
            Command::Catalog => {
                write_catalog(&mut out, self.store.catalog())?;

                return Ok(Flow::Continue);
            }
            Command::Ask { question } => {
                self.ask(&question.join(" "), &mut out)?;

                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        writeln!(out, "{notice}")?;

        Ok(Flow::Continue)
    }

    fn scan(&mut self, barcode: &str) -> Notice {
        match self.store.scan(barcode) {
            Ok(item) => Notice::info("Item Added", format!("{} added to your cart", item.name)),
            Err(ScanError::EmptyBarcode) => {
                Notice::warning("Invalid Scan", "Please enter or scan a barcode")
            }
            Err(error @ ScanError::Unavailable(_)) => {
                warn!(%error, "scan rejected");

                Notice::warning(
                    "Item Not Found",
                    "This barcode is not in our inventory or the item is out of stock",
                )
            }
            Err(ScanError::Cart(error)) => cart_rejected(&error),
        }
    }

    fn remove(&mut self, barcode: &str) -> Notice {
        match self.store.remove_from_cart(barcode) {
            Ok(Some(line)) => {
                Notice::info("Item Removed", format!("{} removed from your cart", line.name()))
            }
            Ok(None) => not_in_cart(barcode),
            Err(error) => cart_rejected(&error),
        }
    }

    fn update_quantity(&mut self, barcode: &str, quantity: u32) -> Notice {
        match self.store.update_quantity(barcode, quantity) {
            Ok(QuantityUpdate::Updated(quantity)) => {
                let name = self.store.line(barcode).map_or(barcode, |line| line.name());

                Notice::info("Quantity Updated", format!("{name} × {quantity}"))
            }
            Ok(QuantityUpdate::Removed(line)) => {
                Notice::info("Item Removed", format!("{} removed from your cart", line.name()))
            }
            Ok(QuantityUpdate::Missing) => not_in_cart(barcode),
            Err(error) => cart_rejected(&error),
        }
    }

    fn pay(&mut self) -> Notice {
        match self.store.pay_unpaid() {
            Ok(payment) => Notice::info(
                "Payment Successful",
                format!("Paid {} for {} item(s)", payment.amount(), payment.len()),
            ),
            Err(PaymentError::NothingToPay) => Notice::warning(
                "No Items to Pay",
                "All items in your cart are already paid for",
            ),
        }
    }

    fn exit(&self) -> Notice {
        match self.store.attempt_exit() {
            ExitDecision::Approved => Notice::info(
                "Exit Approved",
                "Thank you for shopping with us! Have a great day!",
            ),
            ExitDecision::Denied { unpaid_lines } => Notice::warning(
                "Exit Denied",
                format!(
                    "You have {unpaid_lines} unpaid item(s). Please complete payment before exiting."
                ),
            ),
        }
    }

    fn ask(&self, question: &str, out: &mut impl io::Write) -> Result<(), SessionError> {
        let Some(reply) = assistant::reply(question, &self.store.summary()) else {
            return Ok(());
        };

        if !self.reply_delay.is_zero() {
            thread::sleep(self.reply_delay);
        }

        write_reply(out, &reply)
    }
}

fn write_reply(out: &mut impl io::Write, reply: &Reply) -> Result<(), SessionError> {
    writeln!(out, "assistant: {}", reply.text)?;

    for suggestion in &reply.suggestions {
        writeln!(out, "  - {suggestion}")?;
    }

    Ok(())
}

fn not_in_cart(barcode: &str) -> Notice {
    Notice::warning("Not In Cart", format!("No item with barcode {barcode} in your cart"))
}

fn cart_rejected(error: &CartError) -> Notice {
    let title = match error {
        CartError::LinePaid(_) => "Cart Locked",
        CartError::CurrencyMismatch(..) => "Item Not Accepted",
    };

    Notice::warning(title, error.to_string())
}
