//! Typed client for the `business/*` endpoints.
//!
//! Covers the invoice and payout flows:
//! - list available tariffs
//! - create invoices and poll their status
//! - create payouts, look them up, and check destination wallets
//!
//! Every call signs its body with the shop's secret key and unwraps the
//! processor's `data`/`error` envelope into an [`Envelope`].

mod client;
mod config;
mod envelope;
mod types;

pub use client::Client;
pub use config::{Config, InvoiceDefaults};
pub use envelope::Envelope;
pub use types::{
    CARD_PAYOFF, CreatedInvoice, CreatedPayout, InvoiceRequest, PaymentMethod, PayoutRequest,
    Subtract,
};
