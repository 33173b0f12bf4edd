//! Creates an invoice and polls its status once.
//!
//! ```sh
//! LAVA_SHOP_ID=... LAVA_SECRET_KEY=... RUST_LOG=info,lava_client_sdk=debug \
//!     cargo run --example invoice --features tracing
//! ```

use std::env;

use lava_client_sdk::LAVA_API;
use lava_client_sdk::business::{Client, Config, Envelope, InvoiceDefaults, InvoiceRequest};
use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let shop_id = env::var("LAVA_SHOP_ID")?;
    let secret_key = SecretString::from(env::var("LAVA_SECRET_KEY")?);
    let defaults = InvoiceDefaults::default().with_comment("Balance top-up");

    let client = Client::new(Config::from_raw(LAVA_API, &shop_id, secret_key, defaults)?);

    let created = match client.create_invoice(&InvoiceRequest::new(Decimal::from(100))).await? {
        Envelope::Data(created) => created,
        Envelope::Error(message) => {
            warn!(%message, "invoice rejected");
            return Ok(());
        }
        other => {
            warn!(?other, "unexpected envelope");
            return Ok(());
        }
    };
    info!(url = %created.url, order_id = %created.order_id, "invoice created");

    match client.invoice_status(&created.order_id).await? {
        Envelope::Data(status) => info!(%status, "invoice status"),
        other => warn!(error = ?other.error(), "status lookup failed"),
    }

    Ok(())
}
