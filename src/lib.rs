//! Client for the Lava business payments API.
//!
//! Requests are JSON bodies signed with HMAC-SHA256 under the shop's secret
//! key (see [`auth`]). Responses come back wrapped in a `data`/`error`
//! envelope, which [`business::Client`] unwraps into [`business::Envelope`]
//! values: remote rejections are returned as data, not as [`Error`]s.
//!
//! ```no_run
//! use lava_client_sdk::auth::Credentials;
//! use lava_client_sdk::business::{Client, Config, Envelope, InvoiceRequest};
//! use rust_decimal::Decimal;
//! use secrecy::SecretString;
//!
//! # async fn run() -> lava_client_sdk::Result<()> {
//! let credentials = Credentials::new("shop-id", SecretString::from("secret-key"));
//! let client = Client::new(Config::production(credentials)?);
//!
//! let invoice = client
//!     .create_invoice(&InvoiceRequest::new(Decimal::from(100)))
//!     .await?;
//! if let Envelope::Data(created) = invoice {
//!     let status = client.invoice_status(&created.order_id).await?;
//!     println!("{} -> {status:?}", created.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod business;
pub mod error;
mod serde_helpers;
pub mod types;

use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Request};
use serde_json::Value;

use crate::error::{Error, Kind};

pub type Result<T> = std::result::Result<T, Error>;

/// Production endpoint of the business API.
pub const LAVA_API: &str = "https://api.lava.ru/";

/// Sends `request` with `headers` and returns the decoded JSON body.
///
/// Failure is signalled by body shape, so a non-2xx response is only an error
/// when its body is not a `data`/`error` envelope.
async fn request(
    client: &ReqwestClient,
    mut request: Request,
    headers: HeaderMap,
) -> Result<Value> {
    let method = request.method().clone();
    let path = request.url().path().to_owned();

    *request.headers_mut() = headers;

    let response = client.execute(request).await?;
    let status_code = response.status();
    let text = response.text().await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(%method, %path, status = %status_code, "business API response");

    match serde_json::from_str::<Value>(&text) {
        Ok(value) if status_code.is_success() || is_envelope(&value) => Ok(value),
        Err(e) if status_code.is_success() => Err(Error::with_source(Kind::Internal, e)),
        _ => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                status = %status_code,
                method = %method,
                path = %path,
                message = %text,
                "business API request failed"
            );

            Err(Error::status(status_code, method, path, text))
        }
    }
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("data") || object.contains_key("error"))
}
