//! Request signing.
//!
//! Every call to the business API carries a `Signature` header holding the
//! lowercase hex HMAC-SHA256 of the exact request body, keyed with the shop's
//! secret key. The processor recomputes it over the bytes it received, so the
//! bytes that are signed must be the bytes that are sent.

use std::iter;

use hmac::{Hmac, Mac as _};
use rand::Rng as _;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;
use sha2::Sha256;

use crate::Result;
use crate::error::Error;
use crate::types::{ORDER_ID_LEN, OrderId};

type HmacSha256 = Hmac<Sha256>;

/// Name of the `Signature` header.
///
/// Kept lowercase because `HeaderName::from_static` only accepts lowercase
/// names; header names are case-insensitive on the wire.
pub const SIGNATURE: &str = "signature";

const APPLICATION_JSON: &str = "application/json";
const ORDER_ID_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Shop identifier and secret key issued by the processor.
#[derive(Clone, Debug)]
pub struct Credentials {
    shop_id: String,
    secret_key: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new<S: Into<String>>(shop_id: S, secret_key: SecretString) -> Self {
        Self {
            shop_id: shop_id.into(),
            secret_key,
        }
    }

    #[must_use]
    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    #[must_use]
    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }
}

/// Serializes `payload` to compact JSON and signs the resulting bytes.
///
/// Keys are emitted in declaration order for structs and insertion order for
/// [`serde_json::Value`] maps.
pub fn sign<T: Serialize + ?Sized>(payload: &T, secret_key: &SecretString) -> Result<String> {
    let body = serde_json::to_vec(payload).map_err(Error::serialization)?;
    sign_body(&body, secret_key)
}

/// Lowercase hex HMAC-SHA256 of `body`.
pub fn sign_body(body: &[u8], secret_key: &SecretString) -> Result<String> {
    let mut mac = new_mac(secret_key)?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// `Signature`, `Accept` and `Content-Type` headers for a request with `body`.
pub fn create_headers(body: &[u8], secret_key: &SecretString) -> Result<HeaderMap> {
    let signature = sign_body(body, secret_key)?;

    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(
        HeaderName::from_static(SIGNATURE),
        HeaderValue::from_str(&signature)?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

    Ok(headers)
}

/// Checks a hex `signature` against `body` in constant time.
///
/// Used for callbacks the processor signs with the same scheme.
#[must_use]
pub fn verify_signature(body: &[u8], signature: &str, secret_key: &SecretString) -> bool {
    let Ok(mut mac) = new_mac(secret_key) else {
        return false;
    };
    mac.update(body);

    // Undecodable input still goes through the comparison.
    let expected = hex::decode(signature.trim()).unwrap_or_else(|_| vec![0_u8; 32]);
    mac.verify_slice(&expected).is_ok()
}

/// Draws a fresh 12 character `[a-z0-9]` order id.
#[must_use]
pub fn generate_order_id() -> OrderId {
    let mut rng = rand::rng();
    let id: String = iter::repeat_with(|| {
        char::from(ORDER_ID_ALPHABET[rng.random_range(0..ORDER_ID_ALPHABET.len())])
    })
    .take(ORDER_ID_LEN)
    .collect();

    OrderId::from_generated(id)
}

fn new_mac(secret_key: &SecretString) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret_key.expose_secret().as_bytes())
        .map_err(|e| Error::validation(format!("invalid secret key: {e}")))
}
