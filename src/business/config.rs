use secrecy::{ExposeSecret as _, SecretString};
use url::Url;

use crate::LAVA_API;
use crate::Result;
use crate::auth::Credentials;
use crate::business::types::PaymentMethod;
use crate::error::Error;

const DEFAULT_EXPIRE_MINUTES: u32 = 10;

/// Invoice fields shared by every invoice a client creates.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvoiceDefaults {
    pub success_url: Option<String>,
    pub fail_url: Option<String>,
    /// Lifetime of the payment link, in minutes.
    pub expire: u32,
    pub comment: Option<String>,
    pub include_service: Vec<PaymentMethod>,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            success_url: None,
            fail_url: None,
            expire: DEFAULT_EXPIRE_MINUTES,
            comment: None,
            include_service: vec![PaymentMethod::Card, PaymentMethod::Sbp, PaymentMethod::Qiwi],
        }
    }
}

impl InvoiceDefaults {
    #[must_use]
    pub fn with_success_url<S: Into<String>>(mut self, url: S) -> Self {
        self.success_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_fail_url<S: Into<String>>(mut self, url: S) -> Self {
        self.fail_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn with_expire(mut self, minutes: u32) -> Self {
        self.expire = minutes;
        self
    }

    #[must_use]
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_include_service(mut self, methods: Vec<PaymentMethod>) -> Self {
        self.include_service = methods;
        self
    }
}

/// Business API client configuration.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Config {
    pub host: Url,
    pub credentials: Credentials,
    pub invoice: InvoiceDefaults,
}

impl Config {
    /// Configuration for the production endpoint with default invoice fields.
    pub fn production(credentials: Credentials) -> Result<Self> {
        Self::new(Url::parse(LAVA_API)?, credentials, InvoiceDefaults::default())
    }

    /// Builds a configuration from plain strings, e.g. values read from a
    /// bot's settings file.
    pub fn from_raw(
        host: &str,
        shop_id: &str,
        secret_key: SecretString,
        invoice: InvoiceDefaults,
    ) -> Result<Self> {
        let host = Url::parse(host.trim())?;

        Self::new(host, Credentials::new(shop_id.trim(), secret_key), invoice)
    }

    pub fn new(host: Url, credentials: Credentials, invoice: InvoiceDefaults) -> Result<Self> {
        if credentials.shop_id().is_empty() {
            return Err(Error::validation("shop id must not be empty"));
        }
        if credentials.secret_key().expose_secret().is_empty() {
            return Err(Error::validation("secret key must not be empty"));
        }
        if invoice.include_service.is_empty() {
            return Err(Error::validation(
                "invoice defaults must enable at least one payment method",
            ));
        }

        Ok(Self {
            host: normalize_host(host)?,
            credentials,
            invoice,
        })
    }
}

/// Endpoint paths are joined onto the host, so its path must end in `/`.
fn normalize_host(mut host: Url) -> Result<Url> {
    if host.cannot_be_a_base() {
        return Err(Error::validation(format!("host {host} cannot be a base URL")));
    }
    if !host.path().ends_with('/') {
        let path = format!("{}/", host.path());
        host.set_path(&path);
    }
    Ok(host)
}
