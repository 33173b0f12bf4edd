use reqwest::Client as ReqwestClient;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::Result;
use crate::auth;
use crate::business::types::{
    CARD_PAYOFF, CheckWalletPayload, CreateInvoicePayload, CreatePayoutPayload, CreatedInvoice,
    CreatedPayout, InvoiceRequest, InvoiceStatusPayload, PayoutInfoPayload, PayoutRequest,
    ShopPayload, StatusData, UrlData,
};
use crate::business::{Config, Envelope};
use crate::error::Error;
use crate::types::OrderId;

const AVAILABLE_TARIFFS: &str = "business/invoice/get-available-tariffs";
const CREATE_INVOICE: &str = "business/invoice/create";
const INVOICE_STATUS: &str = "business/invoice/status";
const CREATE_PAYOUT: &str = "business/payoff/create";
const PAYOUT_INFO: &str = "business/payoff/info";
const CHECK_WALLET: &str = "business/payoff/check-wallet";

/// Client for the business API.
///
/// Holds one [`ReqwestClient`] so sequential calls reuse connections.
#[derive(Clone, Debug)]
pub struct Client {
    config: Config,
    client: ReqwestClient,
}

impl Client {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_client(config, ReqwestClient::new())
    }

    /// Uses a caller-built HTTP client, e.g. one with timeouts or a proxy.
    #[must_use]
    pub fn with_client(config: Config, client: ReqwestClient) -> Self {
        Self { config, client }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn shop_id(&self) -> &str {
        self.config.credentials.shop_id()
    }

    /// Tariffs enabled for the shop, returned as the raw response envelope.
    pub async fn available_tariffs(&self) -> Result<Value> {
        let payload = ShopPayload {
            shop_id: self.shop_id(),
        };

        self.post(AVAILABLE_TARIFFS, &payload).await
    }

    /// Creates an invoice and returns its payment link with the order id used.
    pub async fn create_invoice(&self, request: &InvoiceRequest) -> Result<Envelope<CreatedInvoice>> {
        let order_id = request
            .order_id
            .clone()
            .unwrap_or_else(auth::generate_order_id);
        let defaults = &self.config.invoice;
        let include_service = request
            .include_service
            .as_deref()
            .unwrap_or(&defaults.include_service);
        if include_service.is_empty() {
            return Err(Error::validation(
                "invoice must enable at least one payment method",
            ));
        }

        let payload = CreateInvoicePayload {
            shop_id: self.shop_id(),
            sum: request.sum,
            order_id: &order_id,
            success_url: request
                .success_url
                .as_deref()
                .or(defaults.success_url.as_deref()),
            fail_url: request.fail_url.as_deref().or(defaults.fail_url.as_deref()),
            expire: request.expire.unwrap_or(defaults.expire),
            comment: request.comment.as_deref().or(defaults.comment.as_deref()),
            include_service,
        };

        let envelope: Envelope<UrlData> = self.post_envelope(CREATE_INVOICE, &payload).await?;
        Ok(envelope.map(|data| CreatedInvoice {
            url: data.url,
            order_id,
        }))
    }

    /// Status of an invoice, e.g. `created` or `success`.
    pub async fn invoice_status(&self, order_id: &OrderId) -> Result<Envelope<String>> {
        let payload = InvoiceStatusPayload {
            order_id,
            shop_id: self.shop_id(),
        };

        let envelope: Envelope<StatusData> = self.post_envelope(INVOICE_STATUS, &payload).await?;
        Ok(envelope.map(|data| data.status))
    }

    /// Creates a card payout and returns its result link with the order id used.
    pub async fn create_payout(&self, request: &PayoutRequest) -> Result<Envelope<CreatedPayout>> {
        if request.wallet_to.trim().is_empty() {
            return Err(Error::validation("payout destination must not be empty"));
        }

        let order_id = request
            .order_id
            .clone()
            .unwrap_or_else(auth::generate_order_id);
        let payload = CreatePayoutPayload {
            shop_id: self.shop_id(),
            order_id: &order_id,
            amount: request.amount,
            service: CARD_PAYOFF,
            subtract: request.subtract,
            wallet_to: &request.wallet_to,
        };

        let envelope: Envelope<UrlData> = self.post_envelope(CREATE_PAYOUT, &payload).await?;
        Ok(envelope.map(|data| CreatedPayout {
            url: data.url,
            order_id,
        }))
    }

    /// Result link of a payout.
    pub async fn payout_info(&self, order_id: &OrderId) -> Result<Envelope<String>> {
        let payload = PayoutInfoPayload {
            shop_id: self.shop_id(),
            order_id,
        };

        let envelope: Envelope<UrlData> = self.post_envelope(PAYOUT_INFO, &payload).await?;
        Ok(envelope.map(|data| data.url))
    }

    /// Whether the processor accepts `wallet_to` as a card payout destination.
    pub async fn check_wallet(&self, wallet_to: &str) -> Result<Envelope<String>> {
        let payload = CheckWalletPayload {
            service: CARD_PAYOFF,
            shop_id: self.shop_id(),
            wallet_to,
        };

        let envelope: Envelope<StatusData> = self.post_envelope(CHECK_WALLET, &payload).await?;
        Ok(envelope.map(|data| data.status))
    }

    async fn post_envelope<P: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<Envelope<T>> {
        let value = self.post(path, payload).await?;
        let envelope = Envelope::from_value(value)?;

        #[cfg(feature = "tracing")]
        if let Some(message) = envelope.error() {
            tracing::warn!(path, error = message, "business API rejected request");
        }

        Ok(envelope)
    }

    /// Serializes `payload` once; the signed bytes are the body that is sent.
    async fn post<P: Serialize>(&self, path: &str, payload: &P) -> Result<Value> {
        let body = serde_json::to_vec(payload).map_err(Error::serialization)?;
        let headers = auth::create_headers(&body, self.config.credentials.secret_key())?;

        let request = self
            .client
            .request(Method::POST, self.endpoint(path)?)
            .body(body)
            .build()?;

        crate::request(&self.client, request, headers).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.config.host.join(path)?)
    }
}
