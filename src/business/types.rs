use bon::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_repr::Serialize_repr;

use crate::types::OrderId;

/// Payout service for bank card destinations.
pub const CARD_PAYOFF: &str = "card_payoff";

/// Payment method a customer may use on the invoice page.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Sbp,
    Qiwi,
}

/// Where the payout commission is taken from.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum Subtract {
    /// Deducted from the payout amount.
    Amount = 0,
    /// Deducted from the shop balance.
    #[default]
    Balance = 1,
}

/// Invoice to create. Unset fields fall back to the client's
/// [`InvoiceDefaults`](crate::business::InvoiceDefaults); an unset `order_id`
/// is generated.
#[non_exhaustive]
#[derive(Clone, Debug, Builder)]
pub struct InvoiceRequest {
    pub sum: Decimal,
    pub order_id: Option<OrderId>,
    #[builder(into)]
    pub success_url: Option<String>,
    #[builder(into)]
    pub fail_url: Option<String>,
    pub expire: Option<u32>,
    #[builder(into)]
    pub comment: Option<String>,
    pub include_service: Option<Vec<PaymentMethod>>,
}

impl InvoiceRequest {
    #[must_use]
    pub fn new(sum: Decimal) -> Self {
        Self::builder().sum(sum).build()
    }
}

/// Payout to a card or wallet. An unset `order_id` is generated.
#[non_exhaustive]
#[derive(Clone, Debug, Builder)]
pub struct PayoutRequest {
    pub amount: Decimal,
    #[builder(into)]
    pub wallet_to: String,
    pub order_id: Option<OrderId>,
    #[builder(default)]
    pub subtract: Subtract,
}

impl PayoutRequest {
    #[must_use]
    pub fn new<S: Into<String>>(amount: Decimal, wallet_to: S) -> Self {
        Self::builder().amount(amount).wallet_to(wallet_to).build()
    }
}

/// Payment link for a newly created invoice.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatedInvoice {
    pub url: String,
    pub order_id: OrderId,
}

/// Result link for a newly created payout.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatedPayout {
    pub url: String,
    pub order_id: OrderId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShopPayload<'a> {
    pub shop_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateInvoicePayload<'a> {
    pub shop_id: &'a str,
    #[serde(serialize_with = "serialize_amount")]
    pub sum: Decimal,
    pub order_id: &'a OrderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_url: Option<&'a str>,
    pub expire: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    pub include_service: &'a [PaymentMethod],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvoiceStatusPayload<'a> {
    pub order_id: &'a OrderId,
    pub shop_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePayoutPayload<'a> {
    pub shop_id: &'a str,
    pub order_id: &'a OrderId,
    #[serde(serialize_with = "serialize_amount")]
    pub amount: Decimal,
    pub service: &'static str,
    pub subtract: Subtract,
    pub wallet_to: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PayoutInfoPayload<'a> {
    pub shop_id: &'a str,
    pub order_id: &'a OrderId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckWalletPayload<'a> {
    pub service: &'static str,
    pub shop_id: &'a str,
    pub wallet_to: &'a str,
}

/// Writes the exact decimal as a JSON number, without trailing zeros.
fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    rust_decimal::serde::arbitrary_precision::serialize(&amount.normalize(), serializer)
}

#[derive(Debug, Deserialize)]
pub(crate) struct UrlData {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusData {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn invoice_payload_field_order_and_omissions() -> anyhow::Result<()> {
        let order_id = OrderId::new("a1b2c3d4e5f6")?;
        let payload = CreateInvoicePayload {
            shop_id: "shop-1",
            sum: dec!(150.5),
            order_id: &order_id,
            success_url: Some("https://t.me/shop_bot"),
            fail_url: None,
            expire: 10,
            comment: None,
            include_service: &[PaymentMethod::Card, PaymentMethod::Sbp, PaymentMethod::Qiwi],
        };

        assert_eq!(
            serde_json::to_string(&payload)?,
            concat!(
                r#"{"shopId":"shop-1","sum":150.5,"orderId":"a1b2c3d4e5f6","#,
                r#""successUrl":"https://t.me/shop_bot","expire":10,"#,
                r#""includeService":["card","sbp","qiwi"]}"#
            ),
            "serialized invoice"
        );
        Ok(())
    }

    #[test]
    fn payout_payload_uses_wallet_to_and_numeric_subtract() -> anyhow::Result<()> {
        let order_id = OrderId::new("a1b2c3d4e5f6")?;
        let payload = CreatePayoutPayload {
            shop_id: "shop-1",
            order_id: &order_id,
            amount: dec!(500),
            service: CARD_PAYOFF,
            subtract: Subtract::default(),
            wallet_to: "4111111111111111",
        };

        assert_eq!(
            serde_json::to_string(&payload)?,
            concat!(
                r#"{"shopId":"shop-1","orderId":"a1b2c3d4e5f6","amount":500,"#,
                r#""service":"card_payoff","subtract":1,"walletTo":"4111111111111111"}"#
            ),
            "serialized payout"
        );
        Ok(())
    }

    #[test]
    fn amounts_keep_their_exact_digits() -> anyhow::Result<()> {
        let order_id = OrderId::new("a1b2c3d4e5f6")?;
        let cases = [
            (dec!(100), "100"),
            (dec!(100.00), "100"),
            (dec!(99.90), "99.9"),
            (dec!(12345678901234567.89), "12345678901234567.89"),
            (dec!(0.000001), "0.000001"),
        ];

        for (amount, expected) in cases {
            let payload = CreatePayoutPayload {
                shop_id: "shop-1",
                order_id: &order_id,
                amount,
                service: CARD_PAYOFF,
                subtract: Subtract::Balance,
                wallet_to: "4111111111111111",
            };
            let invoice = CreateInvoicePayload {
                shop_id: "shop-1",
                sum: amount,
                order_id: &order_id,
                success_url: None,
                fail_url: None,
                expire: 10,
                comment: None,
                include_service: &[PaymentMethod::Card],
            };

            let payout_json = serde_json::to_string(&payload)?;
            let invoice_json = serde_json::to_string(&invoice)?;
            assert!(
                payout_json.contains(&format!(r#""amount":{expected},"#)),
                "payout amount {amount}: {payout_json}"
            );
            assert!(
                invoice_json.contains(&format!(r#""sum":{expected},"#)),
                "invoice sum {amount}: {invoice_json}"
            );
        }
        Ok(())
    }

    #[test]
    fn check_wallet_payload_order() -> anyhow::Result<()> {
        let payload = CheckWalletPayload {
            service: CARD_PAYOFF,
            shop_id: "shop-1",
            wallet_to: "4111111111111111",
        };

        assert_eq!(
            serde_json::to_string(&payload)?,
            r#"{"service":"card_payoff","shopId":"shop-1","walletTo":"4111111111111111"}"#,
            "serialized wallet check"
        );
        Ok(())
    }

    #[test]
    fn builders_leave_overrides_unset() {
        let invoice = InvoiceRequest::new(dec!(100));
        assert!(invoice.order_id.is_none(), "order id generated later");
        assert!(invoice.include_service.is_none(), "defaults applied later");

        let payout = PayoutRequest::builder()
            .amount(dec!(10))
            .wallet_to("4111111111111111")
            .subtract(Subtract::Amount)
            .build();
        assert_eq!(payout.subtract, Subtract::Amount, "explicit subtract");
        assert_eq!(
            PayoutRequest::new(dec!(10), "x").subtract,
            Subtract::Balance,
            "default subtract"
        );
    }
}
