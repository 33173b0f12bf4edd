use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::Error;

/// Length of ids produced by [`crate::auth::generate_order_id`].
pub const ORDER_ID_LEN: usize = 12;

/// Client-side correlation id for invoices and payouts.
///
/// Generated ids are 12 lowercase alphanumeric characters. Ids supplied by the
/// caller are only required to be non-empty, since they may come from orders
/// created elsewhere.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::validation("order id must not be empty"));
        }
        Ok(Self(id))
    }

    pub(crate) fn from_generated(id: String) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OrderId::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    #[test]
    fn rejects_blank_ids() {
        for input in ["", "   "] {
            let err = OrderId::new(input).err().map(|e| e.kind());
            assert_eq!(err, Some(Kind::Validation), "input {input:?}");
        }
    }

    #[test]
    fn serializes_as_plain_string() -> anyhow::Result<()> {
        let id: OrderId = "a1b2c3d4e5f6".parse()?;

        assert_eq!(serde_json::to_string(&id)?, r#""a1b2c3d4e5f6""#, "json");
        assert_eq!(id.to_string(), "a1b2c3d4e5f6", "display");
        Ok(())
    }
}
