use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::Result;
use crate::error::Error;

/// Outcome carried in the processor's response body.
///
/// A response with a non-null `data` field is [`Envelope::Data`]; otherwise
/// its `error` field becomes [`Envelope::Error`]. Object-shaped errors (per
/// field validation messages) are kept as their compact JSON text.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Envelope<T> {
    Data(T),
    Error(String),
}

impl<T> Envelope<T> {
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Envelope::Data(_))
    }

    #[must_use]
    pub fn data(self) -> Option<T> {
        match self {
            Envelope::Data(data) => Some(data),
            Envelope::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Data(_) => None,
            Envelope::Error(message) => Some(message),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Envelope<U> {
        match self {
            Envelope::Data(data) => Envelope::Data(f(data)),
            Envelope::Error(message) => Envelope::Error(message),
        }
    }

    /// Converts into a `Result` with the remote error message as `Err`.
    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Envelope::Data(data) => Ok(data),
            Envelope::Error(message) => Err(message),
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    pub(crate) fn from_value(value: Value) -> Result<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::malformed_response(format!(
                    "expected a JSON object, got {other}"
                )));
            }
        };

        // Non-object `data` next to an `error` is a rejection, not a result.
        match object.remove("data") {
            Some(Value::Null) | None => Self::from_error(object),
            Some(data) if !data.is_object() && has_error(&object) => Self::from_error(object),
            Some(data) => Ok(Envelope::Data(crate::serde_helpers::deserialize(data)?)),
        }
    }

    fn from_error(mut object: Map<String, Value>) -> Result<Self> {
        match object.remove("error") {
            Some(Value::String(message)) => Ok(Envelope::Error(message)),
            Some(Value::Null) | None => Err(Error::malformed_response(
                "response has neither `data` nor `error`",
            )),
            Some(other) => Ok(Envelope::Error(other.to_string())),
        }
    }
}

fn has_error(object: &Map<String, Value>) -> bool {
    object.get("error").is_some_and(|error| !error.is_null())
}
