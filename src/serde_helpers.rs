use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Result;
use crate::error::{Error, Kind};

/// Decodes `value` into `T`.
///
/// With the `tracing` feature, errors carry the JSON path of the offending
/// field and fields `T` does not know about are traced.
#[cfg(feature = "tracing")]
pub(crate) fn deserialize<T: DeserializeOwned>(value: Value) -> Result<T> {
    let mut ignored = Vec::new();
    let deserializer = serde_ignored::Deserializer::new(value, |path| {
        ignored.push(path.to_string());
    });
    let result: T = serde_path_to_error::deserialize(deserializer)
        .map_err(|e| Error::with_source(Kind::Internal, e))?;

    if !ignored.is_empty() {
        tracing::trace!(fields = ?ignored, "ignored unknown response fields");
    }

    Ok(result)
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn deserialize<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::with_source(Kind::Internal, e))
}
