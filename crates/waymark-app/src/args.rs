//! JSON helpers for destination arguments and results.
//!
//! The navigation core treats args as opaque strings. Destinations that want
//! typed arguments encode and decode them here.

use serde::de::DeserializeOwned;
use serde::Serialize;
use waymark_core::{BackStackEntry, NavResult, ResultPayload};

/// Encode typed arguments for [`BackStackEntry::with_args`].
pub fn encode_args<T: Serialize>(args: &T) -> NavResult<String> {
    Ok(serde_json::to_string(args)?)
}

/// Decode an entry's arguments; `Ok(None)` when it carries none.
pub fn decode_args<T: DeserializeOwned>(entry: &BackStackEntry) -> NavResult<Option<T>> {
    entry
        .args
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(Into::into)
}

/// Encode a typed value as a pop result.
pub fn encode_result<T: Serialize>(value: &T) -> NavResult<ResultPayload> {
    Ok(serde_json::to_value(value)?)
}

/// Decode a delivered result; `Ok(None)` when nothing was delivered under `key`.
pub fn decode_result<T: DeserializeOwned>(entry: &BackStackEntry, key: &str) -> NavResult<Option<T>> {
    entry
        .result(key)
        .map(|payload| T::deserialize(payload))
        .transpose()
        .map_err(Into::into)
}
