//! Persisted state layout
//!
//! ```json
//! { "backStack": [ { "destinationId": "home", "scopeId": "entry:home", "results": {} } ] }
//! ```
//!
//! Unknown fields are ignored so older builds can read state written by newer
//! ones. [`NavigationState::restore`] never fails: anything unreadable becomes
//! the empty placeholder and the host seeds a fresh start destination.

use crate::errors::Result;
use crate::types::NavigationState;

impl NavigationState {
    /// Encode to the persisted JSON layout.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Strict decode.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Lenient decode: corrupt input is logged and replaced by [`NavigationState::empty`].
    pub fn restore(raw: &str) -> Self {
        match Self::from_json(raw) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = %err, "Discarding unreadable navigation state");
                Self::empty()
            }
        }
    }
}
