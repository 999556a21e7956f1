use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient::lenient;

/// A supermarket as returned by the backend's store endpoints.
///
/// Only `id` and `name` carry meaning here; everything else is passed
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Store {
    /// The store name, falling back to the chain name, then `"Store"`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.chain.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Store")
    }
}
