//! Whole-collection reads and writes shared by the menu and history.

use crate::domain::{DomainResult, StoreError};
use crate::infrastructure::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Reads the collection stored under `key`.
///
/// A missing key and an unreadable payload both yield an empty collection;
/// only a failure of the store itself is an error.
pub(crate) fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> DomainResult<Vec<T>> {
    let Some(payload) = store.get(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<T>>(&payload) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!(key, error = %e, "discarding malformed stored collection");
            Ok(Vec::new())
        }
    }
}

/// Replaces the collection stored under `key` with `items`.
pub(crate) fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> DomainResult<()> {
    let payload = serde_json::to_string(items).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &payload)?;
    Ok(())
}
