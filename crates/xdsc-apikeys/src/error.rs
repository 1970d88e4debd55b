use thiserror::Error;

/// Errors raised by the API-key store and its resource handler (§4.6,
/// component H).
#[derive(Debug, Error)]
pub enum ApiKeysError {
    /// A `Store` call named an `id` that already exists under the same
    /// `apiId` but with a different `name` (§3 `APIKeyData` — the
    /// conflict predicate).
    #[error("conflicting API key {id} under api {api_id}: existing name {existing_name:?}, new name {new_name:?}")]
    Conflict {
        /// The API the key belongs to.
        api_id: String,
        /// The key id that conflicted.
        id: String,
        /// The name already on record.
        existing_name: String,
        /// The name the new `Store` call attempted to set.
        new_name: String,
    },

    /// A `Store` operation named an empty key id or an empty secret
    /// value — the Rust equivalent of a `nil` `APIKeyData` (§4.6).
    #[error("API key data is required")]
    MissingData,

    /// A `Revoke` operation named an empty secret value.
    #[error("API key value is required")]
    MissingRevokeValue,

    /// A per-key `Store` call failed while replacing the whole
    /// state-of-world snapshot; the loop halts and surfaces the id.
    #[error("failed to store API key {id} during state-of-world replace: {source}")]
    StateOfWorld {
        /// The key id being stored when the failure occurred.
        id: String,
        /// The underlying store failure.
        #[source]
        source: Box<ApiKeysError>,
    },

    /// A `Store` dispatch call failed against the store.
    #[error("failed to store API key in store: {source}")]
    StoreDispatch {
        /// The underlying store failure.
        #[source]
        source: Box<ApiKeysError>,
    },
}

/// Result alias used throughout this crate.
pub type ApiKeysResult<T> = Result<T, ApiKeysError>;
