use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use xdsc_core::domain::ApiKeyData;

use crate::error::{ApiKeysError, ApiKeysResult};

/// Persists API keys for the lifetime of the process (§3 "Lifecycle":
/// replaced wholesale at the next snapshot, never persisted to disk).
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Upsert `data` under `(api_id, data.id)`. Conflicts with an existing
    /// record that has the same id but a different name under the same
    /// `api_id` report [`ApiKeysError::Conflict`].
    async fn store(&self, api_id: &str, data: ApiKeyData) -> ApiKeysResult<()>;

    /// Remove the key whose secret value is `api_key_value`, if any.
    /// Absence is not an error — revocation is idempotent.
    async fn revoke(&self, api_key_value: &str) -> ApiKeysResult<()>;

    /// Remove every key owned by `api_id`.
    async fn remove_by_api(&self, api_id: &str) -> ApiKeysResult<()>;

    /// Drop every key, in preparation for a state-of-world replace.
    async fn clear(&self) -> ApiKeysResult<()>;
}

#[derive(Default)]
struct Inner {
    by_identity: HashMap<(String, String), ApiKeyData>,
    by_secret: HashMap<String, (String, String)>,
}

/// The default, process-lifetime [`ApiKeyStore`]: a `(apiId, id)`-keyed
/// map plus a secret-value index for O(1) revoke-by-value.
#[derive(Default)]
pub struct InMemoryApiKeyStore {
    inner: RwLock<Inner>,
}

impl InMemoryApiKeyStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiKeyStore for InMemoryApiKeyStore {
    async fn store(&self, api_id: &str, data: ApiKeyData) -> ApiKeysResult<()> {
        let mut inner = self.inner.write().await;
        let identity = (api_id.to_owned(), data.id.clone());

        if let Some(existing) = inner.by_identity.get(&identity) {
            if existing.name != data.name {
                return Err(ApiKeysError::Conflict {
                    api_id: api_id.to_owned(),
                    id: data.id.clone(),
                    existing_name: existing.name.clone(),
                    new_name: data.name.clone(),
                });
            }
        }

        if let Some(old) = inner.by_identity.get(&identity) {
            inner.by_secret.remove(&old.api_key);
        }
        inner.by_secret.insert(data.api_key.clone(), identity.clone());
        inner.by_identity.insert(identity, data);
        Ok(())
    }

    async fn revoke(&self, api_key_value: &str) -> ApiKeysResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(identity) = inner.by_secret.remove(api_key_value) {
            inner.by_identity.remove(&identity);
        }
        Ok(())
    }

    async fn remove_by_api(&self, api_id: &str) -> ApiKeysResult<()> {
        let mut inner = self.inner.write().await;
        let doomed: Vec<(String, String)> = inner
            .by_identity
            .keys()
            .filter(|(owner, _)| owner == api_id)
            .cloned()
            .collect();
        for identity in doomed {
            if let Some(data) = inner.by_identity.remove(&identity) {
                inner.by_secret.remove(&data.api_key);
            }
        }
        Ok(())
    }

    async fn clear(&self) -> ApiKeysResult<()> {
        let mut inner = self.inner.write().await;
        inner.by_identity.clear();
        inner.by_secret.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str, name: &str, api_id: &str, secret: &str) -> ApiKeyData {
        ApiKeyData {
            id: id.to_owned(),
            name: name.to_owned(),
            api_key: secret.to_owned(),
            api_id: api_id.to_owned(),
            operations: Vec::new(),
            status: "active".to_owned(),
            created_at: "2026-01-01T00:00:00Z".to_owned(),
            created_by: "controller".to_owned(),
            updated_at: "2026-01-01T00:00:00Z".to_owned(),
        }
    }

    #[tokio::test]
    async fn store_then_revoke_by_secret() {
        let store = InMemoryApiKeyStore::new();
        store.store("api-1", key("k1", "primary", "api-1", "secret-abc")).await.unwrap();

        store.revoke("secret-abc").await.unwrap();

        // Re-storing under the same identity with the same name succeeds,
        // proving the prior record (and its secret index entry) is gone.
        store.store("api-1", key("k1", "primary", "api-1", "secret-def")).await.unwrap();
    }

    #[tokio::test]
    async fn revoking_an_unknown_secret_is_not_an_error() {
        let store = InMemoryApiKeyStore::new();
        store.revoke("never-issued").await.unwrap();
    }

    #[tokio::test]
    async fn same_id_different_name_is_a_conflict() {
        let store = InMemoryApiKeyStore::new();
        store.store("api-1", key("k1", "primary", "api-1", "secret-abc")).await.unwrap();

        let err = store
            .store("api-1", key("k1", "renamed", "api-1", "secret-xyz"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiKeysError::Conflict { .. }));
    }

    #[tokio::test]
    async fn same_id_same_name_is_an_update_not_a_conflict() {
        let store = InMemoryApiKeyStore::new();
        store.store("api-1", key("k1", "primary", "api-1", "secret-abc")).await.unwrap();
        store.store("api-1", key("k1", "primary", "api-1", "secret-abc-rotated")).await.unwrap();
    }

    #[tokio::test]
    async fn remove_by_api_clears_only_that_apis_keys() {
        let store = InMemoryApiKeyStore::new();
        store.store("api-1", key("k1", "primary", "api-1", "s1")).await.unwrap();
        store.store("api-2", key("k1", "primary", "api-2", "s2")).await.unwrap();

        store.remove_by_api("api-1").await.unwrap();

        store.store("api-1", key("k1", "other-name", "api-1", "s3")).await.unwrap();
        store.revoke("s2").await.unwrap();
    }
}
