use std::sync::Arc;

use tracing::warn;
use xdsc_core::domain::{ApiKeyOperation, ApiKeyStateResource};
use xdsc_core::envelope::decode_resource;

use crate::error::{ApiKeysError, ApiKeysResult};
use crate::store::ApiKeyStore;

/// Field present only on the state-of-world shape, used to tell the two
/// delivery modes apart before committing to a target type (§4.6).
const STATE_OF_WORLD_DISCRIMINANT: &str = "apiKeys";

/// Dispatches both delivery modes of the API-key resource surface onto an
/// [`ApiKeyStore`] (§4.6, component H).
pub struct ApiKeyResourceHandler {
    store: Arc<dyn ApiKeyStore>,
}

impl ApiKeyResourceHandler {
    /// Bind a handler to a store.
    #[must_use]
    pub fn new(store: Arc<dyn ApiKeyStore>) -> Self {
        Self { store }
    }

    /// Replace the whole store from a state-of-world snapshot: clear, then
    /// store every key in declaration order.
    ///
    /// Decode failures are logged and swallowed to preserve connection
    /// continuity (§4.6). A per-key store failure halts the loop and
    /// surfaces [`ApiKeysError::StateOfWorld`] naming the offending id.
    ///
    /// # Errors
    ///
    /// See above — only a per-key store failure is returned as `Err`.
    pub async fn handle_state_of_world(&self, resource_bytes: &[u8]) -> ApiKeysResult<()> {
        let snapshot: ApiKeyStateResource = match decode_resource(resource_bytes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "API key state-of-world resource failed to decode, ignoring");
                return Ok(());
            }
        };

        self.apply_snapshot(snapshot).await
    }

    /// Dispatch one streamed mutation.
    ///
    /// Any tag other than `Store`/`Revoke`/`RemoveByAPI` fails to
    /// deserialize into [`ApiKeyOperation`] in the first place (an
    /// unrecognized `operation` discriminant is a decode error, reported
    /// by the caller before this is ever invoked), so there is no
    /// "unknown operation" branch here.
    ///
    /// # Errors
    ///
    /// [`ApiKeysError::MissingData`] if a `Store` names an empty key id or
    /// secret; [`ApiKeysError::MissingRevokeValue`] if a `Revoke` names an
    /// empty secret; otherwise whatever the store reports.
    pub async fn handle_operation(&self, operation: ApiKeyOperation) -> ApiKeysResult<()> {
        match operation {
            ApiKeyOperation::Store { api_id, api_key } => {
                if api_key.id.is_empty() || api_key.api_key.is_empty() {
                    return Err(ApiKeysError::MissingData);
                }
                self.store
                    .store(&api_id, api_key)
                    .await
                    .map_err(|source| ApiKeysError::StoreDispatch {
                        source: Box::new(source),
                    })
            }
            ApiKeyOperation::Revoke { api_key_value, .. } => {
                if api_key_value.is_empty() {
                    return Err(ApiKeysError::MissingRevokeValue);
                }
                self.store.revoke(&api_key_value).await
            }
            ApiKeyOperation::RemoveByApi { api_id } => self.store.remove_by_api(&api_id).await,
        }
    }

    /// Multiplex a discovery response's resource batch between the two
    /// delivery modes (§4.6): a resource carrying `apiKeys` is a
    /// state-of-world snapshot; anything else is decoded as a streamed
    /// operation. Per-resource decode and validation failures are logged
    /// and skipped to preserve connection continuity — only frame-decode
    /// failures and store-dispatch failures cross this boundary (§7:
    /// "only frame-decode and cancellation cross component boundaries").
    ///
    /// # Errors
    ///
    /// Propagates a per-key state-of-world failure or a store-dispatch
    /// failure from an operation; a resource that fails to decode, or
    /// fails only its own field validation (`MissingData`,
    /// `MissingRevokeValue`), is skipped, not an error.
    pub async fn handle_resources(&self, resources: &[Vec<u8>]) -> ApiKeysResult<()> {
        for resource in resources {
            let document: serde_json::Value = match decode_resource(resource) {
                Ok(document) => document,
                Err(err) => {
                    warn!(error = %err, "API key resource failed to decode, ignoring");
                    continue;
                }
            };

            if document.get(STATE_OF_WORLD_DISCRIMINANT).is_some() {
                match serde_json::from_value::<ApiKeyStateResource>(document) {
                    Ok(snapshot) => self.apply_snapshot(snapshot).await?,
                    Err(err) => warn!(error = %err, "malformed API key state-of-world resource, ignoring"),
                }
            } else {
                match serde_json::from_value::<ApiKeyOperation>(document) {
                    Ok(operation) => match self.handle_operation(operation).await {
                        Ok(()) => {}
                        Err(err @ (ApiKeysError::MissingData | ApiKeysError::MissingRevokeValue)) => {
                            warn!(error = %err, "API key operation failed validation, ignoring");
                        }
                        Err(err) => return Err(err),
                    },
                    Err(err) => warn!(error = %err, "malformed API key operation, ignoring"),
                }
            }
        }
        Ok(())
    }

    async fn apply_snapshot(&self, snapshot: ApiKeyStateResource) -> ApiKeysResult<()> {
        self.store.clear().await?;
        for data in snapshot.api_keys {
            let id = data.id.clone();
            let api_id = data.api_id.clone();
            self.store
                .store(&api_id, data)
                .await
                .map_err(|source| ApiKeysError::StateOfWorld {
                    id,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;
    use xdsc_core::domain::ApiKeyData;

    use crate::store::InMemoryApiKeyStore;

    use super::*;

    fn wrap_document(json: &str) -> Vec<u8> {
        let inner = xdsc_proto::Envelope {
            type_url: xdsc_proto::STRUCTURED_DOCUMENT_TYPE_URL.to_owned(),
            value: json.as_bytes().to_vec(),
        };
        inner.encode_to_vec()
    }

    fn handler() -> ApiKeyResourceHandler {
        ApiKeyResourceHandler::new(Arc::new(InMemoryApiKeyStore::new()))
    }

    #[tokio::test]
    async fn e5_state_of_world_replaces_whole_store() {
        let handler = handler();
        let resource = wrap_document(
            r#"{
                "version": 1, "timestamp": "2026-01-01T00:00:00Z",
                "apiKeys": [
                    { "id": "k1", "name": "primary", "apiKey": "secret-1", "apiId": "api-1",
                      "operations": [], "status": "active",
                      "createdAt": "2026-01-01T00:00:00Z", "createdBy": "controller",
                      "updatedAt": "2026-01-01T00:00:00Z" }
                ]
            }"#,
        );

        handler.handle_state_of_world(&resource).await.unwrap();

        // A second, empty snapshot clears the store entirely.
        let empty = wrap_document(r#"{"version":2,"timestamp":"2026-01-02T00:00:00Z","apiKeys":[]}"#);
        handler.handle_state_of_world(&empty).await.unwrap();
        handler.store.revoke("secret-1").await.unwrap();
    }

    #[tokio::test]
    async fn malformed_state_of_world_is_swallowed() {
        let handler = handler();
        let garbage = vec![0xFF, 0xFF, 0xFF];
        handler.handle_state_of_world(&garbage).await.unwrap();
    }

    #[tokio::test]
    async fn store_operation_requires_data() {
        let handler = handler();
        let op = ApiKeyOperation::Store {
            api_id: "api-1".to_owned(),
            api_key: ApiKeyData {
                id: String::new(),
                name: String::new(),
                api_key: String::new(),
                api_id: "api-1".to_owned(),
                operations: Vec::new(),
                status: String::new(),
                created_at: String::new(),
                created_by: String::new(),
                updated_at: String::new(),
            },
        };

        let err = handler.handle_operation(op).await.unwrap_err();
        assert!(matches!(err, ApiKeysError::MissingData));
    }

    #[tokio::test]
    async fn revoke_operation_requires_non_empty_value() {
        let handler = handler();
        let op = ApiKeyOperation::Revoke {
            api_id: "api-1".to_owned(),
            api_key_value: String::new(),
        };

        let err = handler.handle_operation(op).await.unwrap_err();
        assert!(matches!(err, ApiKeysError::MissingRevokeValue));
    }

    #[tokio::test]
    async fn handle_resources_multiplexes_snapshot_then_operation() {
        let handler = handler();
        let snapshot = wrap_document(
            r#"{
                "version": 1, "timestamp": "2026-01-01T00:00:00Z",
                "apiKeys": [
                    { "id": "k1", "name": "primary", "apiKey": "secret-1", "apiId": "api-1",
                      "operations": [], "status": "active",
                      "createdAt": "2026-01-01T00:00:00Z", "createdBy": "controller",
                      "updatedAt": "2026-01-01T00:00:00Z" }
                ]
            }"#,
        );
        let revoke_op = wrap_document(r#"{"operation":"revoke","apiId":"api-1","apiKeyValue":"secret-1"}"#);

        handler.handle_resources(&[snapshot, revoke_op]).await.unwrap();

        // secret-1 was revoked by the operation, so storing it again under
        // a fresh id must not collide with a stale record.
        handler
            .store
            .store("api-1", ApiKeyData {
                id: "k2".to_owned(),
                name: "secondary".to_owned(),
                api_key: "secret-1".to_owned(),
                api_id: "api-1".to_owned(),
                operations: Vec::new(),
                status: "active".to_owned(),
                created_at: "2026-01-01T00:00:00Z".to_owned(),
                created_by: "controller".to_owned(),
                updated_at: "2026-01-01T00:00:00Z".to_owned(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn handle_resources_skips_invalid_operation_and_keeps_acking() {
        let handler = handler();
        let bad_revoke = wrap_document(r#"{"operation":"revoke","apiId":"api-1","apiKeyValue":""}"#);
        let good_remove = wrap_document(r#"{"operation":"removeByApi","apiId":"api-1"}"#);

        handler
            .handle_resources(&[bad_revoke, good_remove])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn remove_by_api_operation_delegates_to_store() {
        let handler = handler();
        handler
            .handle_operation(ApiKeyOperation::RemoveByApi {
                api_id: "api-1".to_owned(),
            })
            .await
            .unwrap();
    }
}
