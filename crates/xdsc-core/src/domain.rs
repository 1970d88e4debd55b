//! Typed targets decoded from the structured document inside each resource
//! envelope (§3). These are plain data — no behavior — mirroring the shape
//! the control plane actually serializes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-API metadata carried by a policy-chain snapshot (§3
/// `configuration.metadata`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMetadata {
    /// Stable identifier for the API this snapshot configures.
    #[serde(rename = "apiId")]
    pub api_id: String,
    /// Human-readable API name, used as the metrics `api` label fallback.
    #[serde(rename = "apiName")]
    pub api_name: String,
    /// API revision string.
    pub version: String,
}

/// One policy bound to a route, in declared order (§3 `PolicyInstance`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyInstance {
    /// Registry lookup key: policy name.
    pub name: String,
    /// Registry lookup key: policy version.
    pub version: String,
    /// Whether this instance is active.
    pub enabled: bool,
    /// Optional gate expression; non-empty sets
    /// `BuiltPolicyChain::has_execution_conditions`.
    #[serde(rename = "executionCondition", default, skip_serializing_if = "Option::is_none")]
    pub execution_condition: Option<String>,
    /// Runtime parameter overrides merged with the policy's declared
    /// defaults by the registry (§4.4 step 2).
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
}

/// An ordered sequence of policies bound to one route key (§3
/// `PolicyChain`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyChain {
    /// Opaque route identifier; may encode `apiName::routeName`.
    #[serde(rename = "routeKey")]
    pub route_key: String,
    /// The policies to run, in order.
    pub policies: Vec<PolicyInstance>,
}

/// The routing configuration block of a policy-chain snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyChainConfiguration {
    /// API-level metadata shared by every route below.
    pub metadata: ApiMetadata,
    /// The per-route policy chains.
    pub routes: Vec<PolicyChain>,
}

/// Decoded from a `PolicyChainTypeURL` resource (§3 `StoredPolicyConfig`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPolicyConfig {
    /// API identifier this resource configures.
    pub id: String,
    /// Monotonic revision counter.
    pub version: i64,
    /// The routing configuration.
    pub configuration: PolicyChainConfiguration,
}

/// One API key record (§3 `APIKeyData`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyData {
    /// Identity component 2 of `(apiId, id)`.
    pub id: String,
    /// Display name; part of the conflict check (same id, different name).
    pub name: String,
    /// The secret value itself.
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// Identity component 1 of `(apiId, id)`.
    #[serde(rename = "apiId")]
    pub api_id: String,
    /// Free-form set of operations this key is scoped to.
    #[serde(default)]
    pub operations: Vec<String>,
    /// Lifecycle status string (e.g. `"active"`, `"revoked"`).
    pub status: String,
    /// Creation timestamp, RFC 3339.
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Creator identity.
    #[serde(rename = "createdBy")]
    pub created_by: String,
    /// Last-update timestamp, RFC 3339.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// State-of-world API-key snapshot (§3 `APIKeyStateResource`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyStateResource {
    /// Snapshot revision.
    pub version: i64,
    /// Snapshot timestamp, RFC 3339.
    pub timestamp: String,
    /// The complete set of keys as of this snapshot.
    #[serde(rename = "apiKeys", default)]
    pub api_keys: Vec<ApiKeyData>,
}

/// A single streamed API-key mutation (§3 `APIKeyOperation`).
///
/// Tagged on `operation`, matching the control plane's wire discriminant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum ApiKeyOperation {
    /// Upsert one key under `apiId`.
    #[serde(rename = "store")]
    Store {
        /// Owning API.
        #[serde(rename = "apiId")]
        api_id: String,
        /// The key record to store.
        #[serde(rename = "apiKey")]
        api_key: ApiKeyData,
    },
    /// Revoke a key by its secret value.
    #[serde(rename = "revoke")]
    Revoke {
        /// Owning API.
        #[serde(rename = "apiId")]
        api_id: String,
        /// The secret to revoke.
        #[serde(rename = "apiKeyValue")]
        api_key_value: String,
    },
    /// Remove every key under `apiId`.
    #[serde(rename = "removeByApi")]
    RemoveByApi {
        /// Owning API.
        #[serde(rename = "apiId")]
        api_id: String,
    },
}

/// One lazily-typed resource (§3 `LazyResource`). Identity is
/// `(resource_type, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyResource {
    /// Resource identifier, unique within `resource_type`.
    pub id: String,
    /// Discriminates the shape of `resource` for downstream consumers.
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    /// Opaque, schema-less payload.
    pub resource: HashMap<String, serde_json::Value>,
}

/// State-of-world lazy-resource snapshot (§4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LazyResourceSnapshot {
    /// Snapshot revision.
    pub version: i64,
    /// Snapshot timestamp, RFC 3339.
    pub timestamp: String,
    /// The complete set of resources as of this snapshot.
    #[serde(default)]
    pub resources: Vec<LazyResource>,
}
