use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use xdsc_core::domain::LazyResource;

use crate::error::LazyResult;

/// Holds the most recent lazy-resource snapshot, keyed by
/// `(resource_type, id)` (§3 `LazyResource` — identity is that pair).
#[async_trait]
pub trait LazyResourceStore: Send + Sync {
    /// Atomically replace the entire store with `resources` (§4.7).
    async fn replace_all(&self, resources: Vec<LazyResource>) -> LazyResult<()>;

    /// Look up one resource by its identity.
    async fn get(&self, resource_type: &str, id: &str) -> Option<LazyResource>;

    /// Number of resources currently held.
    async fn len(&self) -> usize;
}

/// The default, process-lifetime [`LazyResourceStore`].
#[derive(Default)]
pub struct InMemoryLazyResourceStore {
    resources: RwLock<HashMap<(String, String), LazyResource>>,
}

impl InMemoryLazyResourceStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LazyResourceStore for InMemoryLazyResourceStore {
    async fn replace_all(&self, resources: Vec<LazyResource>) -> LazyResult<()> {
        let mut table = HashMap::with_capacity(resources.len());
        for resource in resources {
            table.insert((resource.resource_type.clone(), resource.id.clone()), resource);
        }
        *self.resources.write().await = table;
        Ok(())
    }

    async fn get(&self, resource_type: &str, id: &str) -> Option<LazyResource> {
        self.resources
            .read()
            .await
            .get(&(resource_type.to_owned(), id.to_owned()))
            .cloned()
    }

    async fn len(&self) -> usize {
        self.resources.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap as StdHashMap;

    use super::*;

    fn resource(resource_type: &str, id: &str) -> LazyResource {
        LazyResource {
            id: id.to_owned(),
            resource_type: resource_type.to_owned(),
            resource: StdHashMap::new(),
        }
    }

    #[tokio::test]
    async fn replace_all_is_whole_table() {
        let store = InMemoryLazyResourceStore::new();
        store.replace_all(vec![resource("widget", "w1")]).await.unwrap();
        assert_eq!(store.len().await, 1);

        store.replace_all(vec![resource("widget", "w2")]).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.get("widget", "w1").await.is_none());
        assert!(store.get("widget", "w2").await.is_some());
    }

    #[tokio::test]
    async fn identity_is_resource_type_and_id() {
        let store = InMemoryLazyResourceStore::new();
        store
            .replace_all(vec![resource("widget", "r1"), resource("gadget", "r1")])
            .await
            .unwrap();
        assert_eq!(store.len().await, 2);
    }
}
