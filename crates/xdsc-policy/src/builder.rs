use xdsc_core::domain::{ApiMetadata, PolicyChain};

use crate::capability::PolicyMetadata;
use crate::chain::{BuiltPolicyChain, PolicySpec};
use crate::error::{BuilderError, BuilderResult};
use crate::registry::PolicyRegistry;

const ATTACHED_TO_PARAMETER: &str = "attachedTo";

/// Instantiate every policy declared on one route and aggregate its
/// body-mode and execution-condition flags (§4.4, component F).
///
/// # Errors
///
/// Returns [`BuilderError::EmptyNameOrVersion`] for a declared instance
/// with an empty `name` or `version`, or [`BuilderError::Registry`] if the
/// registry cannot resolve or instantiate a declared `(name, version)`.
pub async fn build_chain(
    chain: &PolicyChain,
    api_metadata: &ApiMetadata,
    registry: &dyn PolicyRegistry,
) -> BuilderResult<BuiltPolicyChain> {
    let mut policies = Vec::with_capacity(chain.policies.len());
    let mut specs = Vec::with_capacity(chain.policies.len());
    let mut requires_request_body = false;
    let mut requires_response_body = false;
    let mut has_execution_conditions = false;

    for (index, instance) in chain.policies.iter().enumerate() {
        if instance.name.is_empty() || instance.version.is_empty() {
            return Err(BuilderError::EmptyNameOrVersion { index });
        }

        let attached_to = instance
            .parameters
            .get(ATTACHED_TO_PARAMETER)
            .and_then(|value| value.as_str())
            .map(ToOwned::to_owned);

        let metadata = PolicyMetadata {
            route_key: chain.route_key.clone(),
            api_id: api_metadata.api_id.clone(),
            api_name: api_metadata.api_name.clone(),
            api_version: api_metadata.version.clone(),
            attached_to,
        };

        let (policy, merged_parameters) = registry
            .create(&instance.name, &instance.version, &metadata, &instance.parameters)
            .await?;

        if instance
            .execution_condition
            .as_deref()
            .is_some_and(|condition| !condition.is_empty())
        {
            has_execution_conditions = true;
        }

        let (request_mode, response_mode) = policy.mode();
        requires_request_body |= request_mode.requires_body();
        requires_response_body |= response_mode.requires_body();

        specs.push(PolicySpec {
            name: instance.name.clone(),
            version: instance.version.clone(),
            enabled: instance.enabled,
            execution_condition: instance.execution_condition.clone(),
            merged_parameters,
        });
        policies.push(policy);
    }

    Ok(BuiltPolicyChain {
        policies,
        specs,
        requires_request_body,
        requires_response_body,
        has_execution_conditions,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use xdsc_core::domain::PolicyInstance;

    use crate::capability::{BodyMode, Policy};
    use crate::error::RegistryError;

    use super::*;

    struct RecordingPolicy {
        mode: (BodyMode, BodyMode),
    }

    #[async_trait]
    impl Policy for RecordingPolicy {
        async fn on_request(&self, _parameters: &HashMap<String, serde_json::Value>) {}
        async fn on_response(&self, _parameters: &HashMap<String, serde_json::Value>) {}
        fn mode(&self) -> (BodyMode, BodyMode) {
            self.mode
        }
    }

    struct FakeRegistry {
        known: Mutex<Vec<(String, String, BodyMode, BodyMode)>>,
    }

    impl FakeRegistry {
        fn new(known: Vec<(&str, &str, BodyMode, BodyMode)>) -> Self {
            Self {
                known: Mutex::new(
                    known
                        .into_iter()
                        .map(|(n, v, req, resp)| (n.to_owned(), v.to_owned(), req, resp))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl PolicyRegistry for FakeRegistry {
        async fn create(
            &self,
            name: &str,
            version: &str,
            _metadata: &PolicyMetadata,
            parameters: &HashMap<String, serde_json::Value>,
        ) -> crate::error::RegistryResult<(Box<dyn Policy>, HashMap<String, serde_json::Value>)> {
            let known = self.known.lock().unwrap();
            let entry = known
                .iter()
                .find(|(n, v, ..)| n == name && v == version)
                .ok_or_else(|| RegistryError::NotFound {
                    name: name.to_owned(),
                    version: version.to_owned(),
                })?;
            Ok((
                Box::new(RecordingPolicy {
                    mode: (entry.2, entry.3),
                }),
                parameters.clone(),
            ))
        }
    }

    fn api_metadata() -> ApiMetadata {
        ApiMetadata {
            api_id: "a1".to_owned(),
            api_name: "demo".to_owned(),
            version: "v1".to_owned(),
        }
    }

    fn instance(name: &str, version: &str) -> PolicyInstance {
        PolicyInstance {
            name: name.to_owned(),
            version: version.to_owned(),
            enabled: true,
            execution_condition: None,
            parameters: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn single_policy_no_body_requirements() {
        let registry = FakeRegistry::new(vec![("log", "1.0.0", BodyMode::None, BodyMode::None)]);
        let chain = PolicyChain {
            route_key: "demo::r1".to_owned(),
            policies: vec![instance("log", "1.0.0")],
        };

        let built = build_chain(&chain, &api_metadata(), &registry).await.unwrap();

        assert_eq!(built.len(), 1);
        assert!(!built.requires_request_body);
        assert!(!built.requires_response_body);
        assert!(!built.has_execution_conditions);
    }

    #[tokio::test]
    async fn body_mode_flags_aggregate_monotonically() {
        let registry = FakeRegistry::new(vec![
            ("auth", "1.0.0", BodyMode::None, BodyMode::None),
            ("transform", "2.0.0", BodyMode::Buffer, BodyMode::Stream),
        ]);
        let chain = PolicyChain {
            route_key: "demo::r1".to_owned(),
            policies: vec![instance("auth", "1.0.0"), instance("transform", "2.0.0")],
        };

        let built = build_chain(&chain, &api_metadata(), &registry).await.unwrap();

        assert!(built.requires_request_body);
        assert!(built.requires_response_body);
    }

    #[tokio::test]
    async fn execution_condition_sets_chain_flag() {
        let registry = FakeRegistry::new(vec![("gate", "1.0.0", BodyMode::None, BodyMode::None)]);
        let mut gated = instance("gate", "1.0.0");
        gated.execution_condition = Some("request.headers['x-beta'] == 'true'".to_owned());
        let chain = PolicyChain {
            route_key: "demo::r1".to_owned(),
            policies: vec![gated],
        };

        let built = build_chain(&chain, &api_metadata(), &registry).await.unwrap();

        assert!(built.has_execution_conditions);
    }

    #[tokio::test]
    async fn attached_to_parameter_flows_into_metadata() {
        struct CapturingRegistry {
            captured: Mutex<Option<Option<String>>>,
        }

        #[async_trait]
        impl PolicyRegistry for CapturingRegistry {
            async fn create(
                &self,
                _name: &str,
                _version: &str,
                metadata: &PolicyMetadata,
                parameters: &HashMap<String, serde_json::Value>,
            ) -> crate::error::RegistryResult<(
                Box<dyn Policy>,
                HashMap<String, serde_json::Value>,
            )> {
                *self.captured.lock().unwrap() = Some(metadata.attached_to.clone());
                Ok((
                    Box::new(RecordingPolicy {
                        mode: (BodyMode::None, BodyMode::None),
                    }),
                    parameters.clone(),
                ))
            }
        }

        let registry = CapturingRegistry {
            captured: Mutex::new(None),
        };
        let mut with_attachment = instance("log", "1.0.0");
        with_attachment
            .parameters
            .insert(ATTACHED_TO_PARAMETER.to_owned(), serde_json::json!("operation"));
        let chain = PolicyChain {
            route_key: "demo::r1".to_owned(),
            policies: vec![with_attachment],
        };

        build_chain(&chain, &api_metadata(), &registry).await.unwrap();

        assert_eq!(
            *registry.captured.lock().unwrap(),
            Some(Some("operation".to_owned()))
        );
    }

    #[tokio::test]
    async fn unknown_policy_is_a_registry_error() {
        let registry = FakeRegistry::new(vec![]);
        let chain = PolicyChain {
            route_key: "demo::r1".to_owned(),
            policies: vec![instance("ghost", "1.0.0")],
        };

        let err = build_chain(&chain, &api_metadata(), &registry).await.unwrap_err();
        assert!(matches!(err, BuilderError::Registry(RegistryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn empty_name_is_rejected_before_consulting_registry() {
        let registry = FakeRegistry::new(vec![]);
        let chain = PolicyChain {
            route_key: "demo::r1".to_owned(),
            policies: vec![instance("", "1.0.0")],
        };

        let err = build_chain(&chain, &api_metadata(), &registry).await.unwrap_err();
        assert!(matches!(err, BuilderError::EmptyNameOrVersion { index: 0 }));
    }

    #[tokio::test]
    async fn empty_policy_list_is_a_valid_chain() {
        let registry = FakeRegistry::new(vec![]);
        let chain = PolicyChain {
            route_key: "demo::r1".to_owned(),
            policies: vec![],
        };

        let built = build_chain(&chain, &api_metadata(), &registry).await.unwrap();
        assert!(built.is_empty());
        assert!(!built.requires_request_body);
        assert!(!built.requires_response_body);
    }
}
