//! The resource envelope decoder (§4.3, component C).
//!
//! Every resource on the wire is double-wrapped: the outer
//! [`xdsc_proto::Envelope`] carries bytes that are themselves an
//! [`xdsc_proto::Envelope`], whose own bytes are a structured document
//! (represented here as JSON, the concrete stand-in for the spec's
//! "generic structured document"). The dispatch layer (`xdsc-client`) is
//! responsible for §4.3 step 1 — skipping unrecognized outer `type_url`s
//! before ever calling into this module.

use prost::Message;
use serde::de::DeserializeOwned;

use crate::error::{CoreError, CoreResult};

/// Decode the outer envelope's bytes into the inner [`xdsc_proto::Envelope`]
/// (§4.3 step 2).
fn decode_inner_envelope(outer_bytes: &[u8]) -> CoreResult<xdsc_proto::Envelope> {
    xdsc_proto::Envelope::decode(outer_bytes).map_err(CoreError::InnerEnvelopeDecode)
}

/// Decode the inner envelope's value bytes into a structured document
/// (§4.3 step 3).
fn decode_structured_document(inner: &xdsc_proto::Envelope) -> CoreResult<serde_json::Value> {
    serde_json::from_slice(&inner.value).map_err(CoreError::StructuredDocumentDecode)
}

/// Run the full double-unwrap and decode into the typed target `T` for this
/// outer `type_url` (§4.3 steps 2-4).
///
/// # Errors
///
/// Returns [`CoreError::InnerEnvelopeDecode`], [`CoreError::StructuredDocumentDecode`],
/// or [`CoreError::TargetDecode`] depending on which step failed — each is a
/// per-resource failure the caller reports and continues past (§4.3, §7).
pub fn decode_resource<T: DeserializeOwned>(outer_bytes: &[u8]) -> CoreResult<T> {
    let inner = decode_inner_envelope(outer_bytes)?;
    let document = decode_structured_document(&inner)?;
    serde_json::from_value(document).map_err(CoreError::TargetDecode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StoredPolicyConfig;
    use prost::Message;

    fn wrap(document_json: &str) -> Vec<u8> {
        let inner = xdsc_proto::Envelope {
            type_url: xdsc_proto::STRUCTURED_DOCUMENT_TYPE_URL.to_owned(),
            value: document_json.as_bytes().to_vec(),
        };
        inner.encode_to_vec()
    }

    #[test]
    fn decodes_double_wrapped_resource() {
        let json = r#"{
            "id": "api-1",
            "version": 1,
            "configuration": {
                "metadata": { "apiId": "a1", "apiName": "demo", "version": "v1" },
                "routes": [
                    { "routeKey": "demo::r1", "policies": [
                        { "name": "log", "version": "1.0.0", "enabled": true, "parameters": {} }
                    ] }
                ]
            }
        }"#;
        let outer_bytes = wrap(json);
        let decoded: StoredPolicyConfig = decode_resource(&outer_bytes).unwrap();
        assert_eq!(decoded.id, "api-1");
        assert_eq!(decoded.configuration.routes.len(), 1);
        assert_eq!(decoded.configuration.routes[0].route_key, "demo::r1");
    }

    #[test]
    fn malformed_inner_envelope_is_reported() {
        let garbage = vec![0xFF, 0xFF, 0xFF];
        let err = decode_resource::<StoredPolicyConfig>(&garbage).unwrap_err();
        assert!(matches!(err, CoreError::InnerEnvelopeDecode(_)));
    }

    #[test]
    fn malformed_structured_document_is_reported() {
        let inner = xdsc_proto::Envelope {
            type_url: xdsc_proto::STRUCTURED_DOCUMENT_TYPE_URL.to_owned(),
            value: b"not json".to_vec(),
        };
        let outer_bytes = inner.encode_to_vec();
        let err = decode_resource::<StoredPolicyConfig>(&outer_bytes).unwrap_err();
        assert!(matches!(err, CoreError::StructuredDocumentDecode(_)));
    }

    #[test]
    fn document_not_matching_target_shape_is_reported() {
        let outer_bytes = wrap(r#"{"unexpected": true}"#);
        let err = decode_resource::<StoredPolicyConfig>(&outer_bytes).unwrap_err();
        assert!(matches!(err, CoreError::TargetDecode(_)));
    }
}
