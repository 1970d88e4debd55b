/// Outer `type_url` for a policy-chain resource (§3).
pub const POLICY_CHAIN_TYPE_URL: &str = "type.googleapis.com/policy.xds.v3.PolicyChainResource";

/// Outer `type_url` for an API-key state-of-world or operation resource.
pub const API_KEY_STATE_TYPE_URL: &str = "type.googleapis.com/policy.xds.v3.APIKeyResource";

/// Outer `type_url` for a lazy-resource snapshot.
pub const LAZY_RESOURCE_TYPE_URL: &str = "type.googleapis.com/policy.xds.v3.LazyResource";

/// The closed set of outer type URLs this core recognizes (§3, §6). Any
/// other value is warn-and-skip, never an error.
pub const RECOGNIZED_TYPE_URLS: &[&str] = &[
    POLICY_CHAIN_TYPE_URL,
    API_KEY_STATE_TYPE_URL,
    LAZY_RESOURCE_TYPE_URL,
];

/// Whether `type_url` is one of [`RECOGNIZED_TYPE_URLS`].
#[must_use]
pub fn is_recognized(type_url: &str) -> bool {
    RECOGNIZED_TYPE_URLS.contains(&type_url)
}

/// Separator used to derive a metrics `api` label from a `routeKey`
/// (§4.5, §9 "Decision"). Kept as a named constant so a control-plane
/// convention change is a one-line diff, not a grep-and-replace.
pub const ROUTE_KEY_API_SEPARATOR: &str = "::";

/// Split `route_key` on [`ROUTE_KEY_API_SEPARATOR`], returning the prefix as
/// the metrics `api` label, or the whole key when the separator is absent
/// (§8 invariant 11).
#[must_use]
pub fn api_name_from_route_key(route_key: &str) -> &str {
    route_key
        .split_once(ROUTE_KEY_API_SEPARATOR)
        .map_or(route_key, |(api, _)| api)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_closed_set() {
        assert!(is_recognized(POLICY_CHAIN_TYPE_URL));
        assert!(is_recognized(API_KEY_STATE_TYPE_URL));
        assert!(is_recognized(LAZY_RESOURCE_TYPE_URL));
        assert!(!is_recognized("type.googleapis.com/something.else"));
    }

    #[test]
    fn api_name_splits_on_double_colon() {
        assert_eq!(api_name_from_route_key("demo::r1"), "demo");
        assert_eq!(api_name_from_route_key("no-separator"), "no-separator");
        assert_eq!(api_name_from_route_key("a::b::c"), "a");
    }
}
