use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// Connection-level configuration for the xDS client (§3 `ConnectionConfig`).
///
/// Constructing a [`ConnectionConfig`] never fails; call [`Self::validate`]
/// before handing it to the client, the way `xdsc_client::XdsClient::new`
/// does on construction (§4.8).
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// `host:port` of the gateway controller.
    pub server_address: String,
    /// Node identity reported in every discovery request.
    pub node_id: String,
    /// Logical cluster the node belongs to.
    pub node_cluster: String,
    /// Timeout applied to the initial dial.
    pub connect_timeout: Duration,
    /// Timeout applied to individual receive operations.
    pub request_timeout: Duration,
    /// Initial reconnect delay, before any backoff growth.
    pub initial_reconnect_delay: Duration,
    /// Reconnect delay ceiling.
    pub max_reconnect_delay: Duration,
    /// Whether to dial over mutual TLS.
    pub tls_enabled: bool,
    /// Path to the client certificate (required when `tls_enabled`).
    pub client_cert_path: String,
    /// Path to the client private key (required when `tls_enabled`).
    pub client_key_path: String,
    /// Path to the trusted CA certificate (required when `tls_enabled`).
    pub ca_cert_path: String,
}

impl ConnectionConfig {
    /// Validate the invariants listed in §3: all timeouts strictly positive,
    /// node id non-empty, and — when TLS is enabled — every certificate path
    /// non-empty.
    pub fn validate(&self) -> CoreResult<()> {
        if self.server_address.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "server address must not be empty".to_owned(),
            ));
        }
        if self.node_id.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "node id must not be empty".to_owned(),
            ));
        }
        for (name, d) in [
            ("connect_timeout", self.connect_timeout),
            ("request_timeout", self.request_timeout),
            ("initial_reconnect_delay", self.initial_reconnect_delay),
            ("max_reconnect_delay", self.max_reconnect_delay),
        ] {
            if d.is_zero() {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must be strictly positive"
                )));
            }
        }
        if self.tls_enabled {
            for (name, path) in [
                ("client_cert_path", &self.client_cert_path),
                ("client_key_path", &self.client_key_path),
                ("ca_cert_path", &self.ca_cert_path),
            ] {
                if path.trim().is_empty() {
                    return Err(CoreError::InvalidConfig(format!(
                        "{name} must not be empty when TLS is enabled"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ConnectionConfig {
        ConnectionConfig {
            server_address: "gateway-controller:18000".to_owned(),
            node_id: "gw-1".to_owned(),
            node_cluster: "default".to_owned(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            initial_reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(60),
            tls_enabled: false,
            client_cert_path: String::new(),
            client_key_path: String::new(),
            ca_cert_path: String::new(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn empty_server_address_rejected() {
        let mut cfg = valid_config();
        cfg.server_address.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_node_id_rejected() {
        let mut cfg = valid_config();
        cfg.node_id.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut cfg = valid_config();
        cfg.connect_timeout = Duration::ZERO;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tls_enabled_requires_all_paths() {
        let mut cfg = valid_config();
        cfg.tls_enabled = true;
        assert!(cfg.validate().is_err());
        cfg.client_cert_path = "/etc/xdsc/cert.pem".to_owned();
        cfg.client_key_path = "/etc/xdsc/key.pem".to_owned();
        cfg.ca_cert_path = "/etc/xdsc/ca.pem".to_owned();
        assert!(cfg.validate().is_ok());
    }
}
