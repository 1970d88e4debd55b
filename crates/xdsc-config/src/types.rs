use serde::Deserialize;

/// The on-disk/embedded-defaults shape, every field optional so a partial
/// file only overrides what it names (§4.9 "three-tier shape").
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionConfigFile {
    /// `[server]` section.
    #[serde(default)]
    pub server: ServerSection,
    /// `[node]` section.
    #[serde(default)]
    pub node: NodeSection,
    /// `[tls]` section.
    #[serde(default)]
    pub tls: TlsSection,
    /// `[timeouts]` section.
    #[serde(default)]
    pub timeouts: TimeoutsSection,
}

/// `[server]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    /// `host:port` of the gateway controller.
    pub address: Option<String>,
}

/// `[node]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeSection {
    /// Node identity reported in discovery requests.
    pub id: Option<String>,
    /// Logical cluster the node belongs to.
    pub cluster: Option<String>,
}

/// `[tls]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsSection {
    /// Whether to dial over mutual TLS.
    pub enabled: Option<bool>,
    /// Path to the client certificate.
    pub client_cert_path: Option<String>,
    /// Path to the client private key.
    pub client_key_path: Option<String>,
    /// Path to the trusted CA certificate.
    pub ca_cert_path: Option<String>,
}

/// `[timeouts]`, all in whole seconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeoutsSection {
    /// Dial timeout, seconds.
    pub connect_secs: Option<u64>,
    /// Receive-operation timeout, seconds.
    pub request_secs: Option<u64>,
    /// Initial reconnect delay, seconds.
    pub initial_reconnect_secs: Option<u64>,
    /// Reconnect delay ceiling, seconds.
    pub max_reconnect_secs: Option<u64>,
}

impl ConnectionConfigFile {
    /// Overlay `overlay`'s present fields onto `self`, field by field —
    /// a shallow, per-field merge, not `self = overlay`, so a file naming
    /// only `[tls]` doesn't blank out `[server]` (§4.9 three-tier merge).
    pub fn overlay(&mut self, overlay: &Self) {
        if overlay.server.address.is_some() {
            self.server.address.clone_from(&overlay.server.address);
        }
        if overlay.node.id.is_some() {
            self.node.id.clone_from(&overlay.node.id);
        }
        if overlay.node.cluster.is_some() {
            self.node.cluster.clone_from(&overlay.node.cluster);
        }
        if overlay.tls.enabled.is_some() {
            self.tls.enabled = overlay.tls.enabled;
        }
        if overlay.tls.client_cert_path.is_some() {
            self.tls.client_cert_path.clone_from(&overlay.tls.client_cert_path);
        }
        if overlay.tls.client_key_path.is_some() {
            self.tls.client_key_path.clone_from(&overlay.tls.client_key_path);
        }
        if overlay.tls.ca_cert_path.is_some() {
            self.tls.ca_cert_path.clone_from(&overlay.tls.ca_cert_path);
        }
        if overlay.timeouts.connect_secs.is_some() {
            self.timeouts.connect_secs = overlay.timeouts.connect_secs;
        }
        if overlay.timeouts.request_secs.is_some() {
            self.timeouts.request_secs = overlay.timeouts.request_secs;
        }
        if overlay.timeouts.initial_reconnect_secs.is_some() {
            self.timeouts.initial_reconnect_secs = overlay.timeouts.initial_reconnect_secs;
        }
        if overlay.timeouts.max_reconnect_secs.is_some() {
            self.timeouts.max_reconnect_secs = overlay.timeouts.max_reconnect_secs;
        }
    }
}

/// Which configuration layer resolved a field's final value (§4.9
/// `ResolvedXdscConfig` "provenance").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// The embedded `defaults.toml`.
    Defaults,
    /// The optional file named at `load` time.
    File,
    /// An `XDSC_*` environment variable.
    Env,
}
