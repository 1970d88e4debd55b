use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use xdsc_core::ConnectionConfig;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{ConfigSource, ConnectionConfigFile};

const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// The fully-resolved connection config, plus which layer set each field
/// (§4.9 `ResolvedXdscConfig`). Read once at process start; never
/// persisted.
#[derive(Debug, Clone)]
pub struct ResolvedXdscConfig {
    /// The resolved, validated connection configuration.
    pub connection: ConnectionConfig,
    /// Which layer (`defaults` | `file` | `env`) set each field, keyed by
    /// its dotted path (e.g. `"tls.enabled"`).
    pub provenance: HashMap<String, ConfigSource>,
}

/// Load and resolve configuration by merging the embedded `defaults.toml`,
/// an optional config file, and `XDSC_*` environment variables, in that
/// precedence order — lowest to highest (§4.9).
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`]/[`ConfigError::ParseError`] if
/// `path` is given but cannot be read or parsed, [`ConfigError::InvalidEnvValue`]
/// if an `XDSC_*` variable holds an unparseable value for its field, or
/// [`ConfigError::Invalid`] if the fully-merged result fails
/// [`ConnectionConfig::validate`].
pub fn load(path: Option<&Path>) -> ConfigResult<ResolvedXdscConfig> {
    let defaults: ConnectionConfigFile =
        toml::from_str(DEFAULTS_TOML).map_err(ConfigError::DefaultsCorrupt)?;

    let mut provenance = HashMap::new();
    mark_all(ConfigSource::Defaults, &mut provenance);
    let mut resolved = defaults;

    if let Some(path) = path {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConnectionConfigFile =
            toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
                path: path.display().to_string(),
                source,
            })?;
        mark_present(&file, ConfigSource::File, &mut provenance);
        resolved.overlay(&file);
    }

    let env_overrides = read_env_overrides()?;
    mark_present(&env_overrides, ConfigSource::Env, &mut provenance);
    resolved.overlay(&env_overrides);

    let connection = to_connection_config(&resolved);
    connection.validate()?;

    Ok(ResolvedXdscConfig {
        connection,
        provenance,
    })
}

fn mark_all(source: ConfigSource, provenance: &mut HashMap<String, ConfigSource>) {
    for path in FIELD_PATHS {
        provenance.insert((*path).to_owned(), source);
    }
}

fn mark_present(file: &ConnectionConfigFile, source: ConfigSource, provenance: &mut HashMap<String, ConfigSource>) {
    if file.server.address.is_some() {
        provenance.insert("server.address".to_owned(), source);
    }
    if file.node.id.is_some() {
        provenance.insert("node.id".to_owned(), source);
    }
    if file.node.cluster.is_some() {
        provenance.insert("node.cluster".to_owned(), source);
    }
    if file.tls.enabled.is_some() {
        provenance.insert("tls.enabled".to_owned(), source);
    }
    if file.tls.client_cert_path.is_some() {
        provenance.insert("tls.client_cert_path".to_owned(), source);
    }
    if file.tls.client_key_path.is_some() {
        provenance.insert("tls.client_key_path".to_owned(), source);
    }
    if file.tls.ca_cert_path.is_some() {
        provenance.insert("tls.ca_cert_path".to_owned(), source);
    }
    if file.timeouts.connect_secs.is_some() {
        provenance.insert("timeouts.connect_secs".to_owned(), source);
    }
    if file.timeouts.request_secs.is_some() {
        provenance.insert("timeouts.request_secs".to_owned(), source);
    }
    if file.timeouts.initial_reconnect_secs.is_some() {
        provenance.insert("timeouts.initial_reconnect_secs".to_owned(), source);
    }
    if file.timeouts.max_reconnect_secs.is_some() {
        provenance.insert("timeouts.max_reconnect_secs".to_owned(), source);
    }
}

const FIELD_PATHS: &[&str] = &[
    "server.address",
    "node.id",
    "node.cluster",
    "tls.enabled",
    "tls.client_cert_path",
    "tls.client_key_path",
    "tls.ca_cert_path",
    "timeouts.connect_secs",
    "timeouts.request_secs",
    "timeouts.initial_reconnect_secs",
    "timeouts.max_reconnect_secs",
];

fn read_env_overrides() -> ConfigResult<ConnectionConfigFile> {
    let mut file = ConnectionConfigFile::default();

    if let Ok(val) = std::env::var("XDSC_SERVER_ADDRESS") {
        file.server.address = Some(val);
    }
    if let Ok(val) = std::env::var("XDSC_NODE_ID") {
        file.node.id = Some(val);
    }
    if let Ok(val) = std::env::var("XDSC_NODE_CLUSTER") {
        file.node.cluster = Some(val);
    }
    if let Ok(val) = std::env::var("XDSC_TLS_ENABLED") {
        file.tls.enabled = Some(parse_bool("XDSC_TLS_ENABLED", &val)?);
    }
    if let Ok(val) = std::env::var("XDSC_TLS_CLIENT_CERT_PATH") {
        file.tls.client_cert_path = Some(val);
    }
    if let Ok(val) = std::env::var("XDSC_TLS_CLIENT_KEY_PATH") {
        file.tls.client_key_path = Some(val);
    }
    if let Ok(val) = std::env::var("XDSC_TLS_CA_CERT_PATH") {
        file.tls.ca_cert_path = Some(val);
    }
    if let Ok(val) = std::env::var("XDSC_TIMEOUTS_CONNECT_SECS") {
        file.timeouts.connect_secs = Some(parse_u64("XDSC_TIMEOUTS_CONNECT_SECS", &val)?);
    }
    if let Ok(val) = std::env::var("XDSC_TIMEOUTS_REQUEST_SECS") {
        file.timeouts.request_secs = Some(parse_u64("XDSC_TIMEOUTS_REQUEST_SECS", &val)?);
    }
    if let Ok(val) = std::env::var("XDSC_TIMEOUTS_INITIAL_RECONNECT_SECS") {
        file.timeouts.initial_reconnect_secs =
            Some(parse_u64("XDSC_TIMEOUTS_INITIAL_RECONNECT_SECS", &val)?);
    }
    if let Ok(val) = std::env::var("XDSC_TIMEOUTS_MAX_RECONNECT_SECS") {
        file.timeouts.max_reconnect_secs = Some(parse_u64("XDSC_TIMEOUTS_MAX_RECONNECT_SECS", &val)?);
    }

    Ok(file)
}

fn parse_bool(var_name: &str, val: &str) -> ConfigResult<bool> {
    val.parse().map_err(|_| ConfigError::InvalidEnvValue {
        var_name: var_name.to_owned(),
        message: format!("{val:?} is not a boolean"),
    })
}

fn parse_u64(var_name: &str, val: &str) -> ConfigResult<u64> {
    val.parse().map_err(|_| ConfigError::InvalidEnvValue {
        var_name: var_name.to_owned(),
        message: format!("{val:?} is not a non-negative integer"),
    })
}

fn to_connection_config(file: &ConnectionConfigFile) -> ConnectionConfig {
    ConnectionConfig {
        server_address: file.server.address.clone().unwrap_or_default(),
        node_id: file.node.id.clone().unwrap_or_default(),
        node_cluster: file.node.cluster.clone().unwrap_or_default(),
        connect_timeout: Duration::from_secs(file.timeouts.connect_secs.unwrap_or_default()),
        request_timeout: Duration::from_secs(file.timeouts.request_secs.unwrap_or_default()),
        initial_reconnect_delay: Duration::from_secs(
            file.timeouts.initial_reconnect_secs.unwrap_or_default(),
        ),
        max_reconnect_delay: Duration::from_secs(file.timeouts.max_reconnect_secs.unwrap_or_default()),
        tls_enabled: file.tls.enabled.unwrap_or_default(),
        client_cert_path: file.tls.client_cert_path.clone().unwrap_or_default(),
        client_key_path: file.tls.client_key_path.clone().unwrap_or_default(),
        ca_cert_path: file.tls.ca_cert_path.clone().unwrap_or_default(),
    }
}
