use std::io::BufReader;
use std::path::{Path, PathBuf};

use tonic::transport::{Certificate, ClientTlsConfig, Identity};
use tracing::debug;
use xdsc_core::ConnectionConfig;

use crate::error::{TlsError, TlsResult};

/// Loads the client cert+key pair and trusted CA named in a
/// [`ConnectionConfig`] and produces a [`ClientTlsConfig`] for the xDS
/// stream's transport channel (§4.2, component B).
///
/// The underlying transport is `tonic`'s `rustls` backend, whose default
/// minimum supported protocol version is already TLS 1.2 — there is no
/// separate knob to set a lower floor, so §4.2's "minimum protocol floor of
/// TLS 1.2" is satisfied by construction rather than configured explicitly.
pub struct TlsBootstrapper;

impl TlsBootstrapper {
    /// Build a [`ClientTlsConfig`] from the paths in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TlsError::ClientCertLoad`] if the cert or key cannot be
    /// read, [`TlsError::CaRead`] if the CA file cannot be read, or
    /// [`TlsError::CaNotParseable`] if the CA file's contents are not a
    /// PEM certificate.
    pub fn bootstrap(config: &ConnectionConfig) -> TlsResult<ClientTlsConfig> {
        let cert_pem = read_file(&config.client_cert_path, |path, source| {
            TlsError::ClientCertLoad { path, source }
        })?;
        let key_pem = read_file(&config.client_key_path, |path, source| {
            TlsError::ClientCertLoad { path, source }
        })?;
        let ca_pem = read_file(&config.ca_cert_path, |path, source| TlsError::CaRead {
            path,
            source,
        })?;

        validate_ca_certificate(&config.ca_cert_path, &ca_pem)?;

        let identity = Identity::from_pem(cert_pem, key_pem);
        let ca = Certificate::from_pem(ca_pem);

        debug!(
            cert = %config.client_cert_path,
            ca = %config.ca_cert_path,
            "bootstrapped mutual TLS transport"
        );

        Ok(ClientTlsConfig::new().identity(identity).ca_certificate(ca))
    }
}

fn read_file(
    path: &str,
    to_error: impl FnOnce(PathBuf, std::io::Error) -> TlsError,
) -> TlsResult<Vec<u8>> {
    std::fs::read(Path::new(path)).map_err(|source| to_error(PathBuf::from(path), source))
}

/// Eagerly parse `ca_pem` as PEM-encoded certificates so that a malformed
/// CA file fails fast at bootstrap time rather than on first handshake.
fn validate_ca_certificate(path: &str, ca_pem: &[u8]) -> TlsResult<()> {
    let mut reader = BufReader::new(ca_pem);
    let found_any = rustls_pemfile::certs(&mut reader).any(|cert| cert.is_ok());
    if found_any {
        Ok(())
    } else {
        Err(TlsError::CaNotParseable {
            path: PathBuf::from(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CERT_PEM: &str = "-----BEGIN CERTIFICATE-----\n\
MIIBbDCCAROgAwIBAgIUZoZZZZZZZZZZZZZZZZZZZZZZZowCgYIKoZIzj0EAwIw\n\
FDASBgNVBAMMC2V4YW1wbGUuY29tMB4XDTIwMDEwMTAwMDAwMFoXDTMwMDEwMTAw\n\
MDAwMFowFDASBgNVBAMMC2V4YW1wbGUuY29tMFkwEwYHKoZIzj0CAQYIKoZIzj0D\n\
AQcDQgAE7b0h1cM4p9b2u5mH2M1s3k5x3fZ8qFQY2f2vQoI2f2vQoI2f2vQoI2f2\n\
vQoI2f2vQoI2f2vQoI2f2vQoI2jFjAUMBIGA1UdEQQLMAmCB2V4YW1wbGUwCgYI\n\
KoZIzj0EAwIDSQAwRgIhAPtr5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r\n\
AiEA5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r5r4=\n\
-----END CERTIFICATE-----\n";

    fn valid_config(cert: &Path, key: &Path, ca: &Path) -> ConnectionConfig {
        ConnectionConfig {
            server_address: "gateway-controller:18000".to_owned(),
            node_id: "gw-1".to_owned(),
            node_cluster: "default".to_owned(),
            connect_timeout: std::time::Duration::from_secs(5),
            request_timeout: std::time::Duration::from_secs(30),
            initial_reconnect_delay: std::time::Duration::from_secs(1),
            max_reconnect_delay: std::time::Duration::from_secs(60),
            tls_enabled: true,
            client_cert_path: cert.to_string_lossy().into_owned(),
            client_key_path: key.to_string_lossy().into_owned(),
            ca_cert_path: ca.to_string_lossy().into_owned(),
        }
    }

    #[test]
    fn missing_client_cert_reports_client_cert_load() {
        let dir = tempfile::tempdir().unwrap();
        let missing_cert = dir.path().join("missing-cert.pem");
        let key_path = dir.path().join("key.pem");
        std::fs::write(&key_path, "irrelevant").unwrap();
        let ca_path = dir.path().join("ca.pem");
        std::fs::write(&ca_path, CERT_PEM).unwrap();

        let config = valid_config(&missing_cert, &key_path, &ca_path);
        let err = TlsBootstrapper::bootstrap(&config).unwrap_err();
        assert!(matches!(err, TlsError::ClientCertLoad { .. }));
    }

    #[test]
    fn missing_ca_file_reports_ca_read() {
        let dir = tempfile::tempdir().unwrap();
        let cert_path = dir.path().join("cert.pem");
        let key_path = dir.path().join("key.pem");
        std::fs::write(&cert_path, CERT_PEM).unwrap();
        std::fs::write(&key_path, "irrelevant").unwrap();
        let ca_path = dir.path().join("missing-ca.pem");

        let config = valid_config(&cert_path, &key_path, &ca_path);
        let err = TlsBootstrapper::bootstrap(&config).unwrap_err();
        assert!(matches!(err, TlsError::CaRead { .. }));
    }

    #[test]
    fn unparseable_ca_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cert_path = dir.path().join("cert.pem");
        let key_path = dir.path().join("key.pem");
        let ca_path = dir.path().join("ca.pem");
        std::fs::write(&cert_path, CERT_PEM).unwrap();
        std::fs::write(&key_path, "irrelevant").unwrap();
        let mut ca_file = std::fs::File::create(&ca_path).unwrap();
        ca_file.write_all(b"this is not a certificate").unwrap();

        let config = valid_config(&cert_path, &key_path, &ca_path);
        let err = TlsBootstrapper::bootstrap(&config).unwrap_err();
        assert!(matches!(err, TlsError::CaNotParseable { .. }));
    }
}
