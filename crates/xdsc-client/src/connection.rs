use tonic::transport::Channel;
use xdsc_core::ConnectionConfig;
use xdsc_proto::AggregatedDiscoveryServiceClient;
use xdsc_tls::TlsBootstrapper;

use crate::error::{ClientError, ClientResult};

/// Dial the gateway controller named in `config`, over mutual TLS when
/// enabled, honoring `config.connect_timeout` (§4.8 "dial").
///
/// `config.request_timeout` is not applied here: the stream this channel
/// backs is long-lived (§1), so it is enforced per receive operation around
/// each `inbound.message()` poll in `client.rs`, not as a ceiling on the
/// whole call.
///
/// # Errors
///
/// Returns [`ClientError::InvalidConfig`] if `server_address` is not a
/// valid URI, [`ClientError::Tls`] if the TLS bootstrap fails, or
/// [`ClientError::Dial`] if the channel cannot be connected.
pub async fn dial(
    config: &ConnectionConfig,
) -> ClientResult<AggregatedDiscoveryServiceClient<Channel>> {
    let scheme = if config.tls_enabled { "https" } else { "http" };
    let uri = format!("{scheme}://{}", config.server_address);

    let mut endpoint = Channel::from_shared(uri)
        .map_err(|err| ClientError::InvalidConfig(err.to_string()))?
        .connect_timeout(config.connect_timeout);

    if config.tls_enabled {
        let tls = TlsBootstrapper::bootstrap(config)?;
        endpoint = endpoint.tls_config(tls)?;
    }

    let channel = endpoint.connect().await?;
    Ok(AggregatedDiscoveryServiceClient::new(channel))
}
