use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use futures::Stream;
use tokio_stream::StreamExt;
use tonic::{Request, Response, Status, Streaming};
use xdsc_proto::{AggregatedDiscoveryService, DiscoveryRequest, DiscoveryResponse};

/// An in-process fake of the aggregated discovery gRPC service: replays a
/// canned sequence of [`DiscoveryResponse`]s to whichever client connects,
/// and records every [`DiscoveryRequest`] it receives (subscribes, ACKs,
/// NACKs) for test assertions, the way `xdsc-client`'s reconnect tests
/// need to observe both sides of the stream.
#[derive(Clone, Default)]
pub struct FakeDiscoveryServer {
    responses: Arc<Mutex<VecDeque<DiscoveryResponse>>>,
    received: Arc<Mutex<Vec<DiscoveryRequest>>>,
}

impl FakeDiscoveryServer {
    /// A server with no canned responses queued yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be sent to the next (or current) connected
    /// client, in order.
    pub fn push_response(&self, response: DiscoveryResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn received(&self) -> Vec<DiscoveryRequest> {
        self.received.lock().unwrap().clone()
    }
}

#[tonic::async_trait]
impl AggregatedDiscoveryService for FakeDiscoveryServer {
    type StreamAggregatedResourcesStream =
        Pin<Box<dyn Stream<Item = Result<DiscoveryResponse, Status>> + Send + 'static>>;

    async fn stream_aggregated_resources(
        &self,
        request: Request<Streaming<DiscoveryRequest>>,
    ) -> Result<Response<Self::StreamAggregatedResourcesStream>, Status> {
        let mut inbound = request.into_inner();
        let received = Arc::clone(&self.received);
        tokio::spawn(async move {
            while let Some(Ok(req)) = inbound.next().await {
                received.lock().unwrap().push(req);
            }
        });

        let queued: Vec<DiscoveryResponse> = self.responses.lock().unwrap().drain(..).collect();
        let stream = tokio_stream::iter(queued.into_iter().map(Ok));
        Ok(Response::new(Box::pin(stream)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_response_queues_in_order() {
        let server = FakeDiscoveryServer::new();
        server.push_response(DiscoveryResponse {
            version_info: "1".to_owned(),
            resources: Vec::new(),
            type_url: "policy_chain".to_owned(),
            nonce: "n1".to_owned(),
        });
        server.push_response(DiscoveryResponse {
            version_info: "2".to_owned(),
            resources: Vec::new(),
            type_url: "policy_chain".to_owned(),
            nonce: "n2".to_owned(),
        });

        let queued = server.responses.lock().unwrap();
        assert_eq!(queued[0].nonce, "n1");
        assert_eq!(queued[1].nonce, "n2");
    }

    #[test]
    fn received_starts_empty() {
        let server = FakeDiscoveryServer::new();
        assert!(server.received().is_empty());
    }
}
