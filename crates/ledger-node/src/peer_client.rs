use async_trait::async_trait;
use ledger_core::{ChainSnapshot, PeerError, PeerPort};
use reqwest::Client;
use std::time::Duration;

/// Fetches peer chains over `GET http://{peer}/chain`.
#[derive(Clone)]
pub struct HttpPeerPort {
    http: Client,
    timeout: Duration,
}

impl HttpPeerPort {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, timeout })
    }
}

#[async_trait]
impl PeerPort for HttpPeerPort {
    async fn get_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let transport = |e: reqwest::Error| {
            if e.is_timeout() {
                PeerError::Timeout {
                    peer: peer.to_string(),
                    timeout: self.timeout,
                }
            } else {
                PeerError::Unreachable {
                    peer: peer.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        let resp = self
            .http
            .get(format!("http://{peer}/chain"))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport)?;

        let body = resp.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| PeerError::Malformed {
            peer: peer.to_string(),
            reason: e.to_string(),
        })
    }
}
