//! Opaque remote submission.
//!
//! The signup form posts to a third-party endpoint whose response cannot be
//! observed (the browser's `no-cors` mode). The only signal is whether the
//! call itself failed, so a call that completes is reported as
//! [`RemoteAttempt::AttemptSucceededUnverified`] regardless of what the
//! server decided.

use std::time::Duration;

use tracing::debug;

use crate::error::WaitlistError;

/// What the client can know about a remote submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAttempt {
    /// The request was sent and some response came back. Its status and
    /// body were not inspected.
    AttemptSucceededUnverified,
    /// The request could not be completed (DNS, connect, TLS, timeout).
    TransportError(String),
}

/// A one-shot, fire-and-forget registration channel.
#[async_trait::async_trait]
pub trait RemoteTransport: Send + Sync + 'static {
    /// Send `email` once. Never retries.
    async fn submit(&self, email: &str) -> RemoteAttempt;
}

/// Posts `email=<address>` as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemote {
    /// Create a transport for `endpoint`.
    ///
    /// With `timeout` set, a request that has not completed in time counts
    /// as a transport error. Without it the call may wait indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`WaitlistError::Transport`] if the HTTP client cannot be
    /// built (for example, no TLS backend available).
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, WaitlistError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| WaitlistError::Transport {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl RemoteTransport for HttpRemote {
    async fn submit(&self, email: &str) -> RemoteAttempt {
        let result = self
            .client
            .post(&self.endpoint)
            .form(&[("email", email)])
            .send()
            .await;

        match result {
            // The response is dropped unread.
            Ok(_) => RemoteAttempt::AttemptSucceededUnverified,
            Err(e) => {
                debug!(endpoint = %self.endpoint, error = %e, "remote submission failed");
                RemoteAttempt::TransportError(e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        // Port 9 on localhost: nothing listens there in test environments.
        let remote = HttpRemote::new("http://127.0.0.1:9/exec", Some(Duration::from_secs(2))).unwrap();
        let attempt = remote.submit("user@example.com").await;
        assert!(matches!(attempt, RemoteAttempt::TransportError(_)));
    }

    #[tokio::test]
    async fn any_response_counts_as_unverified_success() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            // The body is the only place the address appears.
            while !String::from_utf8_lossy(&request).contains("example.com") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 409 Conflict\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await
                .unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        let remote = HttpRemote::new(format!("http://{addr}/exec"), Some(Duration::from_secs(5))).unwrap();
        let attempt = remote.submit("user@example.com").await;
        assert_eq!(attempt, RemoteAttempt::AttemptSucceededUnverified);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /exec"));
        assert!(request.contains("application/x-www-form-urlencoded"));
        assert!(request.contains("email=user%40example.com"));
    }
}
