//! TCP acceptor.
//!
//! # Responsibilities
//! - Bind the listening endpoint with address reuse enabled
//! - Accept connections and hand each one to a new session
//! - Re-arm after every accept, success or failure, until shutdown
//!
//! # Design Decisions
//! - Bind failure is loud and final: a misconfigured endpoint will not
//!   self-heal, so there is no retry
//! - A cancelled accept (shutdown) is expected and silent; any other accept
//!   error is logged and the loop re-arms

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};

use crate::config::ListenerConfig;
use crate::lifecycle::controller::ServiceContext;
use crate::session::Session;

const ACCEPT_BACKLOG: u32 = 1024;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to open, bind or listen on the endpoint.
    #[error("failed to bind: {0}")]
    Bind(#[source] std::io::Error),
}

/// Owns the listening endpoint for the lifetime of one server run.
pub struct Acceptor {
    inner: TcpListener,
}

impl Acceptor {
    /// Open, bind and listen. Synchronous; fails loudly.
    pub fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
            ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(ListenerError::Bind)?;

        socket.set_reuseaddr(true).map_err(ListenerError::Bind)?;
        socket.bind(addr).map_err(ListenerError::Bind)?;
        let listener = socket.listen(ACCEPT_BACKLOG).map_err(ListenerError::Bind)?;

        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;
        tracing::info!(address = %local_addr, "Listener bound");

        Ok(Self { inner: listener })
    }

    /// The local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Self-perpetuating accept loop: submit one accept, hand the result to
    /// a new session, re-arm. Ends only through shutdown, which also closes
    /// the listening socket.
    pub async fn run(self, context: Arc<ServiceContext>) {
        loop {
            let accepted = tokio::select! {
                result = self.inner.accept() => result,
                _ = context.stop.triggered() => break,
            };

            match accepted {
                Ok((stream, peer)) => {
                    tracing::debug!(peer = %peer, "Connection accepted");
                    Session::spawn(stream, Arc::clone(&context));
                }
                Err(error) => {
                    // Transient per-connection failure; the server stays up.
                    tracing::warn!(error = %error, "Accept failed");
                    context.log.line(&format!("Accept failed: {}", error));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(bind_address: &str) -> ListenerConfig {
        ListenerConfig {
            enabled: true,
            bind_address: bind_address.to_string(),
        }
    }

    #[tokio::test]
    async fn binds_an_ephemeral_port() {
        let acceptor = Acceptor::bind(&config_for("127.0.0.1:0")).expect("bind");
        let addr = acceptor.local_addr().expect("local addr");
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn occupied_port_fails_loudly() {
        let first = Acceptor::bind(&config_for("127.0.0.1:0")).expect("bind");
        let addr = first.local_addr().expect("local addr");

        let second = Acceptor::bind(&config_for(&addr.to_string()));
        assert!(matches!(second, Err(ListenerError::Bind(_))));
    }

    #[tokio::test]
    async fn unparseable_address_fails_loudly() {
        let result = Acceptor::bind(&config_for("not-an-address"));
        assert!(matches!(result, Err(ListenerError::Bind(_))));
    }
}
