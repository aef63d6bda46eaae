//! UDP connection to the plugin.

use std::net::SocketAddr;

use callmap_common::config::RelayConfig;
use callmap_common::error::{CallmapError, CallmapResult};
use tokio::net::UdpSocket;

use crate::command::CropCommand;

/// Owned socket for sending commands to the plugin.
///
/// Created once by the host application and dropped on shutdown.
#[derive(Debug)]
pub struct RelayConnection {
    socket: UdpSocket,
    target: SocketAddr,
}

impl RelayConnection {
    /// Bind an ephemeral local port and resolve the plugin address.
    pub async fn connect(config: &RelayConfig) -> CallmapResult<Self> {
        let target = tokio::net::lookup_host((config.host.as_str(), config.port))
            .await
            .map_err(|e| CallmapError::relay(format!("Cannot resolve {}: {e}", config.host)))?
            .next()
            .ok_or_else(|| CallmapError::relay(format!("No address for {}", config.host)))?;

        let bind_addr: SocketAddr = if target.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        tracing::debug!(%target, local = ?socket.local_addr().ok(), "Relay socket ready");
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Send one command as a JSON datagram. Returns the bytes sent.
    pub async fn send(&self, command: &CropCommand) -> CallmapResult<usize> {
        let payload = command.to_json()?;
        let sent = self
            .socket
            .send_to(payload.as_bytes(), self.target)
            .await
            .map_err(|e| CallmapError::relay(format!("Send to {} failed: {e}", self.target)))?;
        tracing::info!(
            target = %self.target,
            cameras = command.cameras.len(),
            bytes = sent,
            "Sent crop command"
        );
        Ok(sent)
    }
}
