//! Handle for the external bus gateway
//!
//! The gateway owns the serial transport, framing and retries on the other
//! side of a channel pair; this handle only identifies the gateway and
//! forwards encoded telegrams to it. Inbound telegrams reach the bridge
//! through the channel wired up in `main`.

use crate::error::{Result, SiroccoError};
use crate::telegram::Telegram;
use tokio::sync::mpsc;

/// Handle to the transport collaborator
#[derive(Debug, Clone)]
pub struct Gateway {
    id: u32,
    name: String,
    outbound: mpsc::UnboundedSender<Telegram>,
}

impl Gateway {
    /// Create a handle with the given id over an outbound channel
    pub fn new(id: u32, name: String, outbound: mpsc::UnboundedSender<Telegram>) -> Self {
        Self { id, name, outbound }
    }

    /// Unique gateway id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Human-readable gateway name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hand an encoded telegram to the transport
    pub fn send_message(&self, telegram: Telegram) -> Result<()> {
        self.outbound
            .send(telegram)
            .map_err(|_| SiroccoError::gateway("transport channel closed"))
    }
}
