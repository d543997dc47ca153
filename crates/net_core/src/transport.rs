//! Transport abstraction for replication bytes.
//!
//! Implementations:
//! - `LocalLoopbackTransport`: in-proc bounded channels for tests and
//!   single-process authority/observer pairs
//! - (future) remote transports owned by the host process

use crate::channel;

#[derive(Debug)]
pub enum TrySendError {
    Full,
    Disconnected,
}

/// Minimal transport trait for byte messages. Per-peer ordering is assumed
/// reliable; cross-peer ordering is not.
pub trait Transport: Send + Sync {
    fn try_send(&self, bytes: Vec<u8>) -> Result<(), TrySendError>;
    fn try_recv(&self) -> Option<Vec<u8>>;
    fn depth(&self) -> usize;
}

/// In-process loopback pair; what `a` sends, `b` receives, and vice versa.
#[derive(Clone)]
pub struct LocalLoopbackTransport {
    tx: channel::Tx,
    rx: channel::Rx,
}

impl LocalLoopbackTransport {
    #[must_use]
    pub fn new(capacity: usize) -> (Self, Self) {
        let (tx_a, rx_a) = channel::channel_bounded(capacity);
        let (tx_b, rx_b) = channel::channel_bounded(capacity);
        let a = Self { tx: tx_a, rx: rx_b };
        let b = Self { tx: tx_b, rx: rx_a };
        (a, b)
    }
    #[must_use]
    pub fn from_channel_pair(tx: channel::Tx, rx: channel::Rx) -> Self {
        Self { tx, rx }
    }
}

impl Transport for LocalLoopbackTransport {
    fn try_send(&self, bytes: Vec<u8>) -> Result<(), TrySendError> {
        if self.tx.try_send(bytes) {
            Ok(())
        } else {
            Err(TrySendError::Full)
        }
    }
    fn try_recv(&self) -> Option<Vec<u8>> {
        self.rx.try_recv()
    }
    fn depth(&self) -> usize {
        self.rx.depth()
    }
}
