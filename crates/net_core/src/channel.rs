//! In-proc channel for replication messages (bytes).
//!
//! Backed by crossbeam channels so receivers are cloneable and queue depth is
//! observable. Exposes non-blocking send/drain helpers only; the engine never
//! blocks on the wire.

use crossbeam_channel::{Receiver, Sender};

#[derive(Clone)]
pub struct Tx(Sender<Vec<u8>>);
#[derive(Clone)]
pub struct Rx(Receiver<Vec<u8>>);

/// Create an unbounded sender/receiver pair.
#[must_use]
pub fn channel_unbounded() -> (Tx, Rx) {
    let (s, r) = crossbeam_channel::unbounded::<Vec<u8>>();
    (Tx(s), Rx(r))
}

/// Create a bounded sender/receiver pair.
#[must_use]
pub fn channel_bounded(capacity: usize) -> (Tx, Rx) {
    let (s, r) = crossbeam_channel::bounded::<Vec<u8>>(capacity);
    (Tx(s), Rx(r))
}

impl Tx {
    /// Try to send; returns false if the channel is full or the receiver is dropped.
    #[must_use]
    pub fn try_send(&self, bytes: Vec<u8>) -> bool {
        self.0.try_send(bytes).is_ok()
    }
}

impl Rx {
    /// Non-blocking receive of a single message.
    #[must_use]
    pub fn try_recv(&self) -> Option<Vec<u8>> {
        self.0.try_recv().ok()
    }
    /// Drain all currently queued messages.
    #[must_use]
    pub fn drain(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(b) = self.try_recv() {
            out.push(b);
        }
        out
    }
    /// Number of queued messages.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}
