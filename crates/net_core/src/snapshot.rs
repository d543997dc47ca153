//! Snapshot encode/decode traits for replication payloads.
//!
//! Payloads stay hand-encoded little-endian so the wire size of each message
//! is fixed and auditable; later phases can swap in a generated codec without
//! breaking clients of these traits.

/// Types implementing snapshot encoding write themselves into a byte buffer.
pub trait SnapshotEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing snapshot decoding reconstruct themselves from a byte slice.
pub trait SnapshotDecode: Sized {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self>;
}
