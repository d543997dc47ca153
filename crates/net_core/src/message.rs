//! Authority <-> observer fire messages.
//! Minimal binary encoding with a leading tag distinct from snapshots.

use crate::snapshot::{SnapshotDecode, SnapshotEncode};
use glam::IVec3;

pub const TAG_FIRE_MSG: u8 = 0xF1;

/// Every message is tag + kind + coordinate + cause, 18 bytes on the wire.
pub const ENCODED_LEN: usize = 1 + 1 + 12 + 4;

/// Originating-cause identifier (entity id on the host side; -1 = none).
pub type CauseId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireMsg {
    /// Ignition succeeded on the authority (or is being requested of it).
    Ignite { pos: IVec3, cause: CauseId },
    /// A fire entry left the active map.
    Remove { pos: IVec3, cause: CauseId },
    /// A cell was extinguished and placed under suppression.
    Extinguish { pos: IVec3, cause: CauseId },
    /// The suppression sweep evicted a coordinate; drop its lingering cue.
    ClearVisualCue { pos: IVec3, cause: CauseId },
}

impl FireMsg {
    #[must_use]
    pub fn pos(&self) -> IVec3 {
        match self {
            Self::Ignite { pos, .. }
            | Self::Remove { pos, .. }
            | Self::Extinguish { pos, .. }
            | Self::ClearVisualCue { pos, .. } => *pos,
        }
    }

    #[must_use]
    pub fn cause(&self) -> CauseId {
        match self {
            Self::Ignite { cause, .. }
            | Self::Remove { cause, .. }
            | Self::Extinguish { cause, .. }
            | Self::ClearVisualCue { cause, .. } => *cause,
        }
    }

    fn kind(&self) -> u8 {
        match self {
            Self::Ignite { .. } => 0,
            Self::Remove { .. } => 1,
            Self::Extinguish { .. } => 2,
            Self::ClearVisualCue { .. } => 3,
        }
    }
}

impl SnapshotEncode for FireMsg {
    fn encode(&self, out: &mut Vec<u8>) {
        out.reserve(ENCODED_LEN);
        out.push(TAG_FIRE_MSG);
        out.push(self.kind());
        let p = self.pos();
        out.extend_from_slice(&p.x.to_le_bytes());
        out.extend_from_slice(&p.y.to_le_bytes());
        out.extend_from_slice(&p.z.to_le_bytes());
        out.extend_from_slice(&self.cause().to_le_bytes());
    }
}

impl SnapshotDecode for FireMsg {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        use anyhow::bail;
        fn take<const N: usize>(inp: &mut &[u8]) -> anyhow::Result<[u8; N]> {
            if inp.len() < N {
                anyhow::bail!("short read");
            }
            let (a, b) = inp.split_at(N);
            *inp = b;
            let mut buf = [0u8; N];
            buf.copy_from_slice(a);
            Ok(buf)
        }
        let [tag] = take::<1>(inp)?;
        if tag != TAG_FIRE_MSG {
            bail!("not a fire msg tag: {tag:#x}");
        }
        let [kind] = take::<1>(inp)?;
        let pos = IVec3::new(
            i32::from_le_bytes(take::<4>(inp)?),
            i32::from_le_bytes(take::<4>(inp)?),
            i32::from_le_bytes(take::<4>(inp)?),
        );
        let cause = i32::from_le_bytes(take::<4>(inp)?);
        Ok(match kind {
            0 => Self::Ignite { pos, cause },
            1 => Self::Remove { pos, cause },
            2 => Self::Extinguish { pos, cause },
            3 => Self::ClearVisualCue { pos, cause },
            k => bail!("unknown fire msg kind: {k}"),
        })
    }
}
