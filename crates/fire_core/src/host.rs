//! Host-world collaborator seams.
//!
//! Block/material rules, damage application, particle rendering, and zone
//! protection all belong to the host; the engine only asks questions and
//! hands back batched edits through these traits.

use crate::block::{BlockChange, BlockState};
use glam::IVec3;

/// Read access to the host world plus the two transforms the engine needs:
/// the destroy downgrade and the batched commit.
pub trait HostWorld: Send + Sync {
    /// Current snapshot of the cell. Unloaded space reads as air.
    fn block(&self, pos: IVec3) -> BlockState;

    /// Protected/neutral zone check; fire never starts inside one.
    fn is_protected(&self, pos: IVec3) -> bool;

    /// Current world-simulation time.
    fn world_time(&self) -> u64;

    /// Successor state for a cell destroyed by fire: the host's downgrade or
    /// placeholder chain. The engine re-applies orientation/metadata itself.
    fn destroy_transform(&self, pos: IVec3, state: &BlockState) -> BlockState;

    /// The scorched-terrain state written beneath destroyed cells.
    fn burnt_ground(&self) -> BlockState;

    /// Commit a batch of edits in one atomic host-world update.
    fn apply_changes(&self, changes: &[BlockChange]);
}

/// Visual cue sink. One cue at most per coordinate; `show` replaces.
pub trait CueSink: Send + Sync {
    fn show(&self, pos: IVec3, cue: &str);
    fn clear(&self, pos: IVec3);
    fn has(&self, pos: IVec3) -> bool;
    /// One-shot destruction burst when a cell crosses its damage threshold.
    fn destroyed(&self, pos: IVec3, state: &BlockState);
}

/// Heat/activity notification sink (e.g., an AI director's heat map).
pub trait HeatSink: Send + Sync {
    fn notify(&self, pos: IVec3, strength: f32, duration: u64);
}
