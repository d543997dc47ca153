//! Block state snapshots exchanged with the host world.
//!
//! The host owns block data; the engine holds a snapshot only for the
//! duration of one cycle's processing of that cell.

use glam::IVec3;

/// The 6-connected neighborhood used for spread and water-adjacency checks.
pub const NEIGHBOR_OFFSETS: [IVec3; 6] = [
    IVec3::X,
    IVec3::NEG_X,
    IVec3::Y,
    IVec3::NEG_Y,
    IVec3::Z,
    IVec3::NEG_Z,
];

/// Minimal externally-supplied description of a cell: enough to re-derive
/// flammability and apply damage, nothing more.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockState {
    pub material_id: String,
    pub damage_category: String,
    pub surface_category: String,
    pub damage: i32,
    pub max_damage: i32,
    /// Orientation/metadata preserved across the destroy transform.
    pub rotation: u8,
    pub meta: u8,
    pub is_air: bool,
    pub is_water: bool,
    /// Child cell of a multiblock; never ignites on its own.
    pub is_child: bool,
    /// Terrain shape; a destroyed cell standing on terrain scorches it.
    pub is_terrain: bool,
    pub tag_flammable: bool,
    pub tag_inflammable: bool,
    /// Per-material overrides; `None` falls back to the configured values.
    pub fire_damage: Option<i32>,
    pub fire_cue: Option<String>,
    pub smoke_cue: Option<String>,
    /// Heat/activity notification pair reported on ignition.
    pub heat_strength: f32,
    pub heat_duration: u64,
}

impl BlockState {
    /// An empty cell. Also what the host reports for unloaded space.
    #[must_use]
    pub fn air() -> Self {
        Self {
            is_air: true,
            ..Self::default()
        }
    }
}

/// One queued host-world edit; the engine batches these and commits them in a
/// single call per cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockChange {
    pub pos: IVec3,
    pub state: BlockState,
}
