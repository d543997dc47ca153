//! Pure combustion predicate over block snapshots.
//!
//! No simulation state and no side effects; safe to call from any thread.
//! Position-dependent checks (suppression, water adjacency, protected zones)
//! live on the engine, which owns the state they consult.

use crate::block::BlockState;
use data_runtime::configs::fire::FireCfg;

/// Whether a cell's material/state permits ignition under current rules.
///
/// Explicit tags win: "inflammable" vetoes, then "flammable" grants. Untagged
/// blocks fall through to the three configured allow-lists.
#[must_use]
pub fn is_flammable(state: &BlockState, cfg: &FireCfg) -> bool {
    if state.tag_inflammable || state.is_child || state.is_air || state.is_water {
        return false;
    }
    if state.tag_flammable {
        return true;
    }
    cfg.material_ids.contains(&state.material_id)
        || cfg.material_damage_categories.contains(&state.damage_category)
        || cfg.material_surface_categories.contains(&state.surface_category)
}
