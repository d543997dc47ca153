//! Tick-driven fire propagation: sweep, damage, expand, commit.
//!
//! One engine per process. The authority mutates the maps and broadcasts;
//! observers mirror state from inbound messages only, so both sides stay
//! convergent without locking across the wire. Neighbor ignitions discovered
//! while damaging join the map at the end of the same cycle and therefore
//! take damage only from the next cycle onward.

use crate::block::{BlockChange, NEIGHBOR_OFFSETS};
use crate::flammable::is_flammable;
use crate::host::{CueSink, HeatSink, HostWorld};
use crate::map::FireMap;
use crate::persist::{SaveScheduler, SavedState};
use crate::suppress::SuppressionSet;
use data_runtime::configs::fire::FireCfg;
use glam::IVec3;
use net_core::frame;
use net_core::message::{CauseId, FireMsg};
use net_core::snapshot::{SnapshotDecode, SnapshotEncode};
use net_core::transport::Transport;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cause identifier for engine-originated mutations.
pub const NO_CAUSE: CauseId = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Canonical instance: runs the tick, owns the maps, broadcasts.
    Authority,
    /// Mirrors authoritative state from inbound messages; never ticks.
    Observer,
}

struct TickState {
    countdown: f32,
}

pub struct FireEngine {
    cfg: FireCfg,
    role: Role,
    active: FireMap,
    suppressed: SuppressionSet,
    host: Arc<dyn HostWorld>,
    cues: Arc<dyn CueSink>,
    heat: Option<Arc<dyn HeatSink>>,
    transport: Arc<dyn Transport>,
    saves: SaveScheduler,
    tick_state: Mutex<TickState>,
}

impl FireEngine {
    pub fn new(
        cfg: FireCfg,
        role: Role,
        host: Arc<dyn HostWorld>,
        cues: Arc<dyn CueSink>,
        heat: Option<Arc<dyn HeatSink>>,
        transport: Arc<dyn Transport>,
        save_dir: PathBuf,
    ) -> Self {
        if cfg.enabled {
            if role == Role::Authority {
                log::info!("fire: check interval {}s", cfg.check_interval_secs);
            }
        } else {
            log::info!("fire: propagation disabled by config");
        }
        Self {
            cfg,
            role,
            active: FireMap::new(),
            suppressed: SuppressionSet::new(),
            host,
            cues,
            heat,
            transport,
            saves: SaveScheduler::new(save_dir),
            tick_state: Mutex::new(TickState { countdown: 0.0 }),
        }
    }

    // ---- queries ---------------------------------------------------------

    #[must_use]
    pub fn is_burning(&self, pos: IVec3) -> bool {
        self.active.contains(pos)
    }

    #[must_use]
    pub fn is_suppressed(&self, pos: IVec3) -> bool {
        self.suppressed.contains(pos)
    }

    #[must_use]
    pub fn suppression_expiry(&self, pos: IVec3) -> Option<u64> {
        self.suppressed.expiry(pos)
    }

    #[must_use]
    pub fn burning_count(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn suppressed_count(&self) -> usize {
        self.suppressed.len()
    }

    #[must_use]
    pub fn burning_positions(&self) -> Vec<IVec3> {
        self.active.positions()
    }

    fn near_water(&self, pos: IVec3) -> bool {
        NEIGHBOR_OFFSETS
            .iter()
            .any(|off| self.host.block(pos + *off).is_water)
    }

    /// Whether fire may take hold at `pos` right now. Burning cells always
    /// answer true so repeat checks short-circuit.
    #[must_use]
    pub fn is_ignitable(&self, pos: IVec3) -> bool {
        if self.host.is_protected(pos) {
            return false;
        }
        if self.suppressed.contains(pos) {
            return false;
        }
        if self.active.contains(pos) {
            return true;
        }
        if self.near_water(pos) {
            return false;
        }
        is_flammable(&self.host.block(pos), &self.cfg)
    }

    // ---- replication plumbing --------------------------------------------

    fn send(&self, msg: &FireMsg) {
        let mut payload = Vec::with_capacity(net_core::message::ENCODED_LEN);
        msg.encode(&mut payload);
        let mut framed = Vec::with_capacity(frame::HEADER_LEN + payload.len());
        frame::write_msg(&mut framed, &payload);
        if self.transport.try_send(framed).is_err() {
            log::warn!("fire: replication send failed for {:?}", msg.pos());
        }
    }

    /// Drain and apply all queued inbound messages. Call from the host's
    /// networking callback. Returns the number applied.
    pub fn pump(&self) -> usize {
        let mut applied = 0;
        while let Some(bytes) = self.transport.try_recv() {
            let decoded = frame::read_msg(&bytes).and_then(|payload| {
                let mut slice = payload;
                FireMsg::decode(&mut slice)
            });
            match decoded {
                Ok(msg) => {
                    self.apply_message(&msg);
                    applied += 1;
                }
                Err(e) => log::warn!("fire: dropping malformed replication frame: {e:#}"),
            }
        }
        applied
    }

    /// Apply one inbound message. On the authority a message is a request
    /// from an observer and is re-validated through the public entry points;
    /// on an observer it is authoritative and mutates the mirror directly.
    pub fn apply_message(&self, msg: &FireMsg) {
        if !self.cfg.enabled {
            return;
        }
        match self.role {
            Role::Authority => match *msg {
                FireMsg::Ignite { pos, cause } => self.request_ignite(pos, cause),
                FireMsg::Remove { pos, cause } => self.request_remove(pos, cause),
                FireMsg::Extinguish { pos, cause } => self.request_extinguish(pos, cause),
                FireMsg::ClearVisualCue { pos, .. } => {
                    self.cues.clear(pos);
                    self.send(msg);
                }
            },
            Role::Observer => match *msg {
                FireMsg::Ignite { pos, .. } => self.ignite_local(pos),
                FireMsg::Remove { pos, .. } => self.remove_local(pos),
                FireMsg::Extinguish { pos, .. } => self.extinguish_local(pos),
                FireMsg::ClearVisualCue { pos, .. } => {
                    // The sweep evicted this coordinate; drop the mirror entry
                    // along with the lingering cue.
                    self.suppressed.remove(pos);
                    self.cues.clear(pos);
                }
            },
        }
    }

    // ---- local mutations (no broadcast) ----------------------------------

    fn ignite_local(&self, pos: IVec3) {
        let state = self.host.block(pos);
        let cue = state
            .fire_cue
            .clone()
            .unwrap_or_else(|| self.cfg.fire_cue.clone());
        self.cues.show(pos, &cue);
        if self.active.try_add(pos, state.clone()) && self.cfg.heat_strength > 0.0 {
            if let Some(heat) = &self.heat {
                heat.notify(pos, state.heat_strength, state.heat_duration);
            }
        }
    }

    fn extinguish_local(&self, pos: IVec3) {
        // Leave the active map in the same step the suppression entry lands:
        // a coordinate is never in both sets at once.
        if self.active.remove(pos).is_some() {
            self.cues.clear(pos);
        }
        let expiry = self.host.world_time() + self.cfg.smoke_duration_secs;
        self.suppressed.insert_if_absent(pos, expiry);
        let state = self.host.block(pos);
        if !state.is_air {
            let cue = state
                .smoke_cue
                .clone()
                .unwrap_or_else(|| self.cfg.smoke_cue.clone());
            self.cues.show(pos, &cue);
        }
    }

    fn remove_local(&self, pos: IVec3) {
        self.cues.clear(pos);
        self.active.remove(pos);
    }

    // ---- public entry points (role-symmetric) ----------------------------

    /// Start a fire at `pos`. On an observer this forwards the request to the
    /// authority and mutates nothing until the broadcast comes back.
    pub fn request_ignite(&self, pos: IVec3, cause: CauseId) {
        if !self.cfg.enabled || !self.is_ignitable(pos) {
            return;
        }
        if self.role == Role::Observer {
            self.send(&FireMsg::Ignite { pos, cause });
            return;
        }
        self.ignite_local(pos);
        self.send(&FireMsg::Ignite { pos, cause });
    }

    /// Put out the fire at `pos` and suppress re-ignition for the cooldown.
    pub fn request_extinguish(&self, pos: IVec3, cause: CauseId) {
        if !self.cfg.enabled {
            return;
        }
        if self.role == Role::Observer {
            self.send(&FireMsg::Extinguish { pos, cause });
            return;
        }
        self.extinguish_local(pos);
        self.send(&FireMsg::Extinguish { pos, cause });
    }

    /// Drop `pos` from the active map without suppression.
    pub fn request_remove(&self, pos: IVec3, cause: CauseId) {
        if !self.cfg.enabled {
            return;
        }
        if self.role == Role::Observer {
            self.send(&FireMsg::Remove { pos, cause });
            return;
        }
        self.remove_local(pos);
        self.send(&FireMsg::Remove { pos, cause });
    }

    // ---- lifecycle -------------------------------------------------------

    fn lock_tick(&self) -> MutexGuard<'_, TickState> {
        match self.tick_state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Advance the interval countdown; runs one full propagation cycle when
    /// it elapses. The cycle executes under the tick lock, so a driving clock
    /// firing faster than the interval cannot overlap cycles.
    pub fn tick(&self, dt: f32) {
        if !self.cfg.enabled || self.role != Role::Authority {
            return;
        }
        let mut ts = self.lock_tick();
        ts.countdown -= dt;
        if ts.countdown > 0.0 {
            return;
        }
        ts.countdown = self.cfg.check_interval_secs;
        self.run_cycle();
    }

    /// Restore persisted state through the local mutation paths so cues come
    /// back with it. Suppressed cells restart their cooldown from now.
    pub fn load(&self) {
        let saved = self.saves.load();
        if saved.active.is_empty() && saved.suppressed.is_empty() {
            return;
        }
        log::info!(
            "fire: restoring {} burning / {} suppressed cells",
            saved.active.len(),
            saved.suppressed.len()
        );
        for pos in saved.active {
            self.ignite_local(pos);
        }
        for pos in saved.suppressed {
            self.extinguish_local(pos);
        }
    }

    /// Flush-and-save: wait for any in-flight save, force a final one, and
    /// wait for it too. Clears all in-memory state afterwards.
    pub fn shutdown(&self) {
        if !self.active.is_empty() || !self.suppressed.is_empty() {
            self.saves.wait();
            self.saves.request(self.saved_state());
            self.saves.wait();
        }
        self.active.clear();
        self.suppressed.clear();
        log::info!("fire: engine shut down");
    }

    /// World reset: extinguish and remove every active cell, clear both sets,
    /// persist the empty state.
    pub fn reset(&self) {
        log::info!("fire: removing all burning and suppressed cells");
        let _guard = self.lock_tick();
        for pos in self.active.positions() {
            self.request_remove(pos, NO_CAUSE);
        }
        for pos in self.suppressed.positions() {
            self.cues.clear(pos);
        }
        self.active.clear();
        self.suppressed.clear();
        self.saves.wait();
        self.saves.request(SavedState::default());
        self.saves.wait();
    }

    fn saved_state(&self) -> SavedState {
        SavedState {
            active: self.active.positions(),
            suppressed: self.suppressed.positions(),
        }
    }

    // ---- the cycle -------------------------------------------------------

    fn sweep(&self) {
        let now = self.host.world_time();
        let evicted = self
            .suppressed
            .sweep_expired(now, |pos| self.host.block(pos + IVec3::NEG_Y).is_air);
        for pos in evicted {
            self.cues.clear(pos);
            self.send(&FireMsg::ClearVisualCue {
                pos,
                cause: NO_CAUSE,
            });
        }
    }

    fn run_cycle(&self) {
        log::debug!(
            "fire: checking {} burning cells, {} suppressed",
            self.active.len(),
            self.suppressed.len()
        );

        self.sweep();

        let mut changes: Vec<BlockChange> = Vec::new();
        let mut pending: Vec<IVec3> = Vec::new();

        for (pos, _) in self.active.snapshot() {
            let current = self.host.block(pos);
            if self.host.is_protected(pos)
                || self.suppressed.contains(pos)
                || !is_flammable(&current, &self.cfg)
            {
                self.request_remove(pos, NO_CAUSE);
                continue;
            }

            let mut state = current;
            state.damage += state.fire_damage.unwrap_or(self.cfg.fire_damage);

            if state.damage >= state.max_damage {
                self.cues.destroyed(pos, &state);
                let mut next = self.host.destroy_transform(pos, &state);
                next.rotation = state.rotation;
                next.meta = state.meta;
                state = next;
                let below = pos + IVec3::NEG_Y;
                if self.host.block(below).is_terrain {
                    changes.push(BlockChange {
                        pos: below,
                        state: self.host.burnt_ground(),
                    });
                }
            }

            changes.push(BlockChange {
                pos,
                state: state.clone(),
            });

            if state.is_air || !is_flammable(&state, &self.cfg) {
                self.request_extinguish(pos, NO_CAUSE);
                continue;
            }

            if !self.cues.has(pos) {
                let cue = state
                    .fire_cue
                    .clone()
                    .unwrap_or_else(|| self.cfg.fire_cue.clone());
                self.cues.show(pos, &cue);
            }

            for off in NEIGHBOR_OFFSETS {
                let neighbor = pos + off;
                if self.active.contains(neighbor) {
                    continue;
                }
                if self.is_ignitable(neighbor) {
                    pending.push(neighbor);
                }
            }

            self.active.update(pos, state);
        }

        if !changes.is_empty() {
            self.host.apply_changes(&changes);
        }

        // Expansion waits until every burning cell has been damaged; entries
        // added here first take damage next cycle.
        for pos in pending {
            self.request_ignite(pos, NO_CAUSE);
        }

        self.saves.request(self.saved_state());
    }
}
