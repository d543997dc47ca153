//! Shared test doubles: an in-memory host world, recording cue/heat sinks,
//! and a wired-up engine rig with a loopback transport peer.

#![allow(dead_code)]

use data_runtime::configs::fire::FireCfg;
use fire_core::block::{BlockChange, BlockState};
use fire_core::host::{CueSink, HeatSink, HostWorld};
use fire_core::{FireEngine, Role};
use glam::IVec3;
use net_core::message::FireMsg;
use net_core::snapshot::SnapshotDecode;
use net_core::transport::{LocalLoopbackTransport, Transport};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct StubWorld {
    blocks: Mutex<HashMap<IVec3, BlockState>>,
    protected: Mutex<Vec<IVec3>>,
    downgrades: Mutex<HashMap<String, BlockState>>,
    time: AtomicU64,
    pub batches: Mutex<Vec<Vec<BlockChange>>>,
}

impl StubWorld {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            blocks: Mutex::new(HashMap::new()),
            protected: Mutex::new(Vec::new()),
            downgrades: Mutex::new(HashMap::new()),
            time: AtomicU64::new(0),
            batches: Mutex::new(Vec::new()),
        })
    }

    pub fn put(&self, pos: IVec3, state: BlockState) {
        self.blocks.lock().unwrap().insert(pos, state);
    }

    pub fn protect(&self, pos: IVec3) {
        self.protected.lock().unwrap().push(pos);
    }

    pub fn set_time(&self, t: u64) {
        self.time.store(t, Ordering::SeqCst);
    }

    /// Destroy transform for blocks of `material`; unset materials burn to air.
    pub fn set_downgrade(&self, material: &str, state: BlockState) {
        self.downgrades
            .lock()
            .unwrap()
            .insert(material.to_string(), state);
    }

    pub fn block(&self, pos: IVec3) -> BlockState {
        self.blocks
            .lock()
            .unwrap()
            .get(&pos)
            .cloned()
            .unwrap_or_else(BlockState::air)
    }
}

impl HostWorld for StubWorld {
    fn block(&self, pos: IVec3) -> BlockState {
        StubWorld::block(self, pos)
    }

    fn is_protected(&self, pos: IVec3) -> bool {
        self.protected.lock().unwrap().contains(&pos)
    }

    fn world_time(&self) -> u64 {
        self.time.load(Ordering::SeqCst)
    }

    fn destroy_transform(&self, _pos: IVec3, state: &BlockState) -> BlockState {
        self.downgrades
            .lock()
            .unwrap()
            .get(&state.material_id)
            .cloned()
            .unwrap_or_else(BlockState::air)
    }

    fn burnt_ground(&self) -> BlockState {
        BlockState {
            material_id: "burnt_ground".to_string(),
            is_terrain: true,
            max_damage: 100,
            ..BlockState::default()
        }
    }

    fn apply_changes(&self, changes: &[BlockChange]) {
        let mut blocks = self.blocks.lock().unwrap();
        for change in changes {
            blocks.insert(change.pos, change.state.clone());
        }
        self.batches.lock().unwrap().push(changes.to_vec());
    }
}

#[derive(Default)]
pub struct RecordingCues {
    shown: Mutex<HashMap<IVec3, String>>,
    pub cleared: Mutex<Vec<IVec3>>,
    pub bursts: AtomicUsize,
}

impl RecordingCues {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn cue_at(&self, pos: IVec3) -> Option<String> {
        self.shown.lock().unwrap().get(&pos).cloned()
    }
}

impl CueSink for RecordingCues {
    fn show(&self, pos: IVec3, cue: &str) {
        self.shown.lock().unwrap().insert(pos, cue.to_string());
    }
    fn clear(&self, pos: IVec3) {
        self.shown.lock().unwrap().remove(&pos);
        self.cleared.lock().unwrap().push(pos);
    }
    fn has(&self, pos: IVec3) -> bool {
        self.shown.lock().unwrap().contains_key(&pos)
    }
    fn destroyed(&self, _pos: IVec3, _state: &BlockState) {
        self.bursts.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingHeat {
    pub notices: Mutex<Vec<(IVec3, f32, u64)>>,
}

impl RecordingHeat {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl HeatSink for RecordingHeat {
    fn notify(&self, pos: IVec3, strength: f32, duration: u64) {
        self.notices.lock().unwrap().push((pos, strength, duration));
    }
}

pub struct Rig {
    pub engine: FireEngine,
    pub world: Arc<StubWorld>,
    pub cues: Arc<RecordingCues>,
    pub heat: Arc<RecordingHeat>,
    pub peer: Option<LocalLoopbackTransport>,
    pub save_dir: PathBuf,
}

pub fn test_cfg() -> FireCfg {
    FireCfg {
        check_interval_secs: 1.0,
        smoke_duration_secs: 60,
        heat_strength: 1.0,
        ..FireCfg::default()
    }
}

/// Unique per-test save directory, wiped on creation.
pub fn fresh_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("fire_engine_tests")
        .join(format!("{}_{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create test save dir");
    dir
}

pub fn rig_at(save_dir: PathBuf, cfg: FireCfg) -> Rig {
    let world = StubWorld::new();
    let cues = RecordingCues::new();
    let heat = RecordingHeat::new();
    let (near, far) = LocalLoopbackTransport::new(256);
    let engine = FireEngine::new(
        cfg,
        Role::Authority,
        world.clone(),
        cues.clone(),
        Some(heat.clone()),
        Arc::new(near),
        save_dir.clone(),
    );
    Rig {
        engine,
        world,
        cues,
        heat,
        peer: Some(far),
        save_dir,
    }
}

/// An authority engine with defaults tuned so every `cycle` call runs.
pub fn rig(tag: &str) -> Rig {
    rig_at(fresh_dir(tag), test_cfg())
}

/// An authority and an observer joined by a loopback transport, each with
/// its own world and sinks, as two processes would be.
pub fn linked_pair(tag: &str) -> (Rig, Rig) {
    let (auth_side, obs_side) = LocalLoopbackTransport::new(256);
    let mk = |role: Role, transport: LocalLoopbackTransport, dir: PathBuf| {
        let world = StubWorld::new();
        let cues = RecordingCues::new();
        let heat = RecordingHeat::new();
        let engine = FireEngine::new(
            test_cfg(),
            role,
            world.clone(),
            cues.clone(),
            Some(heat.clone()),
            Arc::new(transport),
            dir.clone(),
        );
        Rig {
            engine,
            world,
            cues,
            heat,
            peer: None,
            save_dir: dir,
        }
    };
    let authority = mk(
        Role::Authority,
        auth_side,
        fresh_dir(&format!("{tag}_auth")),
    );
    let observer = mk(Role::Observer, obs_side, fresh_dir(&format!("{tag}_obs")));
    (authority, observer)
}

/// Run one full propagation cycle.
pub fn cycle(rig: &Rig) {
    rig.engine.tick(1.0);
}

pub fn drain_msgs(transport: &LocalLoopbackTransport) -> Vec<FireMsg> {
    let mut out = Vec::new();
    while let Some(bytes) = transport.try_recv() {
        let payload = net_core::frame::read_msg(&bytes).expect("well-formed frame");
        let mut slice = payload;
        out.push(FireMsg::decode(&mut slice).expect("well-formed message"));
    }
    out
}

pub fn drain_peer(rig: &Rig) -> Vec<FireMsg> {
    drain_msgs(rig.peer.as_ref().expect("rig has a peer"))
}

pub fn wood(max_damage: i32) -> BlockState {
    BlockState {
        material_id: "wood".to_string(),
        damage_category: "organic".to_string(),
        surface_category: "plant".to_string(),
        max_damage,
        heat_strength: 4.0,
        heat_duration: 1200,
        ..BlockState::default()
    }
}

pub fn water() -> BlockState {
    BlockState {
        material_id: "water".to_string(),
        is_water: true,
        ..BlockState::default()
    }
}

pub fn terrain() -> BlockState {
    BlockState {
        material_id: "dirt".to_string(),
        is_terrain: true,
        max_damage: 100,
        ..BlockState::default()
    }
}

pub fn stone() -> BlockState {
    BlockState {
        material_id: "stone".to_string(),
        max_damage: 50,
        ..BlockState::default()
    }
}
