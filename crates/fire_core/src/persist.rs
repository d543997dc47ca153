//! Save/load of the burning and suppressed coordinate sets.
//!
//! Format (little-endian): two length-prefixed UTF-8 string fields
//! (u32 byte length + bytes). The first holds every burning coordinate as
//! `x,y,z` triples joined by `;` (trailing separator trimmed); the second
//! holds the suppressed coordinates the same way. Suppression expiries are
//! not persisted; reloaded entries are re-stamped with a fresh cooldown.
//!
//! Writes run on a background thread: at most one save in flight, redundant
//! requests coalesce, and shutdown joins-saves-joins so a clean exit loses
//! nothing. The previous primary rotates to `.bak` before each write and is
//! the fallback when the primary fails to parse.

use anyhow::{Context, Result};
use glam::IVec3;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread::JoinHandle;

pub const SAVE_FILE: &str = "fire_state.dat";
pub const BACKUP_FILE: &str = "fire_state.dat.bak";

/// Snapshot of both coordinate sets, detached from the live maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedState {
    pub active: Vec<IVec3>,
    pub suppressed: Vec<IVec3>,
}

fn join_positions(positions: &[IVec3]) -> String {
    positions
        .iter()
        .map(|p| format!("{},{},{}", p.x, p.y, p.z))
        .collect::<Vec<_>>()
        .join(";")
}

fn parse_positions(field: &str) -> Result<Vec<IVec3>> {
    let mut out = Vec::new();
    for triple in field.split(';') {
        let triple = triple.trim();
        if triple.is_empty() {
            continue;
        }
        let mut axes = triple.split(',');
        let mut next = || -> Result<i32> {
            axes.next()
                .with_context(|| format!("truncated triple {triple:?}"))?
                .trim()
                .parse::<i32>()
                .with_context(|| format!("bad coordinate in {triple:?}"))
        };
        let (x, y, z) = (next()?, next()?, next()?);
        out.push(IVec3::new(x, y, z));
    }
    Ok(out)
}

fn write_str_field(out: &mut Vec<u8>, s: &str) {
    let len = u32::try_from(s.len()).unwrap_or(0);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

fn read_str_field(inp: &mut &[u8]) -> Result<String> {
    use anyhow::bail;
    if inp.len() < 4 {
        bail!("short field header");
    }
    let mut lenb = [0u8; 4];
    lenb.copy_from_slice(&inp[..4]);
    let len = u32::from_le_bytes(lenb) as usize;
    if inp.len() < 4 + len {
        bail!("short field payload: want {len}, have {}", inp.len() - 4);
    }
    let s = std::str::from_utf8(&inp[4..4 + len]).context("field is not UTF-8")?;
    *inp = &inp[4 + len..];
    Ok(s.to_string())
}

#[must_use]
pub fn encode(state: &SavedState) -> Vec<u8> {
    let mut out = Vec::new();
    write_str_field(&mut out, &join_positions(&state.active));
    write_str_field(&mut out, &join_positions(&state.suppressed));
    out
}

pub fn decode(bytes: &[u8]) -> Result<SavedState> {
    let mut inp = bytes;
    let active = parse_positions(&read_str_field(&mut inp).context("burning field")?)?;
    let suppressed = parse_positions(&read_str_field(&mut inp).context("suppressed field")?)?;
    Ok(SavedState { active, suppressed })
}

fn read_save(path: &Path) -> Result<SavedState> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    decode(&bytes)
}

fn write_save(dir: &Path, state: &SavedState) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let primary = dir.join(SAVE_FILE);
    if primary.is_file() {
        std::fs::copy(&primary, dir.join(BACKUP_FILE))
            .with_context(|| format!("rotate backup in {}", dir.display()))?;
    }
    std::fs::write(&primary, encode(state))
        .with_context(|| format!("write {}", primary.display()))?;
    log::info!(
        "fire: saved {} burning / {} suppressed cells to {}",
        state.active.len(),
        state.suppressed.len(),
        primary.display()
    );
    Ok(())
}

/// Restore from the primary file, falling back to the rotating backup, then
/// to empty sets. Never fails the caller.
#[must_use]
pub fn load(dir: &Path) -> SavedState {
    let primary = dir.join(SAVE_FILE);
    if primary.is_file() {
        match read_save(&primary) {
            Ok(state) => return state,
            Err(e) => log::warn!("fire: primary save unreadable, trying backup: {e:#}"),
        }
    }
    let backup = dir.join(BACKUP_FILE);
    if backup.is_file() {
        match read_save(&backup) {
            Ok(state) => return state,
            Err(e) => log::warn!("fire: backup unreadable, starting clean: {e:#}"),
        }
    }
    SavedState::default()
}

/// Fire-and-forget background saves with an at-most-one-in-flight guarantee.
pub struct SaveScheduler {
    dir: PathBuf,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl SaveScheduler {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            in_flight: Mutex::new(None),
        }
    }

    /// Hand a snapshot to a background write and return immediately. Dropped
    /// when a save is already in flight: the running save captured a recent
    /// enough state, and the next cycle will request another.
    pub fn request(&self, state: SavedState) {
        let mut slot = match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = slot.as_ref() {
            if !handle.is_finished() {
                return;
            }
        }
        if let Some(handle) = slot.take() {
            let _ = handle.join();
        }
        let dir = self.dir.clone();
        *slot = Some(std::thread::spawn(move || {
            if let Err(e) = write_save(&dir, &state) {
                log::warn!("fire: save failed: {e:#}");
            }
        }));
    }

    /// Block until any outstanding save completes.
    pub fn wait(&self) {
        let handle = {
            let mut slot = match self.in_flight.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            slot.take()
        };
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    /// Restore from this scheduler's directory.
    #[must_use]
    pub fn load(&self) -> SavedState {
        load(&self.dir)
    }
}
