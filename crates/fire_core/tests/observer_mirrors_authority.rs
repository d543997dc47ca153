mod common;

use common::{cycle, linked_pair, terrain, wood};
use glam::IVec3;

#[test]
fn observer_applies_broadcasts_without_echoing() {
    let (auth, obs) = linked_pair("mirror_basic");
    let pos = IVec3::new(1, 2, 3);
    auth.world.put(pos, wood(10));
    obs.world.put(pos, wood(10));

    auth.engine.request_ignite(pos, -1);
    assert_eq!(obs.engine.pump(), 1);

    assert!(obs.engine.is_burning(pos));
    assert_eq!(obs.cues.cue_at(pos).as_deref(), Some("fire_embers"));
    // Nothing came back toward the authority.
    assert_eq!(auth.engine.pump(), 0);
}

#[test]
fn observer_entry_point_forwards_instead_of_mutating() {
    let (auth, obs) = linked_pair("mirror_forward");
    let pos = IVec3::new(5, 0, 5);
    auth.world.put(pos, wood(10));
    obs.world.put(pos, wood(10));

    obs.engine.request_ignite(pos, 7);
    assert_eq!(obs.engine.burning_count(), 0);

    // The authority validates the request, mutates, and broadcasts back.
    assert_eq!(auth.engine.pump(), 1);
    assert!(auth.engine.is_burning(pos));
    assert_eq!(obs.engine.pump(), 1);
    assert!(obs.engine.is_burning(pos));
}

#[test]
fn authority_rejects_invalid_observer_requests() {
    let (auth, obs) = linked_pair("mirror_reject");
    let pos = IVec3::new(2, 2, 2);
    // Flammable on the (stale) observer, water-adjacent on the authority.
    obs.world.put(pos, wood(10));
    auth.world.put(pos, wood(10));
    auth.world.put(pos + IVec3::X, common::water());

    obs.engine.request_ignite(pos, -1);
    assert_eq!(auth.engine.pump(), 1);

    assert!(!auth.engine.is_burning(pos));
    assert_eq!(obs.engine.pump(), 0);
    assert!(!obs.engine.is_burning(pos));
}

#[test]
fn extinguish_and_sweep_mirror_across_the_wire() {
    let (auth, obs) = linked_pair("mirror_sweep");
    let pos = IVec3::new(0, 0, 0);
    for r in [&auth, &obs] {
        r.world.put(pos, wood(10));
        r.world.put(pos + IVec3::NEG_Y, terrain());
    }

    auth.world.set_time(40);
    auth.engine.request_extinguish(pos, -1);
    assert_eq!(obs.engine.pump(), 1);
    assert!(obs.engine.is_suppressed(pos));

    // Cooldown lapses on the authority; the sweep's clear-cue message also
    // retires the observer's mirror entry.
    auth.world.set_time(150);
    cycle(&auth);
    assert!(obs.engine.pump() >= 1);
    assert!(!obs.engine.is_suppressed(pos));
    assert_eq!(obs.cues.cue_at(pos), None);
}

#[test]
fn observer_never_runs_its_own_cycles() {
    let (_auth, obs) = linked_pair("mirror_no_tick");
    let pos = IVec3::new(3, 3, 3);
    obs.world.put(pos, wood(10));

    obs.engine.tick(100.0);

    assert!(obs.world.batches.lock().unwrap().is_empty());
}
