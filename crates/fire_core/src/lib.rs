//! `fire_core`: authoritative fire propagation engine.
//!
//! Scope
//! - Tracks burning cells in a concurrent sparse map and damages them on a
//!   fixed interval, spreading to flammable neighbors with a one-tick lag.
//! - Maintains a timed suppression set that gates re-ignition after an
//!   extinguish, swept once per cycle before propagation runs.
//! - Replicates add/remove/extinguish/clear-cue to observers via `net_core`
//!   messages; observers mirror state only from inbound messages.
//! - Persists both sets off the tick thread with a rotating backup.
//!
//! The owning process constructs a [`FireEngine`] explicitly, wires its
//! `tick`/`shutdown` entry points into its own update/exit hooks, and pumps
//! inbound replication bytes from its networking callback.

pub mod block;
pub mod engine;
pub mod flammable;
pub mod host;
pub mod map;
pub mod persist;
pub mod suppress;
pub mod telemetry;

pub use engine::{FireEngine, Role, NO_CAUSE};
