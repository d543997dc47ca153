//! `data_runtime`: config schemas and loaders for the fire propagation engine.
//!
//! Kept separate from `fire_core` so the engine, tools, and tests can depend
//! on a stable config API without pulling in simulation state.

pub mod configs {
    pub mod fire;
}
