//! `net_core`: fire replication schema + in-proc plumbing.
//!
//! Scope
//! - Defines snapshot encode/decode traits and the four fire messages
//! - Provides length framing, an in-proc byte channel, and a transport trait
//!   with a local loopback implementation for tests and single-process runs

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod channel;
pub mod frame;
pub mod message;
pub mod snapshot;
pub mod transport;
