//! Discrete-event simulation of a single-server queueing system: one
//! arrival stream, one service facility, an unbounded waiting line.
//!
//! The engine is a classic event-driven kernel: a time-ordered
//! [`FutureEventList`] of pending events, a dispatch loop that advances the
//! simulated clock strictly by event order, and arrival/departure
//! processors mutating an explicit [`SimulationState`]. Everything is
//! single-threaded and strictly sequential; for a fixed seed a run is
//! exactly reproducible.

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

mod event;
pub use event::{Event, EventKind};

mod error;
pub use error::Error;

mod fel;
pub use fel::FutureEventList;

mod queue;
pub use queue::WaitingLine;

mod state;
pub use state::SimulationState;

mod variate;
pub use variate::{ExponentialVariates, VariateStream};

mod simulation;
pub use simulation::{RunParameters, Simulation, Status};

mod report;
pub use report::Report;
