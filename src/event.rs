use serde::{Deserialize, Serialize};

/// The two kinds of events driving the simulation: a customer entering the
/// system, or a customer leaving it after service.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A customer arrives and joins the waiting line.
    Arrival,
    /// The customer currently in service completes and leaves.
    Departure,
}

/// A simulated event: a timestamp and a kind tag. Immutable once created;
/// owned by the future event list until dispatched.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Event {
    /// Simulated time at which the event occurs.
    pub time: f64,
    /// Arrival or departure.
    pub kind: EventKind,
}

impl Event {
    /// Creates an arrival event at the given simulated time.
    #[must_use]
    pub fn arrival(time: f64) -> Self {
        Self {
            time,
            kind: EventKind::Arrival,
        }
    }

    /// Creates a departure event at the given simulated time.
    #[must_use]
    pub fn departure(time: f64) -> Self {
        Self {
            time,
            kind: EventKind::Departure,
        }
    }
}
