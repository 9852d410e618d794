use thiserror::Error;

/// Errors signaled by the engine. All of them indicate a broken invariant
/// or invalid input rather than a transient condition, so none is
/// recoverable within a run: the correct response is to abort and propagate.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Attempted to read or remove the minimum of an empty future event list.
    #[error("future event list is empty")]
    EmptyEventList,

    /// A departure was processed while no customer was waiting or in
    /// service. This is a sequencing bug: every departure must have a
    /// matching arrival already in the waiting line.
    #[error("waiting line is empty: departure processed without a matching customer")]
    EmptyWaitingLine,

    /// The future event list ran dry before the stopping condition was met,
    /// which would stall the dispatch loop forever.
    #[error(
        "event list starved at clock {clock}: {departures} of {total_customers} departures processed"
    )]
    StarvedEventList {
        /// Simulated time at which the list ran dry.
        clock: f64,
        /// Departures processed so far.
        departures: u64,
        /// Departures required to terminate.
        total_customers: u64,
    },

    /// A run parameter failed validation at initialization.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
