use std::fmt;

use serde::Serialize;

use crate::{RunParameters, SimulationState};

/// Summary statistics of a completed run, derived from the final
/// [`SimulationState`] snapshot. The engine imposes no format; this type
/// offers the classic grocery-checkout rendering via [`Display`] and a
/// machine-readable form via [`Serialize`].
///
/// [`Display`]: std::fmt::Display
/// [`Serialize`]: serde::Serialize
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Mean inter-arrival time the run was configured with.
    pub mean_interarrival_time: f64,
    /// Mean service time the run was configured with.
    pub mean_service_time: f64,
    /// Number of customers served.
    pub total_customers: u64,
    /// Fraction of simulated time the server was busy.
    pub utilization: f64,
    /// Largest number of customers waiting at any point.
    pub max_queue_length: u64,
    /// Mean time a customer spent in the system.
    pub average_response_time: f64,
    /// Response time above which a customer counts as a long service.
    pub long_service_threshold: f64,
    /// Fraction of customers whose response time exceeded the threshold.
    pub long_service_proportion: f64,
    /// Simulated time at which the run terminated.
    pub run_length: f64,
    /// Departures processed; equals `total_customers` at termination.
    pub number_of_departures: u64,
}

impl Report {
    /// Derives the report from the run parameters and the final state.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(params: &RunParameters, state: &SimulationState) -> Self {
        let customers = params.total_customers as f64;
        Self {
            mean_interarrival_time: params.mean_interarrival_time,
            mean_service_time: params.mean_service_time,
            total_customers: params.total_customers,
            utilization: state.utilization(),
            max_queue_length: state.max_queue_length,
            average_response_time: state.sum_response_time / customers,
            long_service_threshold: params.long_service_threshold,
            long_service_proportion: state.long_service as f64 / customers,
            run_length: state.clock,
            number_of_departures: state.number_of_departures,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SINGLE SERVER QUEUE SIMULATION - GROCERY STORE CHECKOUT COUNTER")?;
        writeln!(
            f,
            "\tMEAN INTERARRIVAL TIME                         {}",
            self.mean_interarrival_time
        )?;
        writeln!(
            f,
            "\tMEAN SERVICE TIME                              {}",
            self.mean_service_time
        )?;
        writeln!(
            f,
            "\tNUMBER OF CUSTOMERS SERVED                     {}",
            self.total_customers
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "\tSERVER UTILIZATION                             {}",
            self.utilization
        )?;
        writeln!(
            f,
            "\tMAXIMUM LINE LENGTH                            {}",
            self.max_queue_length
        )?;
        writeln!(
            f,
            "\tAVERAGE RESPONSE TIME                          {}  MINUTES",
            self.average_response_time
        )?;
        writeln!(
            f,
            "\tPROPORTION WHO SPEND {} ",
            self.long_service_threshold
        )?;
        writeln!(
            f,
            "\t MINUTES OR MORE IN SYSTEM                     {}",
            self.long_service_proportion
        )?;
        writeln!(
            f,
            "\tSIMULATION RUNLENGTH                           {} MINUTES",
            self.run_length
        )?;
        write!(
            f,
            "\tNUMBER OF DEPARTURES                           {}",
            self.number_of_departures
        )
    }
}
