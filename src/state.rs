use serde::Serialize;

/// The mutable record of a single simulation run: the clock, the server
/// occupancy, the current queue length, and the running statistics
/// accumulators.
///
/// One instance exists per run, mutated exclusively by the event processors
/// and read by the dispatch loop (stopping test) and by reporting after
/// termination. Keeping it an explicit value rather than process-wide state
/// is what makes the engine instantiable many times in one process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    /// Current simulated time, non-decreasing across dispatched events.
    pub clock: f64,
    /// Clock value at the previously processed event, used to accrue busy time.
    pub last_event_time: f64,
    /// Customers waiting, excluding the one in service.
    pub queue_length: u64,
    /// Whether the server is currently occupied.
    pub in_service: bool,
    /// Total simulated time the server has been busy.
    pub total_busy: f64,
    /// Largest queue length observed so far.
    pub max_queue_length: u64,
    /// Sum of response times over all departed customers.
    pub sum_response_time: f64,
    /// Customers that have completed service and left.
    pub number_of_departures: u64,
    /// Customers whose response time exceeded the long-service threshold.
    pub long_service: u64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            clock: 0.0,
            last_event_time: 0.0,
            queue_length: 0,
            in_service: false,
            total_busy: 0.0,
            max_queue_length: 0,
            sum_response_time: 0.0,
            number_of_departures: 0,
            long_service: 0,
        }
    }
}

impl SimulationState {
    /// Server occupancy as a count, either 0 or 1. Together with
    /// `queue_length` this equals the waiting line's length at all times.
    #[must_use]
    pub fn number_in_service(&self) -> u64 {
        u64::from(self.in_service)
    }

    /// Server utilization `rho = total_busy / clock`, or 0 before the clock
    /// has advanced.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        if self.clock > 0.0 {
            self.total_busy / self.clock
        } else {
            0.0
        }
    }

    /// Accrues the time elapsed since the previous event into the busy
    /// total. Only valid while the server is occupied.
    pub(crate) fn accrue_busy_time(&mut self) {
        self.total_busy += self.clock - self.last_event_time;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use float_cmp::approx_eq;

    #[test]
    fn test_default_is_idle_and_zeroed() {
        let state = SimulationState::default();
        assert!(!state.in_service);
        assert_eq!(state.number_in_service(), 0);
        assert_eq!(state.queue_length, 0);
        assert_eq!(state.number_of_departures, 0);
        assert!(approx_eq!(f64, state.utilization(), 0.0));
    }

    #[test]
    fn test_utilization() {
        let state = SimulationState {
            clock: 10.0,
            total_busy: 4.0,
            ..SimulationState::default()
        };
        assert!(approx_eq!(f64, state.utilization(), 0.4));
    }

    #[test]
    fn test_accrue_busy_time() {
        let mut state = SimulationState {
            clock: 7.0,
            last_event_time: 3.0,
            in_service: true,
            ..SimulationState::default()
        };
        state.accrue_busy_time();
        assert!(approx_eq!(f64, state.total_busy, 4.0));
    }
}
