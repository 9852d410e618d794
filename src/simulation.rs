use serde::{Deserialize, Serialize};

use rand_chacha::ChaChaRng;

use crate::variate::{ExponentialVariates, VariateStream};
use crate::{Error, Event, EventKind, FutureEventList, SimulationState, WaitingLine};

fn default_long_service_threshold() -> f64 {
    4.0
}

/// Parameters of a single simulation run. Validated once, at construction
/// of a [`Simulation`]; the engine assumes them valid afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Mean time between consecutive customer arrivals. Must be positive.
    pub mean_interarrival_time: f64,
    /// Mean service time of a single customer. Must be positive.
    pub mean_service_time: f64,
    /// Number of departures after which the run terminates. Must be positive.
    pub total_customers: u64,
    /// Seed of the variate stream. Runs with equal seeds and parameters
    /// produce bit-identical statistics.
    pub seed: u64,
    /// Response time above which a customer counts as a long service.
    #[serde(default = "default_long_service_threshold")]
    pub long_service_threshold: f64,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            mean_interarrival_time: 4.3,
            mean_service_time: 1.9,
            total_customers: 500,
            seed: 123_567,
            long_service_threshold: default_long_service_threshold(),
        }
    }
}

impl RunParameters {
    /// Checks that all parameters are in their valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.mean_interarrival_time > 0.0 && self.mean_interarrival_time.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "mean_interarrival_time must be positive and finite, got {}",
                self.mean_interarrival_time
            )));
        }
        if !(self.mean_service_time > 0.0 && self.mean_service_time.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "mean_service_time must be positive and finite, got {}",
                self.mean_service_time
            )));
        }
        if self.total_customers == 0 {
            return Err(Error::InvalidParameter(String::from(
                "total_customers must be positive",
            )));
        }
        if !self.long_service_threshold.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "long_service_threshold must be finite, got {}",
                self.long_service_threshold
            )));
        }
        Ok(())
    }
}

/// State of the dispatch loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// Fewer departures have been processed than `total_customers`.
    Running,
    /// The stopping condition has been reached; residual events in the
    /// future event list are discarded, never processed.
    Terminated,
}

/// A single-server queue simulation: one arrival stream, one service
/// facility, an unbounded waiting line.
///
/// Construction seeds the future event list with exactly one arrival; no
/// other code path inserts the first event. [`step`](Simulation::step)
/// dispatches one event, [`run`](Simulation::run) dispatches until the
/// customer-count stopping condition is met. Everything is strictly
/// sequential: one event in flight at a time, each processor running to
/// completion before the next event is requested.
pub struct Simulation<V = ExponentialVariates<ChaChaRng>> {
    params: RunParameters,
    state: SimulationState,
    fel: FutureEventList,
    waiting_line: WaitingLine,
    variates: V,
}

impl Simulation {
    /// Creates a simulation with a variate stream seeded from the
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the parameters fail
    /// validation.
    pub fn new(params: RunParameters) -> Result<Self, Error> {
        let variates = ExponentialVariates::seeded(params.seed);
        Self::with_variates(params, variates)
    }
}

impl<V: VariateStream> Simulation<V> {
    /// Creates a simulation drawing from the given variate stream instead
    /// of the seeded default. This is the seam used to inject scripted
    /// variates in tests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the parameters fail
    /// validation.
    pub fn with_variates(params: RunParameters, mut variates: V) -> Result<Self, Error> {
        params.validate()?;
        let mut fel = FutureEventList::default();
        let first_arrival = Event::arrival(variates.exponential(params.mean_interarrival_time));
        log::info!(
            "starting run: {} customers, first arrival at {:.4}",
            params.total_customers,
            first_arrival.time
        );
        fel.insert(first_arrival);
        Ok(Self {
            params,
            state: SimulationState::default(),
            fel,
            waiting_line: WaitingLine::default(),
            variates,
        })
    }

    /// The parameters this run was created with.
    #[must_use]
    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    /// The current simulation state. After [`run`](Simulation::run)
    /// returns, this is the final snapshot consumed by reporting.
    #[must_use]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The customers currently in the system, oldest first.
    #[must_use]
    pub fn waiting_line(&self) -> &WaitingLine {
        &self.waiting_line
    }

    /// Number of events still pending in the future event list.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.fel.len()
    }

    /// Whether the stopping condition has been reached.
    #[must_use]
    pub fn status(&self) -> Status {
        if self.state.number_of_departures < self.params.total_customers {
            Status::Running
        } else {
            Status::Terminated
        }
    }

    /// Dispatches the single imminent event: removes the minimum-time event
    /// from the future event list, advances the clock to its timestamp, and
    /// routes it to the matching processor. Returns the status after the
    /// event has been processed. Calling `step` on a terminated simulation
    /// is a no-op returning [`Status::Terminated`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::StarvedEventList`] if no event is pending while the
    /// stopping condition has not been reached, and propagates
    /// [`Error::EmptyWaitingLine`] from a departure without a matching
    /// customer. Both indicate a broken sequencing invariant.
    pub fn step(&mut self) -> Result<Status, Error> {
        if self.status() == Status::Terminated {
            return Ok(Status::Terminated);
        }
        if self.fel.is_empty() {
            return Err(Error::StarvedEventList {
                clock: self.state.clock,
                departures: self.state.number_of_departures,
                total_customers: self.params.total_customers,
            });
        }
        let event = self.fel.remove_min()?;
        debug_assert!(event.time >= self.state.clock, "clock must not go backwards");
        self.state.clock = event.time;
        log::debug!("[{:.4}] dispatching {}", event.time, event.kind);
        match event.kind {
            EventKind::Arrival => self.process_arrival(event),
            EventKind::Departure => self.process_departure()?,
        }
        Ok(self.status())
    }

    /// Runs the dispatch loop to termination and returns the final state.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`step`](Simulation::step).
    pub fn run(&mut self) -> Result<&SimulationState, Error> {
        while self.step()? == Status::Running {}
        log::info!(
            "terminated at clock {:.4} after {} departures ({} residual events discarded)",
            self.state.clock,
            self.state.number_of_departures,
            self.fel.len()
        );
        Ok(&self.state)
    }

    /// An arriving customer joins the waiting line; if the server is idle
    /// it goes straight into service, otherwise the elapsed busy interval
    /// is accrued. The next arrival is drawn and scheduled here, which is
    /// what keeps the arrival stream going.
    fn process_arrival(&mut self, event: Event) {
        self.waiting_line.push(event);
        self.state.queue_length += 1;

        if self.state.in_service {
            self.state.accrue_busy_time();
        } else {
            self.schedule_departure();
        }

        if self.state.queue_length > self.state.max_queue_length {
            self.state.max_queue_length = self.state.queue_length;
        }

        let next_arrival = Event::arrival(
            self.state.clock + self.variates.exponential(self.params.mean_interarrival_time),
        );
        self.fel.insert(next_arrival);
        self.state.last_event_time = self.state.clock;
    }

    /// The customer at the head of the line completes service: its response
    /// time is accrued, and either the next waiting customer enters service
    /// or the server goes idle.
    fn process_departure(&mut self) -> Result<(), Error> {
        let finished = self.waiting_line.pop()?;

        let response = self.state.clock - finished.time;
        self.state.sum_response_time += response;
        if response > self.params.long_service_threshold {
            self.state.long_service += 1;
        }
        self.state.accrue_busy_time();
        self.state.number_of_departures += 1;
        self.state.last_event_time = self.state.clock;

        if self.state.queue_length > 0 {
            self.schedule_departure();
        } else {
            self.state.in_service = false;
        }
        Ok(())
    }

    /// Puts the next waiting customer into service: draws its service time,
    /// schedules the corresponding departure, and moves the customer from
    /// "waiting" to "in service".
    fn schedule_departure(&mut self) {
        let service_time = self.variates.exponential(self.params.mean_service_time);
        self.fel
            .insert(Event::departure(self.state.clock + service_time));
        self.state.in_service = true;
        self.state.queue_length -= 1;
    }
}
