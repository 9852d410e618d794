//! End-to-end runs of the single-server queue simulation.

use ssqsim::{Report, RunParameters, Simulation, Status};

fn grocery_params() -> RunParameters {
    RunParameters {
        mean_interarrival_time: 4.3,
        mean_service_time: 1.9,
        total_customers: 500,
        seed: 123_567,
        long_service_threshold: 4.0,
    }
}

#[test]
fn test_grocery_scenario_runs_to_completion() {
    let mut sim = Simulation::new(grocery_params()).unwrap();
    let state = sim.run().unwrap();

    assert_eq!(state.number_of_departures, 500);
    assert!(state.max_queue_length >= 1);
    assert!(state.sum_response_time > 0.0);
    assert!(state.clock > 0.0);

    let rho = state.utilization();
    assert!((0.0..=1.0).contains(&rho), "utilization out of bounds: {}", rho);
}

#[test]
fn test_same_seed_reproduces_statistics_bit_for_bit() {
    let mut first_run = Simulation::new(grocery_params()).unwrap();
    let mut second_run = Simulation::new(grocery_params()).unwrap();
    let first = first_run.run().unwrap();
    let second = second_run.run().unwrap();

    assert_eq!(
        first.sum_response_time.to_bits(),
        second.sum_response_time.to_bits()
    );
    assert_eq!(first.total_busy.to_bits(), second.total_busy.to_bits());
    assert_eq!(first.max_queue_length, second.max_queue_length);
    assert_eq!(first.long_service, second.long_service);
    assert_eq!(first.clock.to_bits(), second.clock.to_bits());
}

#[test]
fn test_different_seeds_diverge() {
    let mut first_run = Simulation::new(grocery_params()).unwrap();
    let mut second_run = Simulation::new(RunParameters {
        seed: 1,
        ..grocery_params()
    })
    .unwrap();
    let first = first_run.run().unwrap();
    let second = second_run.run().unwrap();
    assert_ne!(first.clock.to_bits(), second.clock.to_bits());
}

#[test]
fn test_clock_is_monotonic_and_queue_length_conserved() {
    let mut sim = Simulation::new(grocery_params()).unwrap();
    let mut last_clock = 0.0;
    loop {
        let status = sim.step().unwrap();
        let state = sim.state();

        assert!(state.clock >= last_clock, "clock went backwards");
        last_clock = state.clock;

        // Every customer that has arrived and not yet departed has exactly
        // one entry in the waiting line.
        assert_eq!(
            state.queue_length + state.number_in_service(),
            sim.waiting_line().len() as u64
        );

        if status == Status::Terminated {
            break;
        }
    }
    assert_eq!(sim.state().number_of_departures, 500);
}

#[test]
fn test_single_customer_run() {
    let mut sim = Simulation::new(RunParameters {
        total_customers: 1,
        ..grocery_params()
    })
    .unwrap();
    let state = sim.run().unwrap();

    assert_eq!(state.number_of_departures, 1);
    // The only customer went straight into service, so its full response
    // time was spent being served and the server was busy throughout.
    assert!(float_cmp::approx_eq!(
        f64,
        state.sum_response_time,
        state.total_busy
    ));
    assert!(!state.in_service);
}

#[test]
fn test_report_matches_final_state() {
    let mut sim = Simulation::new(grocery_params()).unwrap();
    sim.run().unwrap();
    let report = Report::new(sim.params(), sim.state());

    assert_eq!(report.number_of_departures, 500);
    assert!(float_cmp::approx_eq!(
        f64,
        report.utilization,
        sim.state().utilization()
    ));
    assert!(float_cmp::approx_eq!(
        f64,
        report.average_response_time,
        sim.state().sum_response_time / 500.0
    ));
    assert!(report.long_service_proportion >= 0.0 && report.long_service_proportion <= 1.0);
}
