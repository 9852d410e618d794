//! Single-server queue simulation application.

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use std::convert::TryFrom;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use eyre::WrapErr;

use ssqsim::{Report, RunParameters, Simulation};

/// Runs a single-server queue (M/M/1) simulation and prints the final
/// statistics report.
#[derive(Parser)]
#[clap(version, about)]
struct Opt {
    /// Mean time between consecutive customer arrivals.
    #[clap(long, default_value_t = 4.3)]
    mean_interarrival_time: f64,

    /// Mean service time of a single customer.
    #[clap(long, default_value_t = 1.9)]
    mean_service_time: f64,

    /// Number of customers to serve before terminating.
    #[clap(long, default_value_t = 500)]
    total_customers: u64,

    /// Seed of the random variate stream.
    #[clap(long, default_value_t = 123_567)]
    seed: u64,

    /// Response time above which a customer counts as a long service.
    #[clap(long, default_value_t = 4.0)]
    long_service_threshold: f64,

    /// Read run parameters from a JSON file, taking precedence over the
    /// flags above.
    #[clap(long)]
    params_path: Option<PathBuf>,

    /// Print the report as JSON instead of the text rendering.
    #[clap(long)]
    json: bool,

    /// Verbosity.
    #[clap(short, long, parse(from_occurrences))]
    verbose: i32,

    /// Store the logs in this file.
    #[clap(long)]
    log_output: Option<PathBuf>,

    /// Do not log to the stderr.
    #[clap(long)]
    no_stderr: bool,
}

impl TryFrom<&Opt> for RunParameters {
    type Error = eyre::Error;
    fn try_from(opt: &Opt) -> eyre::Result<Self> {
        if let Some(path) = &opt.params_path {
            let file = File::open(path)
                .wrap_err_with(|| format!("unable to open parameter file: {}", path.display()))?;
            serde_json::from_reader(file).wrap_err("unable to parse parameter file")
        } else {
            Ok(Self {
                mean_interarrival_time: opt.mean_interarrival_time,
                mean_service_time: opt.mean_service_time,
                total_customers: opt.total_customers,
                seed: opt.seed,
                long_service_threshold: opt.long_service_threshold,
            })
        }
    }
}

/// Set up a logger based on the given user options.
fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3 => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level);
    let dispatch = if let Some(path) = &opt.log_output {
        let _ = std::fs::remove_file(path);
        dispatch.chain(
            std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .append(false)
                .open(path)?,
        )
    } else {
        dispatch
    };
    let dispatch = if opt.no_stderr {
        dispatch
    } else {
        dispatch.chain(std::io::stderr())
    };
    dispatch.apply()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();
    set_up_logger(&opt)?;
    let params = RunParameters::try_from(&opt)?;
    let mut sim = Simulation::new(params).wrap_err("unable to initialize simulation")?;
    sim.run().wrap_err("simulation aborted")?;
    let report = Report::new(sim.params(), sim.state());
    if opt.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
