use std::sync::Arc;

use air_lift::flight_state::PassengerId;
use air_lift::log_file::FileLogger;
use air_lift::observer::{Fanout, FlightObserver, RecordingObserver};
use air_lift::{FlightEvent, SimConfig, Simulation, SimulationReport};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config()?;
    println!(
        "Air lift: {} passengers, flights of {}..={}",
        config.passengers, config.min_flight, config.max_flight
    );

    for iteration in 1..=cli.runs {
        let (report, boarding) = simulate(&config, &cli.log).await?;
        if cli.runs > 1 {
            println!("run {iteration}/{}", cli.runs);
        }
        println!("{report}");
        for (index, ids) in boarding.iter().enumerate() {
            println!("   boarding order of flight {:>3}: {ids:?}", index + 1);
        }

        if iteration == cli.runs {
            if let Some(path) = &cli.report {
                report.save(path)?;
                info!("report saved to {path}");
            }
        }
    }
    Ok(())
}

/// Runs one simulation and returns its report with the passengers checked on each flight.
async fn simulate(config: &SimConfig, log_path: &str) -> anyhow::Result<(SimulationReport, Vec<Vec<PassengerId>>)> {
    let logger: Arc<dyn FlightObserver> = Arc::new(FileLogger::create(log_path, config.passengers)?);
    let recorder = Arc::new(RecordingObserver::new());
    let observers = vec![logger, recorder.clone() as Arc<dyn FlightObserver>];
    let simulation = Simulation::new(config.clone(), Arc::new(Fanout::new(observers)))?;
    let report = simulation.run().await?;
    info!("state log written to {log_path}");

    let mut boarding = vec![Vec::new(); report.flights];
    for (event, state) in recorder.events() {
        if event != FlightEvent::PassengerChecked {
            continue;
        }
        if let (Some(ids), Some(id)) = (boarding.get_mut(state.flight_number.wrapping_sub(1)), state.last_checked_passenger) {
            ids.push(id);
        }
    }
    Ok((report, boarding))
}
