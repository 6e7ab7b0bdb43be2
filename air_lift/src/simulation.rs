use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::airport::{Airport, AirportRef};
use crate::config::SimConfig;
use crate::hostess::Hostess;
use crate::observer::FlightObserver;
use crate::passenger::Passenger;
use crate::pilot::Pilot;
use crate::report::SimulationReport;

/// One independent air lift: its own state, signals and actors.
pub struct Simulation {
    airport: AirportRef,
}

impl Simulation {
    pub fn new(config: SimConfig, observer: Arc<dyn FlightObserver>) -> anyhow::Result<Simulation> {
        config.validate()?;
        let airport = Arc::new(Airport::new(config, observer));
        Ok(Simulation { airport })
    }

    pub fn airport(&self) -> &AirportRef {
        &self.airport
    }

    /// Runs every actor to completion.
    ///
    /// The first actor error is fatal: the remaining actors are aborted and the error is
    /// returned.
    pub async fn run(self) -> anyhow::Result<SimulationReport> {
        let config = self.airport.config.clone();
        let started_at = Utc::now();

        let pilot = Pilot::new(self.airport.clone());
        let hostess = Hostess::new(self.airport.clone());
        let passengers = (0..config.passengers)
            .map(|id| Passenger::new(id, self.airport.clone()))
            .collect::<anyhow::Result<Vec<_>>>()?;

        self.airport.update(|state| state.save_state()).await;
        info!(
            passengers = config.passengers,
            min_flight = config.min_flight,
            max_flight = config.max_flight,
            "air lift started"
        );

        let mut actors = JoinSet::new();
        actors.spawn(async move { pilot.run().await });
        actors.spawn(async move { hostess.run().await });
        for passenger in passengers {
            actors.spawn(async move { passenger.run().await });
        }

        while let Some(result) = actors.join_next().await {
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) => Err(anyhow!("actor task failed: {e}")),
            };
            if let Err(e) = outcome {
                error!("fatal actor error: {e:#}");
                actors.abort_all();
                return Err(e);
            }
        }

        let state = self.airport.snapshot().await;
        self.airport.observer().finish(&state);
        let report = SimulationReport::new(config, &state, started_at, Utc::now());
        info!(flights = report.flights, "air lift finished");
        Ok(report)
    }
}
