use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SimConfig;
use crate::flight_state::FlightState;

/// Outcome of one finished simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub config: SimConfig,
    pub flights: usize,
    pub boarded_per_flight: Vec<usize>,
    pub total_boarded: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SimulationReport {
    pub fn new(config: SimConfig, state: &FlightState, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> SimulationReport {
        SimulationReport {
            config,
            flights: state.flight_number,
            boarded_per_flight: state.boarded_per_flight.clone(),
            total_boarded: state.total_boarded,
            started_at,
            finished_at,
        }
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elapsed = self.finished_at - self.started_at;
        writeln!(
            f,
            "Air lift finished: {} passengers in {} flights ({} ms)",
            self.total_boarded,
            self.flights,
            elapsed.num_milliseconds()
        )?;
        for (index, boarded) in self.boarded_per_flight.iter().enumerate() {
            writeln!(f, "   flight {:>3}: {boarded} passengers", index + 1)?;
        }
        Ok(())
    }
}
