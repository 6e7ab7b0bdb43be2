use air_lift::SimConfig;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "simulator")]
#[command(version)]
#[command(about = "Air lift simulation: one pilot, one hostess, N passengers")]
pub struct Cli {
    /// JSON config used as the base; flags below override it
    #[arg(long, env = "AIR_LIFT_CONFIG")]
    pub config: Option<String>,

    /// Total passengers (N)
    #[arg(short = 'n', long)]
    pub passengers: Option<usize>,

    /// Smallest flight allowed to leave when nobody is queued
    #[arg(long)]
    pub min_flight: Option<usize>,

    /// Plane capacity
    #[arg(long)]
    pub max_flight: Option<usize>,

    /// State log file, rewritten on every run
    #[arg(long, default_value = "log")]
    pub log: String,

    /// Save the report of the last run as JSON
    #[arg(long)]
    pub report: Option<String>,

    /// Number of simulations to run one after the other
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> anyhow::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if let Some(passengers) = self.passengers {
            config.passengers = passengers;
        }
        if let Some(min_flight) = self.min_flight {
            config.min_flight = min_flight;
        }
        if let Some(max_flight) = self.max_flight {
            config.max_flight = max_flight;
        }
        config.validate()?;
        Ok(config)
    }
}
