use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PASSENGERS: usize = 21;
pub const DEFAULT_MIN_FLIGHT: usize = 5;
pub const DEFAULT_MAX_FLIGHT: usize = 10;

/// Bounds of a random sleep, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_us: u64,
    pub max_us: u64,
}

impl DelayRange {
    pub const NONE: DelayRange = DelayRange { min_us: 0, max_us: 0 };

    pub fn new(min_us: u64, max_us: u64) -> DelayRange {
        DelayRange { min_us, max_us }
    }
}

/// Bootstrap parameters of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Total passengers (N).
    pub passengers: usize,
    /// Smallest flight allowed to leave while nobody is queued (MINFC).
    pub min_flight: usize,
    /// Plane capacity (MAXFC).
    pub max_flight: usize,
    /// Passenger trip to the airport.
    pub travel: DelayRange,
    /// Each leg flown by the pilot.
    pub flight: DelayRange,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            passengers: DEFAULT_PASSENGERS,
            min_flight: DEFAULT_MIN_FLIGHT,
            max_flight: DEFAULT_MAX_FLIGHT,
            travel: DelayRange::new(1_000, 31_000),
            flight: DelayRange::new(100, 5_100),
        }
    }
}

impl SimConfig {
    /// A config without any sleeps.
    pub fn instant(passengers: usize, min_flight: usize, max_flight: usize) -> SimConfig {
        SimConfig {
            passengers,
            min_flight,
            max_flight,
            travel: DelayRange::NONE,
            flight: DelayRange::NONE,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.passengers == 0 {
            bail!("at least one passenger is required");
        }
        if self.min_flight == 0 {
            bail!("minimum flight size must be at least 1");
        }
        if self.min_flight > self.max_flight {
            bail!(
                "minimum flight size {} exceeds plane capacity {}",
                self.min_flight,
                self.max_flight
            );
        }
        for (name, range) in [("travel", self.travel), ("flight", self.flight)] {
            if range.min_us > range.max_us {
                bail!("{name} delay range is empty: {}..={} us", range.min_us, range.max_us);
            }
        }
        Ok(())
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &str) -> anyhow::Result<SimConfig> {
        let json = std::fs::read_to_string(path).with_context(|| format!("could not read config {path}"))?;
        let config = serde_json::from_str::<SimConfig>(&json).with_context(|| format!("malformed config {path}"))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(SimConfig::instant(0, 1, 1).validate().is_err());
        assert!(SimConfig::instant(5, 0, 2).validate().is_err());
        assert!(SimConfig::instant(5, 3, 2).validate().is_err());

        let mut config = SimConfig::instant(5, 1, 2);
        config.travel = DelayRange::new(10, 5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("travel"));
    }

    #[test]
    fn capacity_may_exceed_passenger_count() {
        SimConfig::instant(3, 1, 10).validate().unwrap();
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{ "passengers": 4, "min_flight": 2 }"#).unwrap();
        assert_eq!(config.passengers, 4);
        assert_eq!(config.min_flight, 2);
        assert_eq!(config.max_flight, DEFAULT_MAX_FLIGHT);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("air_lift_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        let path = path.to_str().unwrap();

        let config = SimConfig::instant(12, 3, 4);
        config.save(path).unwrap();
        assert_eq!(SimConfig::load(path).unwrap(), config);

        std::fs::write(path, r#"{ "min_flight": 6, "max_flight": 2 }"#).unwrap();
        assert!(SimConfig::load(path).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
