//! Air lift: one pilot, one hostess and N passengers moving everyone from the origin
//! airport to the destination with a single plane of bounded capacity.
//!
//! The actors share one [`flight_state::FlightState`] behind a single lock and hand off control
//! through the counting rendezvous signals of [`sync_set::SynchronizationSet`].

pub mod actor_state;
pub mod airport;
pub mod config;
pub mod delay;
pub mod flight_state;
pub mod hostess;
pub mod log_file;
pub mod observer;
pub mod passenger;
pub mod pilot;
pub mod report;
pub mod simulation;
pub mod sync_set;

pub use config::SimConfig;
pub use observer::{FlightEvent, FlightObserver, RecordingObserver};
pub use report::SimulationReport;
pub use simulation::Simulation;
