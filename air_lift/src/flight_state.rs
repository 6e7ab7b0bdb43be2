use serde::{Deserialize, Serialize};

use crate::actor_state::{HostessState, PassengerState, PilotState};

pub type PassengerId = usize;

/// The record every actor reads and mutates while holding the state lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub pilot: PilotState,
    pub hostess: HostessState,
    pub passengers: Vec<PassengerState>,
    pub total_boarded: usize,
    pub queue_count: usize,
    pub in_flight_count: usize,
    pub flight_number: usize,
    pub finished: bool,
    pub last_checked_passenger: Option<PassengerId>,
    /// Passengers boarded on every completed boarding, indexed by `flight_number - 1`.
    pub boarded_per_flight: Vec<usize>,
}

impl FlightState {
    pub fn new(passengers: usize) -> FlightState {
        FlightState {
            pilot: PilotState::FlyingBack,
            hostess: HostessState::WaitForFlight,
            passengers: vec![PassengerState::Traveling; passengers],
            total_boarded: 0,
            queue_count: 0,
            in_flight_count: 0,
            flight_number: 0,
            finished: false,
            last_checked_passenger: None,
            boarded_per_flight: Vec::new(),
        }
    }

    /// Stores the boarded count of the current flight.
    pub fn close_boarding(&mut self) {
        let index = self.flight_number.saturating_sub(1);
        if self.boarded_per_flight.len() <= index {
            self.boarded_per_flight.resize(index + 1, 0);
        }
        self.boarded_per_flight[index] = self.in_flight_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_everyone_traveling() {
        let state = FlightState::new(3);
        assert_eq!(state.passengers.len(), 3);
        assert!(state.passengers.iter().all(|p| *p == PassengerState::Traveling));
        assert_eq!(state.pilot, PilotState::FlyingBack);
        assert_eq!(state.hostess, HostessState::WaitForFlight);
        assert!(!state.finished);
        assert!(state.boarded_per_flight.is_empty());
    }

    #[test]
    fn close_boarding_indexes_by_flight_number() {
        let mut state = FlightState::new(8);
        state.flight_number = 1;
        state.in_flight_count = 5;
        state.close_boarding();
        state.flight_number = 2;
        state.in_flight_count = 3;
        state.close_boarding();
        assert_eq!(state.boarded_per_flight, vec![5, 3]);
    }
}
