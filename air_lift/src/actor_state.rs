use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilotState {
    FlyingBack,
    ReadyForBoarding,
    WaitingForBoarding,
    Flying,
    DropingPassengers,
}

impl PilotState {
    /// Column code used by the state log.
    pub fn code(&self) -> &'static str {
        match self {
            PilotState::FlyingBack => "FLBK",
            PilotState::ReadyForBoarding => "RDFB",
            PilotState::WaitingForBoarding => "WTFB",
            PilotState::Flying => "FLFW",
            PilotState::DropingPassengers => "DRPP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostessState {
    WaitForFlight,
    WaitForPassenger,
    CheckPassport,
    ReadyToFlight,
}

impl HostessState {
    pub fn code(&self) -> &'static str {
        match self {
            HostessState::WaitForFlight => "WTFL",
            HostessState::WaitForPassenger => "WTPS",
            HostessState::CheckPassport => "CKPS",
            HostessState::ReadyToFlight => "RDTF",
        }
    }
}

/// A passenger goes through these in declaration order, each exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PassengerState {
    Traveling,
    InQueue,
    InFlight,
    AtDestination,
}

impl PassengerState {
    pub fn code(&self) -> &'static str {
        match self {
            PassengerState::Traveling => "G",
            PassengerState::InQueue => "Q",
            PassengerState::InFlight => "F",
            PassengerState::AtDestination => "T",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passenger_states_are_ordered_by_lifecycle() {
        assert!(PassengerState::Traveling < PassengerState::InQueue);
        assert!(PassengerState::InQueue < PassengerState::InFlight);
        assert!(PassengerState::InFlight < PassengerState::AtDestination);
    }

    #[test]
    fn log_codes_fit_their_columns() {
        let pilot = [
            PilotState::FlyingBack,
            PilotState::ReadyForBoarding,
            PilotState::WaitingForBoarding,
            PilotState::Flying,
            PilotState::DropingPassengers,
        ];
        assert!(pilot.iter().all(|state| state.code().len() == 4));
        assert_eq!(HostessState::CheckPassport.code(), "CKPS");
        assert_eq!(PassengerState::InQueue.code(), "Q");
    }
}
