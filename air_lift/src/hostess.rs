use tracing::{debug, info};

use crate::actor_state::HostessState;
use crate::airport::AirportRef;
use crate::config::SimConfig;
use crate::flight_state::FlightState;
use crate::observer::FlightEvent;

/// The current flight must leave after the passenger just checked when the plane is full,
/// when the minimum is reached and nobody else is queued, or when nobody is left to board.
pub fn is_last_for_flight(state: &FlightState, config: &SimConfig) -> bool {
    state.in_flight_count == config.max_flight
        || (state.in_flight_count >= config.min_flight && state.queue_count == 0)
        || state.total_boarded == config.passengers
}

pub struct Hostess {
    airport: AirportRef,
}

impl Hostess {
    pub fn new(airport: AirportRef) -> Hostess {
        Hostess { airport }
    }

    /// Boards flights until every passenger has boarded one.
    pub async fn run(&self) -> anyhow::Result<()> {
        let passengers = self.airport.config.passengers;
        let mut boarded = 0;
        while boarded < passengers {
            self.wait_for_next_flight().await?;
            loop {
                self.wait_for_passenger().await?;
                let last = self.check_passport().await?;
                boarded += 1;
                if last {
                    break;
                }
            }
            self.signal_ready_to_flight().await;
        }
        info!(boarded, "hostess done");
        Ok(())
    }

    pub async fn wait_for_next_flight(&self) -> anyhow::Result<()> {
        self.set_state(HostessState::WaitForFlight).await;
        self.airport.sync.boarding_open.wait().await
    }

    pub async fn wait_for_passenger(&self) -> anyhow::Result<()> {
        self.set_state(HostessState::WaitForPassenger).await;
        self.airport.sync.queue_has_passengers.wait().await
    }

    /// Serves one queued passenger. Returns true when that passenger is the last of the flight.
    pub async fn check_passport(&self) -> anyhow::Result<bool> {
        self.airport.sync.hostess_ready_for_next.signal();
        self.set_state(HostessState::CheckPassport).await;
        self.airport.sync.identity_presented.wait().await?;

        let config = &self.airport.config;
        let (last, passenger) = self
            .airport
            .update(|state| {
                state.queue_count -= 1;
                state.in_flight_count += 1;
                state.total_boarded += 1;
                state.save_event(FlightEvent::PassengerChecked);
                let last = is_last_for_flight(state, config);
                if last {
                    state.close_boarding();
                }
                state.save_state();
                (last, state.last_checked_passenger)
            })
            .await;
        debug!(?passenger, last, "passport checked");
        Ok(last)
    }

    pub async fn signal_ready_to_flight(&self) {
        let passengers = self.airport.config.passengers;
        let (flight, boarded) = self
            .airport
            .update(|state| {
                state.hostess = HostessState::ReadyToFlight;
                if state.total_boarded == passengers {
                    state.finished = true;
                }
                state.save_state();
                state.save_event(FlightEvent::FlightDeparted);
                (state.flight_number, state.in_flight_count)
            })
            .await;
        info!(flight, boarded, "boarding complete");
        self.airport.sync.boarding_complete.signal();
    }

    async fn set_state(&self, hostess: HostessState) {
        self.airport
            .update(|state| {
                state.hostess = hostess;
                state.save_state();
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(in_flight: usize, queued: usize, total: usize) -> FlightState {
        let mut state = FlightState::new(10);
        state.in_flight_count = in_flight;
        state.queue_count = queued;
        state.total_boarded = total;
        state
    }

    #[test]
    fn full_plane_is_last() {
        let config = SimConfig::instant(10, 2, 4);
        assert!(is_last_for_flight(&state(4, 3, 4), &config));
    }

    #[test]
    fn minimum_with_empty_queue_is_last() {
        let config = SimConfig::instant(10, 2, 4);
        assert!(is_last_for_flight(&state(2, 0, 6), &config));
        assert!(!is_last_for_flight(&state(2, 1, 6), &config));
        assert!(!is_last_for_flight(&state(1, 0, 5), &config));
    }

    #[test]
    fn final_passenger_is_last_below_minimum() {
        let config = SimConfig::instant(10, 3, 4);
        assert!(is_last_for_flight(&state(1, 0, 10), &config));
    }
}
