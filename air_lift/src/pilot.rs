use tracing::{debug, info};

use crate::actor_state::PilotState;
use crate::airport::AirportRef;
use crate::observer::FlightEvent;

pub struct Pilot {
    airport: AirportRef,
}

impl Pilot {
    pub fn new(airport: AirportRef) -> Pilot {
        Pilot { airport }
    }

    /// Flies until the hostess has declared the air lift finished.
    pub async fn run(&self) -> anyhow::Result<()> {
        while !self.is_finished().await {
            self.flight(false).await;
            self.signal_ready_for_boarding().await;
            self.wait_until_ready_to_flight().await?;
            self.flight(true).await;
            self.drop_passengers_at_target().await?;
        }
        info!("pilot done");
        Ok(())
    }

    async fn is_finished(&self) -> bool {
        self.airport.update(|state| state.finished).await
    }

    /// `to_destination` is false for the empty leg back to the origin.
    pub async fn flight(&self, to_destination: bool) {
        let pilot = if to_destination { PilotState::Flying } else { PilotState::FlyingBack };
        self.airport
            .update(|state| {
                state.pilot = pilot;
                state.save_state();
            })
            .await;
        debug!(?pilot, "pilot flying");
        self.airport.config.flight.sleep().await;
    }

    pub async fn signal_ready_for_boarding(&self) {
        let flight = self
            .airport
            .update(|state| {
                state.pilot = PilotState::ReadyForBoarding;
                state.flight_number += 1;
                state.save_state();
                state.save_event(FlightEvent::BoardingStarted);
                state.flight_number
            })
            .await;
        info!(flight, "boarding started");
        self.airport.sync.boarding_open.signal();
    }

    pub async fn wait_until_ready_to_flight(&self) -> anyhow::Result<()> {
        self.airport
            .update(|state| {
                state.pilot = PilotState::WaitingForBoarding;
                state.save_state();
            })
            .await;
        self.airport.sync.boarding_complete.wait().await
    }

    /// Lets every seated passenger out and waits for the last one to leave.
    pub async fn drop_passengers_at_target(&self) -> anyhow::Result<()> {
        let seats = self
            .airport
            .update(|state| {
                state.save_event(FlightEvent::FlightArrived);
                state.pilot = PilotState::DropingPassengers;
                state.save_state();
                state.in_flight_count
            })
            .await;
        debug!(seats, "releasing passengers");

        for _ in 0..seats {
            self.airport.sync.destination_reached.signal();
        }
        self.airport.sync.plane_empty.wait().await?;

        let flight = self
            .airport
            .update(|state| {
                state.pilot = PilotState::FlyingBack;
                state.save_event(FlightEvent::FlightReturning);
                state.flight_number
            })
            .await;
        info!(flight, "plane empty, returning");
        Ok(())
    }
}
