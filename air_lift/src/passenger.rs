use anyhow::bail;
use tracing::debug;

use crate::actor_state::PassengerState;
use crate::airport::AirportRef;
use crate::flight_state::PassengerId;

pub struct Passenger {
    id: PassengerId,
    airport: AirportRef,
}

impl Passenger {
    pub fn new(id: PassengerId, airport: AirportRef) -> anyhow::Result<Passenger> {
        let passengers = airport.config.passengers;
        if id >= passengers {
            bail!("passenger id {id} is out of range 0..{passengers}");
        }
        Ok(Passenger { id, airport })
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        self.travel_to_airport().await;
        self.wait_in_queue().await?;
        self.wait_until_destination().await
    }

    pub async fn travel_to_airport(&self) {
        self.airport.config.travel.sleep().await;
    }

    /// Joins the queue, then hands the identity document to the hostess once she calls.
    pub async fn wait_in_queue(&self) -> anyhow::Result<()> {
        let id = self.id;
        self.airport
            .update(|state| {
                state.passengers[id] = PassengerState::InQueue;
                state.queue_count += 1;
                state.save_state();
            })
            .await;
        debug!(id, "passenger in queue");

        self.airport.sync.queue_has_passengers.signal();
        self.airport.sync.hostess_ready_for_next.wait().await?;

        let identity_presented = &self.airport.sync.identity_presented;
        self.airport
            .update(|state| {
                identity_presented.signal();
                state.last_checked_passenger = Some(id);
                state.passengers[id] = PassengerState::InFlight;
                state.save_state();
            })
            .await;
        Ok(())
    }

    /// Waits for landing and leaves the plane. The last one out tells the pilot.
    pub async fn wait_until_destination(&self) -> anyhow::Result<()> {
        self.airport.sync.destination_reached.wait().await?;

        let id = self.id;
        let plane_empty = &self.airport.sync.plane_empty;
        self.airport
            .update(|state| {
                state.passengers[id] = PassengerState::AtDestination;
                state.in_flight_count -= 1;
                state.save_state();
                if state.in_flight_count == 0 {
                    plane_empty.signal();
                }
            })
            .await;
        debug!(id, "passenger at destination");
        Ok(())
    }
}
