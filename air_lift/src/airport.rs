use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::SimConfig;
use crate::flight_state::FlightState;
use crate::observer::{FlightEvent, FlightObserver};
use crate::sync_set::SynchronizationSet;

/// Everything the actors of one simulation share.
pub struct Airport {
    pub config: SimConfig,
    pub sync: SynchronizationSet,
    state: Mutex<FlightState>,
    observer: Arc<dyn FlightObserver>,
}

pub type AirportRef = Arc<Airport>;

/// Exclusive access to the state for the duration of one [`Airport::update`] call.
pub struct StateScope<'a> {
    state: &'a mut FlightState,
    observer: &'a dyn FlightObserver,
}

impl StateScope<'_> {
    pub fn save_state(&self) {
        self.observer.save_state(&*self.state);
    }

    pub fn save_event(&self, event: FlightEvent) {
        self.observer.save_event(event, &*self.state);
    }
}

impl Deref for StateScope<'_> {
    type Target = FlightState;

    fn deref(&self) -> &FlightState {
        &*self.state
    }
}

impl DerefMut for StateScope<'_> {
    fn deref_mut(&mut self) -> &mut FlightState {
        &mut *self.state
    }
}

impl Airport {
    pub fn new(config: SimConfig, observer: Arc<dyn FlightObserver>) -> Airport {
        let state = FlightState::new(config.passengers);
        Airport {
            config,
            sync: SynchronizationSet::new(),
            state: Mutex::new(state),
            observer,
        }
    }

    /// Runs `critical` with the state lock held.
    ///
    /// The closure is synchronous, so no rendezvous wait can happen while the lock is held.
    pub async fn update<R>(&self, critical: impl FnOnce(&mut StateScope<'_>) -> R) -> R {
        let mut guard = self.state.lock().await;
        let mut scope = StateScope {
            state: &mut *guard,
            observer: self.observer.as_ref(),
        };
        critical(&mut scope)
    }

    pub async fn snapshot(&self) -> FlightState {
        self.state.lock().await.clone()
    }

    pub fn observer(&self) -> &Arc<dyn FlightObserver> {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{Record, RecordingObserver};

    #[tokio::test]
    async fn update_records_through_observer() {
        let recorder = Arc::new(RecordingObserver::new());
        let airport = Airport::new(SimConfig::instant(2, 1, 2), recorder.clone());

        let queued = airport
            .update(|state| {
                state.queue_count += 1;
                state.save_state();
                state.flight_number += 1;
                state.save_event(FlightEvent::BoardingStarted);
                state.queue_count
            })
            .await;

        assert_eq!(queued, 1);
        let records = recorder.records();
        assert!(matches!(&records[0], Record::State(state) if state.flight_number == 0));
        assert!(matches!(&records[1], Record::Event(FlightEvent::BoardingStarted, state) if state.flight_number == 1));
        assert_eq!(airport.snapshot().await.queue_count, 1);
    }
}
