//! State-change observers.
//!
//! The protocol calls an observer synchronously from inside every critical section that
//! mutates [`FlightState`], so observers see snapshots in commit order. Observers must not
//! block for long and their failures stay inside the observer.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::flight_state::FlightState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlightEvent {
    BoardingStarted,
    PassengerChecked,
    FlightDeparted,
    FlightArrived,
    FlightReturning,
}

pub trait FlightObserver: Send + Sync {
    fn save_state(&self, state: &FlightState);

    fn save_event(&self, event: FlightEvent, state: &FlightState);

    /// Called once after every actor has terminated.
    fn finish(&self, _state: &FlightState) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    State(FlightState),
    Event(FlightEvent, FlightState),
}

impl Record {
    pub fn state(&self) -> &FlightState {
        match self {
            Record::State(state) => state,
            Record::Event(_, state) => state,
        }
    }

    pub fn event(&self) -> Option<FlightEvent> {
        match self {
            Record::State(_) => None,
            Record::Event(event, _) => Some(*event),
        }
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    records: Mutex<Vec<Record>>,
}

impl RecordingObserver {
    pub fn new() -> RecordingObserver {
        RecordingObserver::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().map(|records| records.clone()).unwrap_or_default()
    }

    pub fn events(&self) -> Vec<(FlightEvent, FlightState)> {
        self.records()
            .into_iter()
            .filter_map(|record| match record {
                Record::Event(event, state) => Some((event, state)),
                Record::State(_) => None,
            })
            .collect()
    }

    fn push(&self, record: Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

impl FlightObserver for RecordingObserver {
    fn save_state(&self, state: &FlightState) {
        self.push(Record::State(state.clone()));
    }

    fn save_event(&self, event: FlightEvent, state: &FlightState) {
        self.push(Record::Event(event, state.clone()));
    }
}

/// Ignores everything.
pub struct NullObserver;

impl FlightObserver for NullObserver {
    fn save_state(&self, _state: &FlightState) {}

    fn save_event(&self, _event: FlightEvent, _state: &FlightState) {}
}

/// Forwards every call to each inner observer, in order.
pub struct Fanout {
    observers: Vec<Arc<dyn FlightObserver>>,
}

impl Fanout {
    pub fn new(observers: Vec<Arc<dyn FlightObserver>>) -> Fanout {
        Fanout { observers }
    }
}

impl FlightObserver for Fanout {
    fn save_state(&self, state: &FlightState) {
        for observer in &self.observers {
            observer.save_state(state);
        }
    }

    fn save_event(&self, event: FlightEvent, state: &FlightState) {
        for observer in &self.observers {
            observer.save_event(event, state);
        }
    }

    fn finish(&self, state: &FlightState) {
        for observer in &self.observers {
            observer.finish(state);
        }
    }
}
