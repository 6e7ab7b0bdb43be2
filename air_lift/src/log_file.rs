use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::Local;
use tracing::warn;

use crate::flight_state::FlightState;
use crate::observer::{FlightEvent, FlightObserver};

const TITLE: &str = "Air Lift - Description of the internal state";

/// Writes the state table of a simulation to a text file.
pub struct FileLogger {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileLogger {
    /// Truncates `path` and writes the title and column header.
    pub fn create(path: impl AsRef<Path>, passengers: usize) -> anyhow::Result<FileLogger> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).with_context(|| format!("could not create log {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{TITLE}")?;
        writeln!(writer, "started {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(writer)?;
        writeln!(writer, "{}", header(passengers))?;
        Ok(FileLogger {
            path,
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) {
        let Ok(mut writer) = self.writer.lock() else { return };
        if let Err(e) = writeln!(writer, "{line}") {
            warn!("could not write to {}: {e}", self.path.display());
        }
    }
}

impl FlightObserver for FileLogger {
    fn save_state(&self, state: &FlightState) {
        self.write_line(&state_row(state));
    }

    fn save_event(&self, event: FlightEvent, state: &FlightState) {
        self.write_line(&event_line(event, state));
    }

    fn finish(&self, state: &FlightState) {
        self.write_line("");
        self.write_line("Airlift sum up:");
        for (index, boarded) in state.boarded_per_flight.iter().enumerate() {
            self.write_line(&format!("Flight {} transported {boarded} passengers", index + 1));
        }
        let Ok(mut writer) = self.writer.lock() else { return };
        if let Err(e) = writer.flush() {
            warn!("could not flush {}: {e}", self.path.display());
        }
    }
}

pub fn header(passengers: usize) -> String {
    let mut line = format!("{:<4} {:<4}", "PT", "HT");
    for id in 0..passengers {
        line.push_str(&format!(" P{id:02}"));
    }
    line.push_str(&format!(" {:>3} {:>3} {:>3}", "InQ", "InF", "TPB"));
    line
}

pub fn state_row(state: &FlightState) -> String {
    let mut line = format!("{:<4} {:<4}", state.pilot.code(), state.hostess.code());
    for passenger in &state.passengers {
        line.push_str(&format!(" {:>3}", passenger.code()));
    }
    line.push_str(&format!(
        " {:>3} {:>3} {:>3}",
        state.queue_count, state.in_flight_count, state.total_boarded
    ));
    line
}

pub fn event_line(event: FlightEvent, state: &FlightState) -> String {
    let flight = state.flight_number;
    match event {
        FlightEvent::BoardingStarted => format!("Flight {flight}: boarding started"),
        FlightEvent::PassengerChecked => match state.last_checked_passenger {
            Some(id) => format!("Flight {flight}: passenger {id} checked"),
            None => format!("Flight {flight}: passenger checked"),
        },
        FlightEvent::FlightDeparted => format!("Flight {flight}: departed with {} passengers", state.in_flight_count),
        FlightEvent::FlightArrived => format!("Flight {flight}: arrived"),
        FlightEvent::FlightReturning => format!("Flight {flight}: returning"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_state::PassengerState;

    #[test]
    fn rows_line_up_with_header() {
        let mut state = FlightState::new(3);
        state.passengers[1] = PassengerState::InQueue;
        state.queue_count = 1;
        let row = state_row(&state);
        assert_eq!(row.len(), header(3).len());
        assert_eq!(row, "FLBK WTFL   G   Q   G   1   0   0");
    }

    #[test]
    fn event_lines_name_the_flight() {
        let mut state = FlightState::new(3);
        state.flight_number = 2;
        state.in_flight_count = 3;
        state.last_checked_passenger = Some(1);
        assert_eq!(event_line(FlightEvent::PassengerChecked, &state), "Flight 2: passenger 1 checked");
        assert_eq!(event_line(FlightEvent::FlightDeparted, &state), "Flight 2: departed with 3 passengers");
    }

    #[test]
    fn writes_table_and_summary() {
        let dir = std::env::temp_dir().join(format!("air_lift_log_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("log");

        let logger = FileLogger::create(&path, 2).unwrap();
        let mut state = FlightState::new(2);
        logger.save_state(&state);
        state.flight_number = 1;
        logger.save_event(FlightEvent::BoardingStarted, &state);
        state.boarded_per_flight = vec![2];
        logger.finish(&state);

        let text = std::fs::read_to_string(logger.path()).unwrap();
        assert!(text.starts_with(TITLE));
        assert!(text.contains(&header(2)));
        assert!(text.contains("Flight 1: boarding started"));
        assert!(text.contains("Flight 1 transported 2 passengers"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
