use crate::error::Result;
use crate::models::{SessionSummary, SimulationRecord};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const CSV_HEADER: &str =
    "timestamp,scenario,soil_moisture_pct,temperature_c,radiation_w_m2,duration_min,note";

/// Records simulation results for one session: a CSV file appended to as
/// results arrive, and a JSON summary written when the session closes.
/// Lives entirely outside the engine; inference never touches the
/// filesystem.
pub struct SessionLogger {
    session_id: String,
    csv_path: PathBuf,
    json_path: PathBuf,
    records: Vec<SimulationRecord>,
}

impl SessionLogger {
    pub fn start(log_dir: &Path, session_prefix: &str) -> Result<Self> {
        fs::create_dir_all(log_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let session_id = format!("{}_{}", session_prefix, timestamp);
        let csv_path = log_dir.join(format!("{}.csv", session_id));
        let json_path = log_dir.join(format!("{}.json", session_id));

        fs::write(&csv_path, format!("{}\n", CSV_HEADER))?;
        tracing::info!(session = %session_id, "session started");

        Ok(Self {
            session_id,
            csv_path,
            json_path,
            records: Vec::new(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    pub fn records(&self) -> &[SimulationRecord] {
        &self.records
    }

    /// Append one result to the session CSV and keep it for the summary.
    pub fn log(&mut self, record: SimulationRecord) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            file,
            "{},{},{},{},{},{:.2},{}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            csv_field(&record.scenario),
            record.soil_moisture,
            record.temperature,
            record.radiation,
            record.duration_min,
            csv_field(&record.note),
        )?;
        self.records.push(record);
        Ok(())
    }

    /// Write the JSON summary for everything logged so far.
    pub fn save_summary(&self) -> Result<SessionSummary> {
        let summary = SessionSummary::new(self.session_id.clone(), self.records.clone());
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(&self.json_path, json)?;
        tracing::info!(path = %self.json_path.display(), "session summary saved");
        Ok(summary)
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("irrigo-test-{}-{}", tag, std::process::id()))
    }

    #[test]
    fn csv_grows_one_row_per_record() {
        let dir = scratch_dir("csv");
        let mut logger = SessionLogger::start(&dir, "unit").unwrap();
        logger
            .log(SimulationRecord::new("Wet soil", 80.0, 20.0, 400.0, 3.1))
            .unwrap();
        logger
            .log(SimulationRecord::new("Normal conditions", 60.0, 22.0, 500.0, 8.0))
            .unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].contains("Wet soil"));
        assert!(lines[2].contains("8.00"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn summary_reflects_logged_records() {
        let dir = scratch_dir("summary");
        let mut logger = SessionLogger::start(&dir, "unit").unwrap();
        logger
            .log(SimulationRecord::new("a", 15.0, 35.0, 900.0, 21.0))
            .unwrap();
        logger
            .log(SimulationRecord::new("b", 85.0, 18.0, 300.0, 2.5))
            .unwrap();

        let summary = logger.save_summary().unwrap();
        assert_eq!(summary.num_simulations, 2);
        assert_eq!(summary.stats.duration_max, 21.0);
        assert!(logger.json_path().exists());

        let json = fs::read_to_string(logger.json_path()).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records.len(), 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
