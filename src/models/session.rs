use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged simulation: the inputs that were run and the duration the
/// engine produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub timestamp: DateTime<Utc>,
    pub scenario: String,
    pub soil_moisture: f64,
    pub temperature: f64,
    pub radiation: f64,
    pub duration_min: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl SimulationRecord {
    pub fn new(
        scenario: impl Into<String>,
        soil_moisture: f64,
        temperature: f64,
        radiation: f64,
        duration_min: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            scenario: scenario.into(),
            soil_moisture,
            temperature,
            radiation,
            duration_min,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Duration statistics over a session's records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub duration_min: f64,
    pub duration_max: f64,
    pub duration_mean: f64,
}

impl SessionStats {
    pub fn from_records(records: &[SimulationRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let durations: Vec<f64> = records.iter().map(|r| r.duration_min).collect();
        let min = durations.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = durations.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = durations.iter().sum::<f64>() / durations.len() as f64;
        Self {
            duration_min: min,
            duration_max: max,
            duration_mean: mean,
        }
    }
}

/// The JSON summary written when a session closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub started: Option<DateTime<Utc>>,
    pub finished: Option<DateTime<Utc>>,
    pub num_simulations: usize,
    pub stats: SessionStats,
    pub records: Vec<SimulationRecord>,
}

impl SessionSummary {
    pub fn new(session_id: impl Into<String>, records: Vec<SimulationRecord>) -> Self {
        Self {
            session_id: session_id.into(),
            started: records.first().map(|r| r.timestamp),
            finished: records.last().map(|r| r.timestamp),
            num_simulations: records.len(),
            stats: SessionStats::from_records(&records),
            records,
        }
    }
}
