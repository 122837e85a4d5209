use serde::{Deserialize, Serialize};

/// One named set of environmental readings to run through the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Soil moisture in percent, 0-100
    pub soil_moisture: f64,
    /// Ambient temperature in degrees Celsius, 0-40
    pub temperature: f64,
    /// Solar radiation in W/m², 0-1000
    pub radiation: f64,
}

impl Scenario {
    pub fn new(name: impl Into<String>, soil_moisture: f64, temperature: f64, radiation: f64) -> Self {
        Self {
            name: name.into(),
            soil_moisture,
            temperature,
            radiation,
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: H={}%, T={}°C, R={} W/m²",
            self.name, self.soil_moisture, self.temperature, self.radiation
        )
    }
}

/// Representative greenhouse conditions for batch runs.
pub fn sample_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Extreme conditions", 15.0, 35.0, 900.0),
        Scenario::new("Dry with high radiation", 30.0, 25.0, 750.0),
        Scenario::new("Normal conditions", 60.0, 22.0, 500.0),
        Scenario::new("Wet soil", 80.0, 20.0, 400.0),
        Scenario::new("Cold and dry", 25.0, 12.0, 300.0),
        Scenario::new("Very dry but cold", 10.0, 8.0, 200.0),
        Scenario::new("Normal with little light", 65.0, 18.0, 150.0),
        Scenario::new("Moderate heat, dry", 35.0, 28.0, 600.0),
    ]
}

/// Boundary conditions probing the edges of every universe.
pub fn extreme_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Absolute minimum", 0.0, 0.0, 0.0),
        Scenario::new("Absolute maximum", 100.0, 40.0, 1000.0),
        Scenario::new("Daytime desert", 5.0, 40.0, 1000.0),
        Scenario::new("Saturated greenhouse", 95.0, 15.0, 100.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_tables_stay_inside_input_domains() {
        for s in sample_scenarios().iter().chain(extreme_scenarios().iter()) {
            assert!((0.0..=100.0).contains(&s.soil_moisture), "{}", s.name);
            assert!((0.0..=40.0).contains(&s.temperature), "{}", s.name);
            assert!((0.0..=1000.0).contains(&s.radiation), "{}", s.name);
        }
    }

    #[test]
    fn table_sizes_match_the_menus() {
        assert_eq!(sample_scenarios().len(), 8);
        assert_eq!(extreme_scenarios().len(), 4);
    }
}
