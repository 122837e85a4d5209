use super::defuzz::centroid;
use super::rule::{is, Antecedent, Rule};
use super::{LinguisticVariable, MembershipFunction, Universe, VariableDegrees};
use crate::error::{IrrigoError, Result};
use serde::Serialize;

/// Default number of grid points for the output universe. Finer grids
/// sharpen the centroid approximation at linear cost.
pub const DEFAULT_OUTPUT_RESOLUTION: usize = 301;

/// Firing strength of one rule for a given set of inputs.
#[derive(Debug, Clone, Serialize)]
pub struct RuleStrength {
    pub label: &'static str,
    pub consequent: &'static str,
    pub strength: f64,
}

/// Everything one `evaluate` call produced: the crisp duration plus the
/// intermediate state callers need for charts and session logs. Owned by
/// the caller; the engine keeps no per-call state.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceResult {
    pub input_degrees: Vec<VariableDegrees>,
    pub rule_strengths: Vec<RuleStrength>,
    pub aggregated_curve: Vec<(f64, f64)>,
    pub duration: f64,
    /// True when no rule fired and the midpoint fallback was used.
    pub fallback: bool,
}

/// Mamdani inference engine: three input variables, one output variable
/// and a fixed ordered rule set, all validated at construction and
/// immutable afterwards. `evaluate` is a pure function, so a shared
/// reference can serve any number of threads.
pub struct InferenceEngine {
    inputs: Vec<LinguisticVariable>,
    output: LinguisticVariable,
    rules: Vec<Rule>,
}

impl InferenceEngine {
    pub fn new(
        inputs: Vec<LinguisticVariable>,
        output: LinguisticVariable,
        rules: Vec<Rule>,
    ) -> Result<Self> {
        if rules.is_empty() {
            return Err(IrrigoError::Definition("rule set is empty".into()));
        }
        for rule in &rules {
            for (variable, term) in rule.antecedent.leaves() {
                let var = inputs
                    .iter()
                    .find(|v| v.name() == variable)
                    .ok_or_else(|| {
                        IrrigoError::Definition(format!(
                            "rule '{}' references unknown variable '{}'",
                            rule.label, variable
                        ))
                    })?;
                if var.term(term).is_none() {
                    return Err(IrrigoError::Definition(format!(
                        "rule '{}' references unknown term '{}.{}'",
                        rule.label, variable, term
                    )));
                }
            }
            if output.term(rule.consequent).is_none() {
                return Err(IrrigoError::Definition(format!(
                    "rule '{}' asserts unknown output term '{}.{}'",
                    rule.label,
                    output.name(),
                    rule.consequent
                )));
            }
        }
        Ok(Self {
            inputs,
            output,
            rules,
        })
    }

    /// The fixed greenhouse irrigation system: soil moisture, ambient
    /// temperature and solar radiation in, irrigation duration out,
    /// twelve rules.
    pub fn greenhouse(output_resolution: usize) -> Result<Self> {
        let soil_moisture = LinguisticVariable::new(
            "soil_moisture",
            Universe::new(0.0, 100.0, 101)?,
            vec![
                ("very_dry", MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 20.0)?),
                ("dry", MembershipFunction::triangular(10.0, 30.0, 50.0)?),
                ("normal", MembershipFunction::triangular(40.0, 60.0, 80.0)?),
                ("wet", MembershipFunction::trapezoidal(70.0, 80.0, 100.0, 100.0)?),
            ],
        )?;

        let temperature = LinguisticVariable::new(
            "temperature",
            Universe::new(0.0, 40.0, 41)?,
            vec![
                ("cold", MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 15.0)?),
                ("mild", MembershipFunction::triangular(10.0, 20.0, 30.0)?),
                ("hot", MembershipFunction::trapezoidal(25.0, 30.0, 40.0, 40.0)?),
            ],
        )?;

        let radiation = LinguisticVariable::new(
            "radiation",
            Universe::new(0.0, 1000.0, 101)?,
            vec![
                ("low", MembershipFunction::trapezoidal(0.0, 0.0, 250.0, 350.0)?),
                ("medium", MembershipFunction::triangular(250.0, 500.0, 750.0)?),
                ("high", MembershipFunction::trapezoidal(650.0, 750.0, 1000.0, 1000.0)?),
            ],
        )?;

        let duration = LinguisticVariable::new(
            "irrigation_duration",
            Universe::new(0.0, 30.0, output_resolution)?,
            vec![
                ("very_short", MembershipFunction::trapezoidal(0.0, 0.0, 4.0, 6.0)?),
                ("short", MembershipFunction::triangular(4.0, 8.0, 12.0)?),
                ("medium", MembershipFunction::triangular(10.0, 17.0, 24.0)?),
                ("long", MembershipFunction::trapezoidal(20.0, 24.0, 30.0, 30.0)?),
            ],
        )?;

        let rules = vec![
            Rule::new(
                "R1: Very dry + hot + high radiation",
                is("soil_moisture", "very_dry")
                    .and(is("temperature", "hot"))
                    .and(is("radiation", "high")),
                "long",
            ),
            Rule::new(
                "R2: Very dry + hot + medium radiation",
                is("soil_moisture", "very_dry")
                    .and(is("temperature", "hot"))
                    .and(is("radiation", "medium")),
                "long",
            ),
            Rule::new(
                "R3: Very dry + mild",
                is("soil_moisture", "very_dry").and(is("temperature", "mild")),
                "long",
            ),
            Rule::new(
                "R4: Dry + hot",
                is("soil_moisture", "dry").and(is("temperature", "hot")),
                "medium",
            ),
            Rule::new(
                "R5: Dry + high radiation",
                is("soil_moisture", "dry").and(is("radiation", "high")),
                "medium",
            ),
            Rule::new(
                "R6: Normal + hot + high radiation",
                is("soil_moisture", "normal")
                    .and(is("temperature", "hot"))
                    .and(is("radiation", "high")),
                "medium",
            ),
            Rule::new(
                "R7: Normal + low radiation",
                is("soil_moisture", "normal").and(is("radiation", "low")),
                "short",
            ),
            Rule::new("R8: Wet", is("soil_moisture", "wet"), "very_short"),
            Rule::new(
                "R9: Dry + cold",
                is("soil_moisture", "dry").and(is("temperature", "cold")),
                "short",
            ),
            Rule::new(
                "R10: Very dry + cold",
                is("soil_moisture", "very_dry").and(is("temperature", "cold")),
                "medium",
            ),
            Rule::new(
                "R11: High radiation + hot",
                is("radiation", "high").and(is("temperature", "hot")),
                "medium",
            ),
            Rule::new(
                "R12: Normal + mild + medium radiation",
                is("soil_moisture", "normal")
                    .and(is("temperature", "mild"))
                    .and(is("radiation", "medium")),
                "short",
            ),
        ];

        Self::new(vec![soil_moisture, temperature, radiation], duration, rules)
    }

    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run one inference: clip the readings into their universes, fuzzify,
    /// evaluate every rule's firing strength, clip each consequent term at
    /// that strength (Mamdani implication = min), aggregate with max and
    /// defuzzify by centroid.
    ///
    /// When no rule fires at all the centroid is undefined; the result then
    /// carries the midpoint of the output universe (15 min) with the
    /// `fallback` flag set.
    pub fn evaluate(&self, soil_moisture: f64, temperature: f64, radiation: f64) -> InferenceResult {
        let raw = [soil_moisture, temperature, radiation];
        let input_degrees: Vec<VariableDegrees> = self
            .inputs
            .iter()
            .zip(raw)
            .map(|(var, x)| var.fuzzify(var.universe().clip(x)))
            .collect();

        let rule_strengths: Vec<RuleStrength> = self
            .rules
            .iter()
            .map(|rule| RuleStrength {
                label: rule.label,
                consequent: rule.consequent,
                strength: rule.antecedent.strength(&input_degrees),
            })
            .collect();

        // Consequent membership functions, resolved once per rule rather
        // than once per grid point. References were validated in `new`.
        let consequents: Vec<(f64, &MembershipFunction)> = rule_strengths
            .iter()
            .filter_map(|rs| self.output.term(rs.consequent).map(|mf| (rs.strength, mf)))
            .collect();

        let aggregated_curve: Vec<(f64, f64)> = self
            .output
            .universe()
            .points()
            .map(|x| {
                let mu = consequents
                    .iter()
                    .map(|(strength, mf)| strength.min(mf.degree(x)))
                    .fold(0.0_f64, f64::max);
                (x, mu)
            })
            .collect();

        let (duration, fallback) = match centroid(&aggregated_curve) {
            Some(c) => (c, false),
            None => (self.output.universe().midpoint(), true),
        };

        InferenceResult {
            input_degrees,
            rule_strengths,
            aggregated_curve,
            duration,
            fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> InferenceEngine {
        InferenceEngine::greenhouse(DEFAULT_OUTPUT_RESOLUTION).unwrap()
    }

    #[test]
    fn moderately_dry_and_hot_centers_on_medium() {
        // Only medium-duration rules fire (R4 0.6, R5 0.75, R11 0.6), so
        // the clipped medium triangle is symmetric about its peak.
        let result = engine().evaluate(35.0, 28.0, 750.0);
        assert!(!result.fallback);
        assert!(
            (result.duration - 17.0).abs() < 0.2,
            "duration = {}",
            result.duration
        );
    }

    #[test]
    fn drought_conditions_land_in_the_long_band() {
        let result = engine().evaluate(15.0, 35.0, 900.0);
        assert!(!result.fallback);
        assert!(
            result.duration > 18.0 && result.duration < 25.0,
            "duration = {}",
            result.duration
        );
    }

    #[test]
    fn wet_soil_gets_a_very_short_watering() {
        let result = engine().evaluate(85.0, 18.0, 300.0);
        assert!(
            result.duration > 2.0 && result.duration < 3.0,
            "duration = {}",
            result.duration
        );
    }

    #[test]
    fn saturated_cold_dark_is_dominated_by_the_wet_rule() {
        let result = engine().evaluate(100.0, 0.0, 0.0);
        let wet_rule = &result.rule_strengths[7];
        assert_eq!(wet_rule.label, "R8: Wet");
        assert_eq!(wet_rule.strength, 1.0);
        for rs in &result.rule_strengths {
            if rs.label != "R8: Wet" {
                assert_eq!(rs.strength, 0.0, "{} fired", rs.label);
            }
        }
        assert!(result.duration < 6.0, "duration = {}", result.duration);
    }

    #[test]
    fn duration_does_not_decrease_as_soil_dries() {
        let eng = engine();
        let moistures = [95.0, 75.0, 60.0, 45.0, 35.0, 15.0, 5.0];
        let mut previous = f64::NEG_INFINITY;
        for m in moistures {
            let duration = eng.evaluate(m, 20.0, 500.0).duration;
            assert!(
                duration >= previous - 1e-9,
                "duration dropped from {} to {} at moisture {}",
                previous,
                duration,
                m
            );
            previous = duration;
        }
    }

    #[test]
    fn rule_coverage_gap_uses_midpoint_fallback() {
        // Dry soil under mild temperature and medium radiation matches no
        // rule antecedent, so the aggregated curve is identically zero.
        let result = engine().evaluate(35.0, 20.0, 500.0);
        assert!(result.fallback);
        assert_eq!(result.duration, 15.0);
        assert!(result.rule_strengths.iter().all(|rs| rs.strength == 0.0));
        assert!(result.aggregated_curve.iter().all(|(_, mu)| *mu == 0.0));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let eng = engine();
        let a = eng.evaluate(42.0, 23.5, 610.0);
        let b = eng.evaluate(42.0, 23.5, 610.0);
        assert_eq!(a.duration, b.duration);
        assert_eq!(a.rule_strengths.len(), b.rule_strengths.len());
        for (x, y) in a.rule_strengths.iter().zip(&b.rule_strengths) {
            assert_eq!(x.strength, y.strength);
        }
    }

    #[test]
    fn out_of_domain_inputs_are_clipped_not_rejected() {
        let eng = engine();
        let clipped = eng.evaluate(150.0, -5.0, 2000.0);
        let exact = eng.evaluate(100.0, 0.0, 1000.0);
        assert_eq!(clipped.duration, exact.duration);
        assert!(!clipped.fallback);
    }

    #[test]
    fn centroid_converges_with_grid_resolution() {
        let coarse = InferenceEngine::greenhouse(301)
            .unwrap()
            .evaluate(15.0, 35.0, 900.0)
            .duration;
        let fine = InferenceEngine::greenhouse(3001)
            .unwrap()
            .evaluate(15.0, 35.0, 900.0)
            .duration;
        assert!((coarse - fine).abs() < 0.1, "{} vs {}", coarse, fine);
    }

    #[test]
    fn rule_order_is_preserved_for_diagnostics() {
        let eng = engine();
        let labels: Vec<&str> = eng.rules().iter().map(|r| r.label).collect();
        assert_eq!(labels.len(), 12);
        assert!(labels[0].starts_with("R1:"));
        assert!(labels[11].starts_with("R12:"));
    }

    #[test]
    fn firing_strengths_stay_in_unit_interval() {
        let eng = engine();
        for soil in [0.0, 15.0, 35.0, 60.0, 85.0, 100.0] {
            for temp in [0.0, 12.0, 20.0, 28.0, 40.0] {
                for rad in [0.0, 300.0, 500.0, 750.0, 1000.0] {
                    let result = eng.evaluate(soil, temp, rad);
                    for rs in &result.rule_strengths {
                        assert!(
                            (0.0..=1.0).contains(&rs.strength),
                            "{} = {} at ({}, {}, {})",
                            rs.label,
                            rs.strength,
                            soil,
                            temp,
                            rad
                        );
                    }
                    assert!((0.0..=30.0).contains(&result.duration));
                }
            }
        }
    }

    #[test]
    fn unknown_rule_references_fail_at_construction() {
        let good = engine();
        let inputs = good.inputs().to_vec();
        let output = good.output().clone();

        let bad_term = vec![Rule::new(
            "bad",
            is("soil_moisture", "damp"),
            "very_short",
        )];
        assert!(InferenceEngine::new(inputs.clone(), output.clone(), bad_term).is_err());

        let bad_variable = vec![Rule::new("bad", is("wind", "strong"), "very_short")];
        assert!(InferenceEngine::new(inputs.clone(), output.clone(), bad_variable).is_err());

        let bad_consequent = vec![Rule::new("bad", is("soil_moisture", "wet"), "forever")];
        assert!(InferenceEngine::new(inputs.clone(), output.clone(), bad_consequent).is_err());

        assert!(InferenceEngine::new(inputs, output, vec![]).is_err());
    }
}
