use super::{MembershipFunction, Universe};
use crate::error::{IrrigoError, Result};
use serde::Serialize;

/// A named universe plus an ordered table of linguistic terms. Term order
/// is preserved for reproducible diagnostics and chart legends.
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: &'static str,
    universe: Universe,
    terms: Vec<(&'static str, MembershipFunction)>,
}

/// Membership degrees of one crisp input across every term of a variable.
#[derive(Debug, Clone, Serialize)]
pub struct VariableDegrees {
    pub variable: &'static str,
    pub degrees: Vec<(&'static str, f64)>,
}

impl VariableDegrees {
    pub fn degree(&self, term: &str) -> Option<f64> {
        self.degrees
            .iter()
            .find(|(name, _)| *name == term)
            .map(|(_, d)| *d)
    }
}

impl LinguisticVariable {
    pub fn new(
        name: &'static str,
        universe: Universe,
        terms: Vec<(&'static str, MembershipFunction)>,
    ) -> Result<Self> {
        if terms.is_empty() {
            return Err(IrrigoError::Definition(format!(
                "variable '{}' has no terms",
                name
            )));
        }
        for (i, (term, _)) in terms.iter().enumerate() {
            if terms[..i].iter().any(|(other, _)| other == term) {
                return Err(IrrigoError::Definition(format!(
                    "variable '{}' defines term '{}' more than once",
                    name, term
                )));
            }
        }
        Ok(Self {
            name,
            universe,
            terms,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &[(&'static str, MembershipFunction)] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&MembershipFunction> {
        self.terms
            .iter()
            .find(|(term, _)| *term == name)
            .map(|(_, mf)| mf)
    }

    /// Evaluate every term's membership at a crisp value. The caller is
    /// expected to clip the value into the universe first; terms do not
    /// clip on their own.
    pub fn fuzzify(&self, x: f64) -> VariableDegrees {
        VariableDegrees {
            variable: self.name,
            degrees: self
                .terms
                .iter()
                .map(|(term, mf)| (*term, mf.degree(x)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moisture() -> LinguisticVariable {
        LinguisticVariable::new(
            "soil_moisture",
            Universe::new(0.0, 100.0, 101).unwrap(),
            vec![
                (
                    "very_dry",
                    MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 20.0).unwrap(),
                ),
                (
                    "dry",
                    MembershipFunction::triangular(10.0, 30.0, 50.0).unwrap(),
                ),
                (
                    "normal",
                    MembershipFunction::triangular(40.0, 60.0, 80.0).unwrap(),
                ),
                (
                    "wet",
                    MembershipFunction::trapezoidal(70.0, 80.0, 100.0, 100.0).unwrap(),
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn fuzzify_covers_every_term_in_order() {
        let var = moisture();
        let degrees = var.fuzzify(15.0);
        let names: Vec<&str> = degrees.degrees.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["very_dry", "dry", "normal", "wet"]);
        assert!((degrees.degree("very_dry").unwrap() - 0.5).abs() < 1e-12);
        assert!((degrees.degree("dry").unwrap() - 0.25).abs() < 1e-12);
        assert_eq!(degrees.degree("normal").unwrap(), 0.0);
        assert_eq!(degrees.degree("wet").unwrap(), 0.0);
    }

    #[test]
    fn overlapping_terms_are_not_normalized() {
        let var = moisture();
        let degrees = var.fuzzify(75.0);
        let sum: f64 = degrees.degrees.iter().map(|(_, d)| d).sum();
        // normal 0.25 + wet 0.5: overlap sums freely, never forced to 1
        assert!((sum - 0.75).abs() < 1e-12);
    }

    #[test]
    fn degrees_in_unit_interval_across_domain() {
        let var = moisture();
        for x in var.universe().points().collect::<Vec<_>>() {
            for (term, d) in var.fuzzify(x).degrees {
                assert!((0.0..=1.0).contains(&d), "{} at {} = {}", term, x, d);
            }
        }
    }

    #[test]
    fn duplicate_terms_are_rejected() {
        let u = Universe::new(0.0, 1.0, 11).unwrap();
        let mf = MembershipFunction::triangular(0.0, 0.5, 1.0).unwrap();
        let result = LinguisticVariable::new("x", u, vec![("low", mf), ("low", mf)]);
        assert!(result.is_err());
    }

    #[test]
    fn empty_term_table_is_rejected() {
        let u = Universe::new(0.0, 1.0, 11).unwrap();
        assert!(LinguisticVariable::new("x", u, vec![]).is_err());
    }
}
