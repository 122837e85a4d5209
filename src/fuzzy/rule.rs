use super::VariableDegrees;

/// A rule antecedent: a boolean expression tree whose leaves look up the
/// membership degree of one (variable, term) pair. Conjunction takes the
/// minimum of its operands, disjunction the maximum.
#[derive(Debug, Clone)]
pub enum Antecedent {
    Is {
        variable: &'static str,
        term: &'static str,
    },
    And(Box<Antecedent>, Box<Antecedent>),
    Or(Box<Antecedent>, Box<Antecedent>),
}

/// Leaf constructor, the starting point for building an antecedent.
pub fn is(variable: &'static str, term: &'static str) -> Antecedent {
    Antecedent::Is { variable, term }
}

impl Antecedent {
    pub fn and(self, other: Antecedent) -> Antecedent {
        Antecedent::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Antecedent) -> Antecedent {
        Antecedent::Or(Box::new(self), Box::new(other))
    }

    /// Firing strength of this expression against fuzzified inputs.
    /// A leaf that references a variable or term missing from `degrees`
    /// contributes zero; the engine validates references at construction
    /// so this only matters for hand-built expressions.
    pub fn strength(&self, degrees: &[VariableDegrees]) -> f64 {
        match self {
            Antecedent::Is { variable, term } => degrees
                .iter()
                .find(|d| d.variable == *variable)
                .and_then(|d| d.degree(term))
                .unwrap_or(0.0),
            Antecedent::And(lhs, rhs) => lhs.strength(degrees).min(rhs.strength(degrees)),
            Antecedent::Or(lhs, rhs) => lhs.strength(degrees).max(rhs.strength(degrees)),
        }
    }

    /// Every (variable, term) leaf in the expression, for validation.
    pub fn leaves(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            Antecedent::Is { variable, term } => vec![(*variable, *term)],
            Antecedent::And(lhs, rhs) | Antecedent::Or(lhs, rhs) => {
                let mut all = lhs.leaves();
                all.extend(rhs.leaves());
                all
            }
        }
    }
}

/// One fuzzy rule: an antecedent plus the output term it asserts.
/// The label carries through to diagnostics and session logs.
#[derive(Debug, Clone)]
pub struct Rule {
    pub label: &'static str,
    pub antecedent: Antecedent,
    pub consequent: &'static str,
}

impl Rule {
    pub fn new(label: &'static str, antecedent: Antecedent, consequent: &'static str) -> Self {
        Self {
            label,
            antecedent,
            consequent,
        }
    }
}
