pub mod defuzz;
pub mod engine;
pub mod membership;
pub mod rule;
pub mod universe;
pub mod variable;

pub use engine::{InferenceEngine, InferenceResult, RuleStrength, DEFAULT_OUTPUT_RESOLUTION};
pub use membership::MembershipFunction;
pub use rule::{is, Antecedent, Rule};
pub use universe::Universe;
pub use variable::{LinguisticVariable, VariableDegrees};
