pub mod memberships;
pub mod simulation;

pub use memberships::MembershipsScreen;
pub use simulation::SimulationScreen;
