pub mod ecosystem;
pub mod engine;
pub mod entities;
pub mod environment;
pub mod journal;
pub mod persist;
pub mod prediction;
pub mod rng;
pub mod scenario;
pub mod systems;

pub use ecosystem::Ecosystem;
pub use engine::{Engine, SimulationSummary};
pub use scenario::{Scenario, ScenarioLoader};
