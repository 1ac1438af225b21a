mod animal;
mod plant;

pub use animal::{Animal, Diet};
pub use plant::Plant;
