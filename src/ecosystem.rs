use std::collections::HashMap;

use crate::entities::{Animal, Plant};
use crate::environment::Environment;

/// One closed habitat: a shared climate plus unordered animal and plant
/// pools. Entities are owned exclusively; species grouping is computed on
/// demand rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Ecosystem {
    pub environment: Environment,
    pub animals: Vec<Animal>,
    pub plants: Vec<Plant>,
}

impl Ecosystem {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            animals: Vec::new(),
            plants: Vec::new(),
        }
    }

    pub fn with_entities(
        environment: Environment,
        animals: Vec<Animal>,
        plants: Vec<Plant>,
    ) -> Self {
        Self {
            environment,
            animals,
            plants,
        }
    }

    pub fn conspecific_count(&self, name: &str) -> usize {
        self.animals.iter().filter(|a| a.name == name).count()
    }

    /// Per-species headcount across both pools, keyed by species name.
    pub fn species_census(&self) -> HashMap<String, usize> {
        let mut census = HashMap::new();
        for animal in &self.animals {
            *census.entry(animal.name.clone()).or_insert(0) += 1;
        }
        for plant in &self.plants {
            *census.entry(plant.name.clone()).or_insert(0) += 1;
        }
        census
    }
}
