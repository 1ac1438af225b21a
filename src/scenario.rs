use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::ecosystem::Ecosystem;
use crate::entities::{Animal, Diet, Plant};
use crate::environment::{
    Environment, HUMIDITY_MAX, HUMIDITY_MIN, TEMPERATURE_MAX, TEMPERATURE_MIN, WATER_MAX,
    WATER_MIN,
};
use crate::persist::{ENERGY_MAX, GROWTH_MAX};

fn default_energy() -> i32 {
    60
}

fn default_count() -> u32 {
    1
}

/// A YAML-described starting state: climate plus per-species stocking
/// counts. Replaces hand-assembling an `Ecosystem` in code.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default)]
    pub hours: Option<u64>,
    pub environment: EnvironmentInit,
    #[serde(default)]
    pub animals: Vec<AnimalStock>,
    #[serde(default)]
    pub plants: Vec<PlantStock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentInit {
    pub temperature: i32,
    pub humidity: i32,
    pub water: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimalStock {
    pub name: String,
    pub diet: Diet,
    pub level: u8,
    #[serde(default = "default_energy")]
    pub energy: i32,
    pub life_time: i32,
    #[serde(default)]
    pub age: i32,
    #[serde(default = "default_count")]
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlantStock {
    pub name: String,
    #[serde(default)]
    pub growth_level: i32,
    pub water_needs: i32,
    pub optimal_temperature: i32,
    #[serde(default = "default_count")]
    pub count: u32,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.name.is_empty(), "scenario must have a name");
        let env = &self.environment;
        ensure!(
            (TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&env.temperature),
            "temperature {} outside {TEMPERATURE_MIN}..={TEMPERATURE_MAX}",
            env.temperature
        );
        ensure!(
            (HUMIDITY_MIN..=HUMIDITY_MAX).contains(&env.humidity),
            "humidity {} outside {HUMIDITY_MIN}..={HUMIDITY_MAX}",
            env.humidity
        );
        ensure!(
            (WATER_MIN..=WATER_MAX).contains(&env.water),
            "water {} outside {WATER_MIN}..={WATER_MAX}",
            env.water
        );

        for stock in &self.animals {
            ensure!(!stock.name.is_empty(), "animal stock must have a name");
            ensure!(
                (1..=3).contains(&stock.level),
                "'{}': food chain level {} outside 1..=3",
                stock.name,
                stock.level
            );
            ensure!(
                (0..=ENERGY_MAX).contains(&stock.energy),
                "'{}': energy {} outside 0..={ENERGY_MAX}",
                stock.name,
                stock.energy
            );
            ensure!(
                stock.life_time >= 0 && stock.age >= 0,
                "'{}': lifespan and age must be non-negative",
                stock.name
            );
        }
        for stock in &self.plants {
            ensure!(!stock.name.is_empty(), "plant stock must have a name");
            ensure!(
                (0..=GROWTH_MAX).contains(&stock.growth_level),
                "'{}': growth level {} outside 0..={GROWTH_MAX}",
                stock.name,
                stock.growth_level
            );
            ensure!(
                stock.water_needs >= 0,
                "'{}': water needs must be non-negative",
                stock.name
            );
            ensure!(
                (TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&stock.optimal_temperature),
                "'{}': optimal temperature {} outside {TEMPERATURE_MIN}..={TEMPERATURE_MAX}",
                stock.name,
                stock.optimal_temperature
            );
        }
        Ok(())
    }

    pub fn build_ecosystem(&self) -> Ecosystem {
        let env = Environment::new(
            self.environment.temperature,
            self.environment.humidity,
            self.environment.water,
        );
        let mut eco = Ecosystem::new(env);
        for stock in &self.animals {
            for _ in 0..stock.count {
                eco.animals.push(Animal::new(
                    stock.name.clone(),
                    stock.diet,
                    stock.energy,
                    stock.level,
                    stock.life_time,
                    stock.age,
                ));
            }
        }
        for stock in &self.plants {
            for _ in 0..stock.count {
                eco.plants.push(Plant::new(
                    stock.name.clone(),
                    stock.growth_level,
                    stock.water_needs,
                    stock.optimal_temperature,
                ));
            }
        }
        eco
    }

    pub fn hours(&self, override_hours: Option<u64>) -> u64 {
        override_hours.or(self.hours).unwrap_or(720)
    }
}
