//! Heuristic population outlook. Reporting only: the engine never consults
//! these trends. The thresholds compare trophic-group head counts against
//! each other and against the plant supply; float division is left
//! unguarded on empty pools on purpose, so the comparisons fall through to
//! the pessimistic branch exactly as the reference heuristics do.

use std::fmt;

use crate::ecosystem::Ecosystem;
use crate::entities::Diet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increase,
    Stable,
    Decrease,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Trend::Increase => "likely to increase",
            Trend::Stable => "likely to remain stable",
            Trend::Decrease => "likely to decrease",
        };
        f.write_str(word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outlook {
    pub herbivores: Trend,
    pub omnivores: Trend,
    pub carnivores: Trend,
    pub plants: Trend,
}

pub fn population_outlook(eco: &Ecosystem) -> Outlook {
    let mut herbivores = 0usize;
    let mut omnivores = 0usize;
    let mut carnivores = 0usize;
    for animal in &eco.animals {
        match animal.diet {
            Diet::Herbivore => herbivores += 1,
            Diet::Omnivore => omnivores += 1,
            Diet::Carnivore => carnivores += 1,
        }
    }
    let animals = eco.animals.len();
    let plants = eco.plants.len();

    let herbivore_share = herbivores as f32 / animals as f32;
    let omnivore_share = omnivores as f32 / animals as f32;
    let carnivore_share = carnivores as f32 / animals as f32;
    let grazers = herbivores + omnivores;
    let plant_ratio = plants as f32 / grazers as f32;

    let herbivore_trend = if herbivore_share > 0.5 && grazers > plants {
        Trend::Increase
    } else if herbivore_share > 0.5 || grazers > plants {
        Trend::Stable
    } else {
        Trend::Decrease
    };

    let omnivore_trend = if omnivore_share > 0.25 && grazers > plants {
        Trend::Increase
    } else if omnivore_share > 0.25 || grazers > plants {
        Trend::Stable
    } else {
        Trend::Decrease
    };

    let carnivore_trend = if carnivore_share > 0.25 && carnivore_share < 0.8 {
        Trend::Increase
    } else if carnivore_share < 0.25 {
        Trend::Stable
    } else {
        Trend::Decrease
    };

    let plant_trend = if plant_ratio > 2.0 {
        Trend::Increase
    } else if plant_ratio < 2.0 && plant_ratio > 1.0 {
        Trend::Stable
    } else {
        Trend::Decrease
    };

    Outlook {
        herbivores: herbivore_trend,
        omnivores: omnivore_trend,
        carnivores: carnivore_trend,
        plants: plant_trend,
    }
}
