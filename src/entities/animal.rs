use std::fmt;

use serde::Deserialize;

/// Trophic role of an animal. `Animal::name` identifies the species for
/// conspecific matching; the diet tag picks the behavior tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    Herbivore,
    Carnivore,
    Omnivore,
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Diet::Herbivore => "Herbivore",
            Diet::Carnivore => "Carnivore",
            Diet::Omnivore => "Omnivore",
        };
        f.write_str(word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    pub name: String,
    pub diet: Diet,
    pub energy: i32,
    pub food_chain_level: u8,
    pub life_time: i32,
    pub current_age: i32,
    pub consumed: bool,
}

impl Animal {
    pub fn new(
        name: impl Into<String>,
        diet: Diet,
        energy: i32,
        food_chain_level: u8,
        life_time: i32,
        current_age: i32,
    ) -> Self {
        Self {
            name: name.into(),
            diet,
            energy,
            food_chain_level,
            life_time,
            current_age,
            consumed: false,
        }
    }

    /// A newborn of the same species: fixed starting energy, age zero,
    /// everything else inherited.
    pub fn offspring(&self) -> Self {
        Self::new(
            self.name.clone(),
            self.diet,
            60,
            self.food_chain_level,
            self.life_time,
            0,
        )
    }

    /// Daily water requirement; carnivores never drink from the shared pool.
    pub fn water_needs(&self) -> Option<i32> {
        match self.diet {
            Diet::Herbivore => Some(match self.food_chain_level {
                1 => 10,
                2 => 19,
                3 => 25,
                _ => 0,
            }),
            Diet::Omnivore => Some(match self.food_chain_level {
                3 => 6,
                _ => 4,
            }),
            Diet::Carnivore => None,
        }
    }

    /// Energy lost when the shared pool cannot cover `water_needs`.
    pub fn thirst_penalty(&self) -> i32 {
        match self.diet {
            Diet::Herbivore => 30,
            Diet::Omnivore => 10,
            Diet::Carnivore => 0,
        }
    }

    /// Reproduction succeeds when a uniform draw exceeds this value, so a
    /// higher entry means a rarer birth.
    pub fn reproduce_chance(&self) -> f64 {
        let table = match self.diet {
            Diet::Herbivore => [0.4, 0.55, 0.65],
            Diet::Carnivore => [0.8, 0.85, 0.95],
            Diet::Omnivore => [0.6, 0.8, 0.9],
        };
        match self.food_chain_level {
            1 => table[0],
            2 => table[1],
            3 => table[2],
            _ => 0.0,
        }
    }

    /// Energy the parent pays for a successful birth.
    pub fn reproduction_cost(&self) -> i32 {
        let table = match self.diet {
            Diet::Herbivore => [10, 30, 40],
            Diet::Carnivore => [40, 55, 60],
            Diet::Omnivore => [50, 55, 60],
        };
        match self.food_chain_level {
            1 => table[0],
            2 => table[1],
            3 => table[2],
            _ => 0,
        }
    }

    /// Energy gained from a successful kill.
    pub fn hunt_gain(&self) -> i32 {
        match self.diet {
            Diet::Carnivore => match self.food_chain_level {
                1 => 45,
                2 | 3 => 50,
                _ => 0,
            },
            Diet::Omnivore => match self.food_chain_level {
                1 => 35,
                2 | 3 => 45,
                _ => 0,
            },
            Diet::Herbivore => 0,
        }
    }
}
