//! Saving and loading ecosystems as line-oriented text.
//!
//! The shape is three climate headers, then an `Animals:` and a `Plants:`
//! section in either order, one entity per line as comma-separated
//! `key: value` pairs. A trailing `Count: N` expands into N identical
//! entities on load. Validation failures are collected per field and the
//! whole load is rejected atomically; a partially valid file never yields
//! a partial ecosystem.

use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::ecosystem::Ecosystem;
use crate::entities::{Animal, Diet, Plant};
use crate::environment::{
    Environment, HUMIDITY_MAX, HUMIDITY_MIN, TEMPERATURE_MAX, TEMPERATURE_MIN, WATER_MAX,
    WATER_MIN,
};

/// Upper bound accepted for stored animal energy.
pub const ENERGY_MAX: i32 = 180;
/// Upper bound accepted for stored plant growth.
pub const GROWTH_MAX: i32 = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub line: usize,
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid save file: {} field error(s)", .errors.len())]
    Invalid { errors: Vec<FieldError> },
}

pub fn save(eco: &Ecosystem, path: impl AsRef<Path>) -> std::io::Result<()> {
    fs::write(path, render(eco))
}

pub fn load(path: impl AsRef<Path>) -> Result<Ecosystem, LoadError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

fn level_word(level: u8) -> &'static str {
    match level {
        1 => "Primary",
        2 => "Secondary",
        _ => "Tertiary",
    }
}

fn render(eco: &Ecosystem) -> String {
    let mut out = String::new();
    out.push_str(&format!("Temperature: {}\n", eco.environment.temperature()));
    out.push_str(&format!("Humidity: {}\n", eco.environment.humidity()));
    out.push_str(&format!("Water amount: {}\n", eco.environment.water()));

    out.push_str("Animals:\n");
    for (number, animal) in eco.animals.iter().enumerate() {
        out.push_str(&format!(
            "{}. Name: {}, Species: {}, Food Chain Level: {}, Energy: {}, \
             Average Lifespan: {} hours, Age: {} hours, Count: 1\n",
            number + 1,
            animal.name,
            animal.diet,
            level_word(animal.food_chain_level),
            animal.energy,
            animal.life_time,
            animal.current_age,
        ));
    }

    out.push_str("Plants:\n");
    for (number, plant) in eco.plants.iter().enumerate() {
        out.push_str(&format!(
            "{}. Name: {}, Growth Level: {}, Water Needs: {} per day, \
             Optimal Temperature: {} degrees, Count: 1\n",
            number + 1,
            plant.name,
            plant.growth_level,
            plant.water_needs,
            plant.optimal_temperature,
        ));
    }
    out
}

fn parse(text: &str) -> Result<Ecosystem, LoadError> {
    Parser::new(text).parse()
}

enum Section {
    Animals,
    Plants,
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    index: usize,
    errors: Vec<FieldError>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            index: 0,
            errors: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Ecosystem, LoadError> {
        let temperature = self.header_int("temperature", TEMPERATURE_MIN, TEMPERATURE_MAX);
        let humidity = self.header_int("humidity", HUMIDITY_MIN, HUMIDITY_MAX);
        let water = self.header_int("water amount", WATER_MIN, WATER_MAX);

        let mut animals = Vec::new();
        let mut plants = Vec::new();
        let mut section = None;

        while let Some((line_no, line)) = self.next_line() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.to_lowercase().as_str() {
                "animals:" => {
                    section = Some(Section::Animals);
                    continue;
                }
                "plants:" => {
                    section = Some(Section::Plants);
                    continue;
                }
                _ => {}
            }
            match section {
                Some(Section::Animals) => animals.extend(self.parse_animal_line(trimmed, line_no)),
                Some(Section::Plants) => plants.extend(self.parse_plant_line(trimmed, line_no)),
                None => self.errors.push(FieldError {
                    line: line_no,
                    field: "section".into(),
                    message: "expected an 'Animals:' or 'Plants:' section header".into(),
                }),
            }
        }

        if self.errors.is_empty() {
            Ok(Ecosystem::with_entities(
                Environment::new(temperature, humidity, water),
                animals,
                plants,
            ))
        } else {
            Err(LoadError::Invalid {
                errors: self.errors,
            })
        }
    }

    /// Returns the next line along with its 1-based number.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.get(self.index)?;
        self.index += 1;
        Some((self.index, line))
    }

    fn header_int(&mut self, key: &'static str, min: i32, max: i32) -> i32 {
        let Some((line_no, line)) = self.next_line() else {
            self.errors.push(FieldError {
                line: self.lines.len() + 1,
                field: key.into(),
                message: "missing header line".into(),
            });
            return min;
        };
        let lower = line.trim().to_lowercase();
        let value = lower
            .strip_prefix(key)
            .and_then(|rest| rest.trim_start().strip_prefix(':'))
            .and_then(int_value);
        match value {
            Some(v) if (min..=max).contains(&v) => v,
            Some(v) => {
                self.errors.push(FieldError {
                    line: line_no,
                    field: key.into(),
                    message: format!("value {v} outside {min}..={max}"),
                });
                min
            }
            None => {
                self.errors.push(FieldError {
                    line: line_no,
                    field: key.into(),
                    message: format!("expected '{key}: <integer>'"),
                });
                min
            }
        }
    }

    fn parse_animal_line(&mut self, line: &str, line_no: usize) -> Vec<Animal> {
        let pairs = split_pairs(line);
        let before = self.errors.len();

        let name = self.required_text(&pairs, "name", line_no);
        let diet = self.required_word(&pairs, "species", line_no, |word| match word {
            "herbivore" => Some(Diet::Herbivore),
            "carnivore" => Some(Diet::Carnivore),
            "omnivore" => Some(Diet::Omnivore),
            _ => None,
        });
        let level = self.required_word(&pairs, "food chain level", line_no, |word| match word {
            "primary" => Some(1u8),
            "secondary" => Some(2),
            "tertiary" => Some(3),
            _ => None,
        });
        let energy = self.required_int(&pairs, "energy", line_no, 0, ENERGY_MAX);
        let life_time = self.required_int(&pairs, "average lifespan", line_no, 0, i32::MAX);
        let age = self.required_int(&pairs, "age", line_no, 0, i32::MAX);
        let count = self.required_int(&pairs, "count", line_no, 0, i32::MAX);

        if self.errors.len() > before {
            return Vec::new();
        }
        let (name, diet, level) = (name.unwrap(), diet.unwrap(), level.unwrap());
        (0..count.unwrap())
            .map(|_| {
                Animal::new(
                    name.clone(),
                    diet,
                    energy.unwrap(),
                    level,
                    life_time.unwrap(),
                    age.unwrap(),
                )
            })
            .collect()
    }

    fn parse_plant_line(&mut self, line: &str, line_no: usize) -> Vec<Plant> {
        let pairs = split_pairs(line);
        let before = self.errors.len();

        let name = self.required_text(&pairs, "name", line_no);
        let growth = self.required_int(&pairs, "growth level", line_no, 0, GROWTH_MAX);
        let water_needs = self.required_int(&pairs, "water needs", line_no, 0, i32::MAX);
        let optimal = self.required_int(
            &pairs,
            "optimal temperature",
            line_no,
            TEMPERATURE_MIN,
            TEMPERATURE_MAX,
        );
        let count = self.required_int(&pairs, "count", line_no, 0, i32::MAX);

        if self.errors.len() > before {
            return Vec::new();
        }
        let name = name.unwrap();
        (0..count.unwrap())
            .map(|_| {
                Plant::new(
                    name.clone(),
                    growth.unwrap(),
                    water_needs.unwrap(),
                    optimal.unwrap(),
                )
            })
            .collect()
    }

    fn lookup<'p>(pairs: &'p [(String, String)], key: &str) -> Option<&'p str> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn required_text(
        &mut self,
        pairs: &[(String, String)],
        key: &'static str,
        line_no: usize,
    ) -> Option<String> {
        match Self::lookup(pairs, key) {
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ => {
                self.errors.push(FieldError {
                    line: line_no,
                    field: key.into(),
                    message: "missing or empty".into(),
                });
                None
            }
        }
    }

    fn required_word<T>(
        &mut self,
        pairs: &[(String, String)],
        key: &'static str,
        line_no: usize,
        decode: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let word = Self::lookup(pairs, key).map(|v| v.to_lowercase());
        match word.as_deref().and_then(&decode) {
            Some(value) => Some(value),
            None => {
                self.errors.push(FieldError {
                    line: line_no,
                    field: key.into(),
                    message: match word {
                        Some(w) => format!("unrecognized value '{w}'"),
                        None => "missing".into(),
                    },
                });
                None
            }
        }
    }

    fn required_int(
        &mut self,
        pairs: &[(String, String)],
        key: &'static str,
        line_no: usize,
        min: i32,
        max: i32,
    ) -> Option<i32> {
        match Self::lookup(pairs, key).and_then(int_value) {
            Some(v) if (min..=max).contains(&v) => Some(v),
            Some(v) => {
                self.errors.push(FieldError {
                    line: line_no,
                    field: key.into(),
                    message: format!("value {v} outside {min}..={max}"),
                });
                None
            }
            None => {
                self.errors.push(FieldError {
                    line: line_no,
                    field: key.into(),
                    message: "missing or not an integer".into(),
                });
                None
            }
        }
    }
}

/// Splits an entity line into normalized `(key, value)` pairs, dropping the
/// leading `N.` ordinal off the first key.
fn split_pairs(line: &str) -> Vec<(String, String)> {
    line.split(',')
        .filter_map(|part| {
            let (key, value) = part.split_once(':')?;
            Some((normalize_key(key), value.trim().to_string()))
        })
        .collect()
}

fn normalize_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_ordinal = match trimmed.split_once('.') {
        Some((prefix, rest)) if prefix.chars().all(|c| c.is_ascii_digit()) => rest.trim(),
        _ => trimmed,
    };
    without_ordinal.to_lowercase()
}

/// Leading integer of a value, tolerating unit suffixes such as
/// `2000 hours`, `5 per day` or `-3 degrees`.
fn int_value(raw: &str) -> Option<i32> {
    raw.trim().split_whitespace().next()?.parse().ok()
}
