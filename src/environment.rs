use rand::Rng;

use crate::rng::SimRng;

pub const TEMPERATURE_MIN: i32 = -30;
pub const TEMPERATURE_MAX: i32 = 38;
pub const HUMIDITY_MIN: i32 = 0;
pub const HUMIDITY_MAX: i32 = 100;
pub const WATER_MIN: i32 = 0;
pub const WATER_MAX: i32 = 1_000_000;

/// Shared climate state of the ecosystem. Every mutation re-applies the
/// bounds immediately, so readers never observe an out-of-range value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    temperature: i32,
    humidity: i32,
    water: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEvent {
    Rain,
    Sunny,
    Cloudy,
}

impl WeatherEvent {
    /// Draws one of the three events uniformly.
    pub fn sample(rng: &mut SimRng) -> Self {
        match rng.gen_range(0..3) {
            0 => WeatherEvent::Rain,
            1 => WeatherEvent::Sunny,
            _ => WeatherEvent::Cloudy,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            WeatherEvent::Rain => "Rain falls over the ecosystem.",
            WeatherEvent::Sunny => "The sun shines over the ecosystem.",
            WeatherEvent::Cloudy => "Clouds gather over the ecosystem.",
        }
    }
}

impl Environment {
    pub fn new(temperature: i32, humidity: i32, water: i32) -> Self {
        let mut env = Self {
            temperature,
            humidity,
            water,
        };
        env.clamp();
        env
    }

    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn humidity(&self) -> i32 {
        self.humidity
    }

    pub fn water(&self) -> i32 {
        self.water
    }

    pub fn apply_weather(&mut self, event: WeatherEvent, rng: &mut SimRng) {
        match event {
            WeatherEvent::Rain => {
                self.humidity += rng.gen_range(0..3);
                self.water += 50_000 + rng.gen_range(0..50_000);
            }
            WeatherEvent::Sunny => {
                self.temperature += rng.gen_range(0..2);
                self.water -= rng.gen_range(0..50_000);
            }
            WeatherEvent::Cloudy => {
                self.temperature -= rng.gen_range(0..2);
                self.humidity -= rng.gen_range(0..3);
                self.water += rng.gen_range(0..20_000);
            }
        }
        self.clamp();
    }

    /// Debits `amount` only when the pool covers it. Callers decide what a
    /// shortage means by testing `water() < amount` beforehand.
    pub fn consume_water(&mut self, amount: i32) {
        if self.water >= amount {
            self.water -= amount;
        }
    }

    fn clamp(&mut self) {
        self.temperature = self.temperature.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX);
        self.humidity = self.humidity.clamp(HUMIDITY_MIN, HUMIDITY_MAX);
        self.water = self.water.clamp(WATER_MIN, WATER_MAX);
    }
}
