use anyhow::Result;

use crate::ecosystem::Ecosystem;
use crate::engine::{CycleContext, System};
use crate::environment::WeatherEvent;
use crate::journal::Journal;
use crate::rng::SimRng;

/// Closes each cycle with exactly one uniformly drawn weather event.
pub struct WeatherSystem;

impl WeatherSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeatherSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WeatherSystem {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn run(
        &mut self,
        _ctx: &CycleContext,
        eco: &mut Ecosystem,
        rng: &mut SimRng,
        journal: &mut dyn Journal,
    ) -> Result<()> {
        let event = WeatherEvent::sample(rng);
        eco.environment.apply_weather(event, rng);
        journal.record(event.describe());
        Ok(())
    }
}
