use anyhow::Result;

use crate::ecosystem::Ecosystem;
use crate::engine::{CycleContext, System};
use crate::journal::Journal;
use crate::rng::SimRng;
use crate::systems::population;

/// Animal phase of a cycle: the reproduce/act pass, then the starvation and
/// old-age culls.
pub struct FaunaSystem;

impl FaunaSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FaunaSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for FaunaSystem {
    fn name(&self) -> &'static str {
        "fauna"
    }

    fn run(
        &mut self,
        _ctx: &CycleContext,
        eco: &mut Ecosystem,
        rng: &mut SimRng,
        journal: &mut dyn Journal,
    ) -> Result<()> {
        population::act_all_animals(eco, rng, journal);
        population::cull_starved(eco);
        population::cull_aged(eco);
        Ok(())
    }
}
