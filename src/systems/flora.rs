use anyhow::Result;

use crate::ecosystem::Ecosystem;
use crate::engine::{CycleContext, System};
use crate::journal::Journal;
use crate::rng::SimRng;
use crate::systems::population;

/// Plant phase of a cycle: the grow/reproduce pass, then pruning of plants
/// that wilted below growth zero.
pub struct FloraSystem;

impl FloraSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FloraSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for FloraSystem {
    fn name(&self) -> &'static str {
        "flora"
    }

    fn run(
        &mut self,
        _ctx: &CycleContext,
        eco: &mut Ecosystem,
        rng: &mut SimRng,
        journal: &mut dyn Journal,
    ) -> Result<()> {
        population::grow_all_plants(eco, rng, journal);
        population::cull_wilted(eco);
        Ok(())
    }
}
