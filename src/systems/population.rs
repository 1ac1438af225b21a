//! Per-cycle population bookkeeping.
//!
//! Both cycles share one shape: drop carcasses, offer everyone a buffered
//! reproduction attempt, merge the newcomers, let everyone (newcomers
//! included) take their turn, then drop carcasses again. Offspring are
//! buffered during the reproduction pass so nobody breeds against a
//! conspecific born in the same pass.
//!
//! Starvation, old-age and wilt culls are separate steps invoked by the
//! driver between phases, not by the cycles themselves.

use crate::ecosystem::Ecosystem;
use crate::journal::Journal;
use crate::rng::SimRng;
use crate::systems::behavior;

pub fn act_all_animals(eco: &mut Ecosystem, rng: &mut SimRng, journal: &mut dyn Journal) {
    eco.animals.retain(|a| !a.consumed);

    let mut offspring = Vec::new();
    for idx in 0..eco.animals.len() {
        if let Some(child) = behavior::reproduce_animal(eco, idx, rng) {
            offspring.push(child);
        }
    }
    eco.animals.extend(offspring);

    for idx in 0..eco.animals.len() {
        behavior::act_animal(eco, idx, rng, journal);
    }

    eco.animals.retain(|a| !a.consumed);
}

pub fn grow_all_plants(eco: &mut Ecosystem, rng: &mut SimRng, journal: &mut dyn Journal) {
    eco.plants.retain(|p| !p.consumed);

    let mut seedlings = Vec::new();
    for idx in 0..eco.plants.len() {
        seedlings.extend(behavior::reproduce_plant(eco, idx, rng, journal));
    }
    eco.plants.extend(seedlings);

    for idx in 0..eco.plants.len() {
        behavior::grow_plant(eco, idx, journal);
    }

    eco.plants.retain(|p| !p.consumed);
}

/// Animals whose energy went negative died of starvation.
pub fn cull_starved(eco: &mut Ecosystem) {
    eco.animals.retain(|a| a.energy >= 0);
}

/// Animals older than their lifespan died of old age.
pub fn cull_aged(eco: &mut Ecosystem) {
    eco.animals.retain(|a| a.current_age <= a.life_time);
}

/// Plants that wilted below growth zero are gone for good.
pub fn cull_wilted(eco: &mut Ecosystem) {
    eco.plants.retain(|p| p.growth_level >= 0);
}
