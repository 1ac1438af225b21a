//! Per-entity behavior: the daily state machine for animals and plants.
//!
//! Every function here mutates the ecosystem through an index into the
//! relevant pool, so callers can iterate a pool by index while entities
//! flag each other as consumed. Resource shortages (no water, no prey, no
//! plants) are ordinary branch outcomes, never errors.

use rand::Rng;

use crate::ecosystem::Ecosystem;
use crate::entities::{Animal, Diet, Plant};
use crate::journal::Journal;
use crate::rng::SimRng;

/// Energy threshold below which an animal goes looking for food.
const HUNGER_THRESHOLD: i32 = 100;
/// Energy spent on an uneventful, well-fed day.
const BASELINE_COST: i32 = 5;
/// Minimum age before an animal can breed.
const BREEDING_AGE: i32 = 1000;

/// One animal turn: age, drink, then feed or idle.
pub fn act_animal(eco: &mut Ecosystem, idx: usize, rng: &mut SimRng, journal: &mut dyn Journal) {
    eco.animals[idx].current_age += 24;

    if let Some(needs) = eco.animals[idx].water_needs() {
        if eco.environment.water() < needs {
            if eco.animals[idx].diet == Diet::Omnivore {
                journal.record(&format!("{} cannot find water.", eco.animals[idx].name));
            }
            let penalty = eco.animals[idx].thirst_penalty();
            eco.animals[idx].energy -= penalty;
        } else {
            eco.environment.consume_water(needs);
        }
    }

    if eco.animals[idx].energy >= HUNGER_THRESHOLD {
        eco.animals[idx].energy -= BASELINE_COST;
        return;
    }

    journal.record(&format!(
        "{} explores the area in search of food.",
        eco.animals[idx].name
    ));
    match eco.animals[idx].diet {
        Diet::Herbivore => graze(eco, idx, rng, journal, 60, 5),
        Diet::Carnivore => hunt(eco, idx, rng, journal, 20, 20, true),
        Diet::Omnivore => {
            let plant_preference = match eco.animals[idx].food_chain_level {
                1 => 0.3,
                2 => 0.25,
                3 => 0.2,
                _ => 0.5,
            };
            if rng.gen::<f64>() > plant_preference {
                hunt(eco, idx, rng, journal, 15, 10, false);
            } else {
                graze(eco, idx, rng, journal, 50, 10);
            }
        }
    }
}

/// Eat a uniformly chosen not-yet-consumed plant, or pay `penalty` when
/// none are standing.
fn graze(
    eco: &mut Ecosystem,
    idx: usize,
    rng: &mut SimRng,
    journal: &mut dyn Journal,
    gain: i32,
    penalty: i32,
) {
    let standing = eco.plants.iter().filter(|p| !p.consumed).count();
    if standing == 0 {
        journal.record(&format!(
            "{} cannot find plants for food.",
            eco.animals[idx].name
        ));
        eco.animals[idx].energy -= penalty;
        return;
    }

    let mut target = rng.gen_range(0..eco.plants.len());
    while eco.plants[target].consumed {
        target = rng.gen_range(0..eco.plants.len());
    }

    journal.record(&format!(
        "{} feeds on the plant {}.",
        eco.animals[idx].name, eco.plants[target].name
    ));
    eco.plants[target].consumed = true;
    eco.animals[idx].energy += gain;
}

/// Hunt among animals of a different species at or below the hunter's food
/// chain level. Target selection rejection-samples the raw pool; the
/// eligibility count taken first guarantees the loop terminates.
///
/// `retry_excludes_consumed` is false on the omnivore path: its retry guard
/// tolerates re-targeting a carcass flagged earlier in the same cycle.
fn hunt(
    eco: &mut Ecosystem,
    idx: usize,
    rng: &mut SimRng,
    journal: &mut dyn Journal,
    no_prey_penalty: i32,
    escape_penalty: i32,
    retry_excludes_consumed: bool,
) {
    let hunter_name = eco.animals[idx].name.clone();
    let hunter_level = eco.animals[idx].food_chain_level;

    let eligible = eco
        .animals
        .iter()
        .filter(|a| a.name != hunter_name && a.food_chain_level <= hunter_level && !a.consumed)
        .count();
    if eligible == 0 {
        journal.record("The hunt was unsuccessful (no prey available).");
        eco.animals[idx].energy -= no_prey_penalty;
        return;
    }

    let mut target = rng.gen_range(0..eco.animals.len());
    while eco.animals[target].name == hunter_name
        || eco.animals[target].food_chain_level > hunter_level
        || (retry_excludes_consumed && eco.animals[target].consumed)
    {
        target = rng.gen_range(0..eco.animals.len());
    }

    let gain = eco.animals[idx].hunt_gain();
    if rng.gen::<f64>() > 0.2 {
        journal.record(&format!(
            "{} successfully hunts {}.",
            hunter_name, eco.animals[target].name
        ));
        eco.animals[target].consumed = true;
        eco.animals[idx].energy += gain;
    } else {
        journal.record("The hunt was unsuccessful (the prey escaped).");
        eco.animals[idx].energy -= escape_penalty;
    }
}

/// Offer one reproduction attempt. The probability roll comes before the
/// conspecific count, so the draw sequence matches even when the count
/// gate fails. Offspring are returned, not inserted; the caller merges
/// them after the whole pass.
pub fn reproduce_animal(eco: &mut Ecosystem, idx: usize, rng: &mut SimRng) -> Option<Animal> {
    let animal = &eco.animals[idx];
    if animal.energy < HUNGER_THRESHOLD || animal.current_age < BREEDING_AGE {
        return None;
    }
    // Only the carnivore gates breeding on the consumed flag.
    if animal.diet == Diet::Carnivore && animal.consumed {
        return None;
    }
    if rng.gen::<f64>() <= animal.reproduce_chance() {
        return None;
    }
    if eco.conspecific_count(&animal.name) < 2 {
        return None;
    }

    let cost = animal.reproduction_cost();
    let child = animal.offspring();
    eco.animals[idx].energy -= cost;
    Some(child)
}

/// One plant turn: drink and grow, or wilt. The water debit applies even
/// when temperature blocks growth.
pub fn grow_plant(eco: &mut Ecosystem, idx: usize, journal: &mut dyn Journal) {
    if eco.plants[idx].consumed {
        return;
    }

    journal.record(&format!("{} attempts to grow...", eco.plants[idx].name));

    let needs = eco.plants[idx].water_needs;
    if eco.environment.water() >= needs {
        eco.environment.consume_water(needs);
        let offset = (eco.environment.temperature() - eco.plants[idx].optimal_temperature).abs();
        if offset <= 5 {
            eco.plants[idx].growth_level += 2;
            journal.record(&format!(
                "{} grows faster due to favorable conditions.",
                eco.plants[idx].name
            ));
        } else if offset <= 10 {
            eco.plants[idx].growth_level += 1;
            journal.record(&format!(
                "{} grows slower due to temperature.",
                eco.plants[idx].name
            ));
        } else {
            journal.record(&format!(
                "{} does not grow due to unfavorable temperature.",
                eco.plants[idx].name
            ));
        }
    } else {
        eco.plants[idx].growth_level -= 1;
        journal.record(&format!("{} wilts due to lack of water.", eco.plants[idx].name));
    }
}

/// A mature plant turns into 1–4 seedlings and is consumed in the process.
pub fn reproduce_plant(
    eco: &mut Ecosystem,
    idx: usize,
    rng: &mut SimRng,
    journal: &mut dyn Journal,
) -> Vec<Plant> {
    if !eco.plants[idx].is_mature() || eco.plants[idx].consumed {
        return Vec::new();
    }

    eco.plants[idx].consumed = true;
    journal.record("The plant wilts and leaves seeds.");
    let count = rng.gen_range(1..=4);
    (0..count).map(|_| eco.plants[idx].seedling()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::journal::{MemoryJournal, NullJournal};

    fn habitat(water: i32) -> Ecosystem {
        Ecosystem::new(Environment::new(20, 50, water))
    }

    #[test]
    fn lone_carnivore_never_hunts_itself() {
        for seed in 0..50 {
            let mut eco = habitat(1000);
            eco.animals
                .push(Animal::new("Wolf", Diet::Carnivore, 90, 3, 3000, 0));
            let mut rng = SimRng::seeded(seed);
            let mut journal = MemoryJournal::new();

            act_animal(&mut eco, 0, &mut rng, &mut journal);

            assert_eq!(eco.animals[0].energy, 70);
            assert_eq!(eco.animals[0].current_age, 24);
            assert!(!eco.animals[0].consumed);
            assert!(journal
                .entries()
                .iter()
                .any(|e| e.contains("no prey available")));
        }
    }

    #[test]
    fn hungry_herbivore_eats_the_only_plant() {
        let mut eco = habitat(1000);
        eco.animals
            .push(Animal::new("Deer", Diet::Herbivore, 50, 1, 2000, 0));
        eco.plants.push(Plant::new("Grass", 5, 5, 20));
        let mut rng = SimRng::seeded(0);
        let mut journal = NullJournal;

        act_animal(&mut eco, 0, &mut rng, &mut journal);

        assert_eq!(eco.animals[0].energy, 110);
        assert!(eco.plants[0].consumed);
        assert_eq!(eco.environment.water(), 990);
    }

    #[test]
    fn herbivore_pays_thirst_penalty_when_water_is_short() {
        let mut eco = habitat(5);
        eco.animals
            .push(Animal::new("Deer", Diet::Herbivore, 50, 1, 2000, 0));
        let mut rng = SimRng::seeded(0);
        let mut journal = NullJournal;

        act_animal(&mut eco, 0, &mut rng, &mut journal);

        // -30 thirst, then -5 for finding no plants.
        assert_eq!(eco.animals[0].energy, 15);
        assert_eq!(eco.environment.water(), 5);
    }

    #[test]
    fn sated_animal_pays_baseline_cost() {
        let mut eco = habitat(1000);
        eco.animals
            .push(Animal::new("Wolf", Diet::Carnivore, 150, 2, 3000, 0));
        let mut rng = SimRng::seeded(0);
        let mut journal = NullJournal;

        act_animal(&mut eco, 0, &mut rng, &mut journal);

        assert_eq!(eco.animals[0].energy, 145);
    }

    #[test]
    fn starved_omnivore_loses_energy_on_either_branch() {
        for seed in 0..50 {
            let mut eco = habitat(1000);
            eco.animals
                .push(Animal::new("Boar", Diet::Omnivore, 50, 2, 2000, 0));
            let mut rng = SimRng::seeded(seed);
            let mut journal = NullJournal;

            act_animal(&mut eco, 0, &mut rng, &mut journal);

            // Plant branch fails with -10, hunt branch with -15.
            assert!(
                eco.animals[0].energy == 40 || eco.animals[0].energy == 35,
                "unexpected energy {} for seed {seed}",
                eco.animals[0].energy
            );
        }
    }

    #[test]
    fn grazing_skips_consumed_plants() {
        for seed in 0..50 {
            let mut eco = habitat(1000);
            eco.animals
                .push(Animal::new("Deer", Diet::Herbivore, 50, 1, 2000, 0));
            let mut eaten = Plant::new("Clover", 5, 5, 20);
            eaten.consumed = true;
            eco.plants.push(eaten);
            eco.plants.push(Plant::new("Grass", 5, 5, 20));
            let mut rng = SimRng::seeded(seed);
            let mut journal = NullJournal;

            act_animal(&mut eco, 0, &mut rng, &mut journal);

            assert!(eco.plants[1].consumed, "seed {seed} chose the carcass");
            assert_eq!(eco.animals[0].energy, 110);
        }
    }

    #[test]
    fn reproduction_needs_two_conspecifics() {
        for seed in 0..100 {
            let mut eco = habitat(1000);
            eco.animals
                .push(Animal::new("Deer", Diet::Herbivore, 150, 1, 2000, 1500));
            eco.animals
                .push(Animal::new("Elk", Diet::Herbivore, 150, 1, 2000, 1500));
            let mut rng = SimRng::seeded(seed);

            assert!(reproduce_animal(&mut eco, 0, &mut rng).is_none());
            assert!(reproduce_animal(&mut eco, 1, &mut rng).is_none());
        }
    }

    #[test]
    fn consumed_carnivore_never_breeds() {
        for seed in 0..100 {
            let mut eco = habitat(1000);
            let mut parent = Animal::new("Wolf", Diet::Carnivore, 150, 1, 3000, 1500);
            parent.consumed = true;
            eco.animals.push(parent);
            eco.animals
                .push(Animal::new("Wolf", Diet::Carnivore, 150, 1, 3000, 1500));
            let mut rng = SimRng::seeded(seed);

            assert!(reproduce_animal(&mut eco, 0, &mut rng).is_none());
        }
    }

    #[test]
    fn consumed_herbivore_can_still_breed() {
        // The herbivore path skips the consumed check; with enough seeds at
        // least one roll must succeed.
        let mut bred = false;
        for seed in 0..100 {
            let mut eco = habitat(1000);
            let mut parent = Animal::new("Deer", Diet::Herbivore, 150, 1, 2000, 1500);
            parent.consumed = true;
            eco.animals.push(parent);
            eco.animals
                .push(Animal::new("Deer", Diet::Herbivore, 150, 1, 2000, 1500));
            let mut rng = SimRng::seeded(seed);

            if let Some(child) = reproduce_animal(&mut eco, 0, &mut rng) {
                assert_eq!(child.name, "Deer");
                assert_eq!(child.energy, 60);
                assert_eq!(child.current_age, 0);
                assert_eq!(eco.animals[0].energy, 140);
                bred = true;
            }
        }
        assert!(bred);
    }

    #[test]
    fn underage_or_exhausted_animals_never_breed() {
        for seed in 0..100 {
            let mut eco = habitat(1000);
            eco.animals
                .push(Animal::new("Deer", Diet::Herbivore, 99, 1, 2000, 1500));
            eco.animals
                .push(Animal::new("Deer", Diet::Herbivore, 150, 1, 2000, 999));
            let mut rng = SimRng::seeded(seed);

            assert!(reproduce_animal(&mut eco, 0, &mut rng).is_none());
            assert!(reproduce_animal(&mut eco, 1, &mut rng).is_none());
        }
    }

    #[test]
    fn mature_plant_leaves_one_to_four_seedlings() {
        for seed in 0..100 {
            let mut eco = habitat(1000);
            eco.plants.push(Plant::new("Grass", 18, 5, 20));
            let mut rng = SimRng::seeded(seed);
            let mut journal = NullJournal;

            let seedlings = reproduce_plant(&mut eco, 0, &mut rng, &mut journal);

            assert!((1..=4).contains(&seedlings.len()), "seed {seed}");
            assert!(seedlings.iter().all(|p| p.growth_level == 0));
            assert!(seedlings.iter().all(|p| p.name == "Grass"));
            assert!(eco.plants[0].consumed);
        }
    }

    #[test]
    fn immature_plant_does_not_reproduce() {
        let mut eco = habitat(1000);
        eco.plants.push(Plant::new("Grass", 17, 5, 20));
        let mut rng = SimRng::seeded(0);
        let mut journal = NullJournal;

        assert!(reproduce_plant(&mut eco, 0, &mut rng, &mut journal).is_empty());
        assert!(!eco.plants[0].consumed);
    }

    #[test]
    fn plant_growth_tiers_follow_temperature() {
        let cases = [(20, 2), (28, 1), (35, 0)];
        for (optimal_offset_temp, expected_gain) in cases {
            let mut eco = Ecosystem::new(Environment::new(optimal_offset_temp, 50, 1000));
            eco.plants.push(Plant::new("Fern", 5, 5, 20));
            let mut journal = NullJournal;

            grow_plant(&mut eco, 0, &mut journal);

            assert_eq!(eco.plants[0].growth_level, 5 + expected_gain);
            // Water is debited in every sufficient-water branch.
            assert_eq!(eco.environment.water(), 995);
        }
    }

    #[test]
    fn plant_wilts_without_water_and_keeps_the_pool() {
        let mut eco = habitat(3);
        eco.plants.push(Plant::new("Fern", 5, 5, 20));
        let mut journal = NullJournal;

        grow_plant(&mut eco, 0, &mut journal);

        assert_eq!(eco.plants[0].growth_level, 4);
        assert_eq!(eco.environment.water(), 3);
    }

    #[test]
    fn consumed_plant_skips_its_turn() {
        let mut eco = habitat(1000);
        let mut plant = Plant::new("Fern", 5, 5, 20);
        plant.consumed = true;
        eco.plants.push(plant);
        let mut journal = MemoryJournal::new();

        grow_plant(&mut eco, 0, &mut journal);

        assert_eq!(eco.plants[0].growth_level, 5);
        assert_eq!(eco.environment.water(), 1000);
        assert!(journal.entries().is_empty());
    }
}
