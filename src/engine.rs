use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::ecosystem::Ecosystem;
use crate::journal::{Journal, NullJournal};
use crate::persist;
use crate::rng::SimRng;
use crate::systems::{FaunaSystem, FloraSystem, WeatherSystem};

/// Hours per cycle: one simulated day.
pub const CYCLE_HOURS: u64 = 24;

pub struct CycleContext {
    pub day: u64,
}

/// One phase of a daily cycle. Systems run in the fixed order the engine
/// wires them in; each draws from the shared generator in turn.
pub trait System {
    fn name(&self) -> &'static str;
    fn run(
        &mut self,
        ctx: &CycleContext,
        eco: &mut Ecosystem,
        rng: &mut SimRng,
        journal: &mut dyn Journal,
    ) -> Result<()>;
}

#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
    }

    pub fn run(
        &mut self,
        ctx: &CycleContext,
        eco: &mut Ecosystem,
        rng: &mut SimRng,
        journal: &mut dyn Journal,
    ) -> Result<()> {
        for system in self.systems.iter_mut() {
            let name = system.name();
            system
                .run(ctx, eco, rng, journal)
                .with_context(|| format!("system '{name}' failed on day {}", ctx.day))?;
        }
        Ok(())
    }
}

/// Periodic on-disk checkpoints of the ecosystem, written in the save-file
/// format. `every_cycles == 0` disables checkpointing.
#[derive(Clone, Debug)]
pub struct CheckpointPolicy {
    pub dir: PathBuf,
    pub every_cycles: u64,
}

impl CheckpointPolicy {
    fn maybe_write(&self, cycle: u64, day: u64, eco: &Ecosystem) -> Result<Option<PathBuf>> {
        if self.every_cycles == 0 || cycle % self.every_cycles != 0 {
            return Ok(None);
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create checkpoint dir {}", self.dir.display()))?;
        let path = self.dir.join(format!("day_{day:06}.txt"));
        persist::save(eco, &path)
            .with_context(|| format!("failed to write checkpoint {}", path.display()))?;
        Ok(Some(path))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationSummary {
    pub hours: u64,
    pub cycles: u64,
    pub animals: usize,
    pub plants: usize,
}

/// The simulation driver: owns the ecosystem, the seeded generator and the
/// journal, and advances time at a fixed daily granularity.
pub struct Engine {
    ecosystem: Ecosystem,
    scheduler: Scheduler,
    rng: SimRng,
    journal: Box<dyn Journal>,
    checkpoints: Option<CheckpointPolicy>,
}

impl Engine {
    pub fn new(ecosystem: Ecosystem, rng: SimRng) -> Self {
        let mut scheduler = Scheduler::default();
        scheduler.add_system(Box::new(FloraSystem::new()));
        scheduler.add_system(Box::new(FaunaSystem::new()));
        scheduler.add_system(Box::new(WeatherSystem::new()));
        Self {
            ecosystem,
            scheduler,
            rng,
            journal: Box::new(NullJournal),
            checkpoints: None,
        }
    }

    pub fn with_journal(mut self, journal: Box<dyn Journal>) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_checkpoints(mut self, policy: CheckpointPolicy) -> Self {
        self.checkpoints = Some(policy);
        self
    }

    /// Runs the clock from hour 0 through `total_hours` inclusive. A full
    /// cycle fires on every 24-hour boundary (hour 0 included); all other
    /// hours only advance the clock.
    pub fn simulate(&mut self, total_hours: u64) -> Result<SimulationSummary> {
        info!(
            total_hours,
            animals = self.ecosystem.animals.len(),
            plants = self.ecosystem.plants.len(),
            "starting simulation"
        );

        let mut cycles = 0;
        for hour in 0..=total_hours {
            if hour % CYCLE_HOURS != 0 {
                continue;
            }
            let ctx = CycleContext {
                day: hour / CYCLE_HOURS,
            };
            self.scheduler
                .run(&ctx, &mut self.ecosystem, &mut self.rng, self.journal.as_mut())?;
            cycles += 1;
            if let Some(policy) = &self.checkpoints {
                policy.maybe_write(cycles, ctx.day, &self.ecosystem)?;
            }
            debug!(
                day = ctx.day,
                animals = self.ecosystem.animals.len(),
                plants = self.ecosystem.plants.len(),
                water = self.ecosystem.environment.water(),
                "cycle complete"
            );
        }

        let summary = SimulationSummary {
            hours: total_hours,
            cycles,
            animals: self.ecosystem.animals.len(),
            plants: self.ecosystem.plants.len(),
        };
        info!(cycles = summary.cycles, "simulation finished");
        Ok(summary)
    }

    pub fn ecosystem(&self) -> &Ecosystem {
        &self.ecosystem
    }

    pub fn into_ecosystem(self) -> Ecosystem {
        self.ecosystem
    }
}
