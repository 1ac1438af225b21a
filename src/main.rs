use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use biotope::{
    engine::{CheckpointPolicy, Engine},
    journal::{FileJournal, Journal, NullJournal},
    persist,
    prediction::population_outlook,
    rng::SimRng,
    scenario::ScenarioLoader,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Closed-ecosystem simulator")]
struct Cli {
    /// Path to a scenario YAML file
    #[arg(long, conflicts_with = "load")]
    scenario: Option<PathBuf>,

    /// Path to a previously saved ecosystem
    #[arg(long)]
    load: Option<PathBuf>,

    /// Simulation length in hours (uses the scenario default when omitted)
    #[arg(long)]
    hours: Option<u64>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Where to save the final ecosystem
    #[arg(long)]
    save: Option<PathBuf>,

    /// Narrative event log file
    #[arg(long)]
    journal: Option<PathBuf>,

    /// Directory for periodic checkpoints
    #[arg(long)]
    checkpoint_dir: Option<PathBuf>,

    /// Checkpoint interval in cycles (0 disables)
    #[arg(long, default_value_t = 0)]
    checkpoint_interval: u64,

    /// Print the population outlook after the run
    #[arg(long)]
    predict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (name, ecosystem, scenario_seed, scenario_hours) = if let Some(path) = &cli.load {
        let eco = persist::load(path).map_err(describe_load_failure)?;
        ("saved ecosystem".to_string(), eco, None, None)
    } else {
        let scenario_path = cli
            .scenario
            .clone()
            .unwrap_or_else(|| PathBuf::from("scenarios/meadow.yaml"));
        let loader = ScenarioLoader::new(".");
        let scenario = loader.load(&scenario_path)?;
        let eco = scenario.build_ecosystem();
        (
            scenario.name.clone(),
            eco,
            Some(scenario.seed),
            scenario.hours,
        )
    };

    let rng = match cli.seed.or(scenario_seed) {
        Some(seed) => SimRng::seeded(seed),
        None => SimRng::from_entropy(),
    };
    let hours = cli.hours.or(scenario_hours).unwrap_or(720);

    let journal: Box<dyn Journal> = match &cli.journal {
        Some(path) => Box::new(
            FileJournal::create(path)
                .with_context(|| format!("failed to create journal {}", path.display()))?,
        ),
        None => Box::new(NullJournal),
    };

    let mut engine = Engine::new(ecosystem, rng).with_journal(journal);
    if let Some(dir) = cli.checkpoint_dir.clone() {
        engine = engine.with_checkpoints(CheckpointPolicy {
            dir,
            every_cycles: cli.checkpoint_interval,
        });
    }

    let summary = engine.simulate(hours)?;
    println!(
        "'{}' completed after {} hours ({} cycles). Animals: {}, plants: {}.",
        name, summary.hours, summary.cycles, summary.animals, summary.plants
    );

    if cli.predict {
        let outlook = population_outlook(engine.ecosystem());
        println!("Population outlook:");
        println!("  The herbivore population is {}.", outlook.herbivores);
        println!("  The omnivore population is {}.", outlook.omnivores);
        println!("  The carnivore population is {}.", outlook.carnivores);
        println!("  The plant population is {}.", outlook.plants);
    }

    if let Some(path) = &cli.save {
        persist::save(engine.ecosystem(), path)
            .with_context(|| format!("failed to save ecosystem to {}", path.display()))?;
        println!("Ecosystem saved to {}.", path.display());
    }

    Ok(())
}

fn describe_load_failure(err: persist::LoadError) -> anyhow::Error {
    match err {
        persist::LoadError::Invalid { errors } => {
            eprintln!("The save file is invalid:");
            for field_error in &errors {
                eprintln!("  {field_error}");
            }
            anyhow::anyhow!("{} field error(s); correct the file and retry", errors.len())
        }
        other => anyhow::Error::new(other),
    }
}
