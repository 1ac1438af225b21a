use biotope::{
    ecosystem::Ecosystem,
    entities::{Animal, Diet, Plant},
    environment::Environment,
    persist,
};

fn sample_ecosystem() -> Ecosystem {
    let mut eco = Ecosystem::new(Environment::new(18, 62, 420_000));
    eco.animals
        .push(Animal::new("Deer", Diet::Herbivore, 80, 1, 4800, 96));
    eco.animals
        .push(Animal::new("Deer", Diet::Herbivore, 80, 1, 4800, 96));
    eco.animals
        .push(Animal::new("Wolf", Diet::Carnivore, 110, 3, 5200, 1104));
    eco.animals
        .push(Animal::new("Boar", Diet::Omnivore, 90, 2, 4000, 0));
    eco.plants.push(Plant::new("Grass", 10, 5, 20));
    eco.plants.push(Plant::new("Clover", 6, 8, 17));
    eco
}

#[test]
fn save_then_load_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meadow.txt");
    let eco = sample_ecosystem();

    persist::save(&eco, &path).expect("save succeeds");
    let restored = persist::load(&path).expect("load succeeds");

    assert_eq!(restored.environment, eco.environment);
    assert_eq!(restored.animals, eco.animals);
    assert_eq!(restored.plants, eco.plants);
}

#[test]
fn round_trip_preserves_species_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meadow.txt");
    let eco = sample_ecosystem();

    persist::save(&eco, &path).unwrap();
    let restored = persist::load(&path).unwrap();

    assert_eq!(restored.species_census(), eco.species_census());
    assert_eq!(restored.conspecific_count("Deer"), 2);
}

#[test]
fn corrupt_file_is_rejected_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.txt");
    std::fs::write(
        &path,
        "Temperature: 20\n\
         Humidity: 50\n\
         Water amount: 500000\n\
         Animals:\n\
         1. Name: Deer, Species: Herbivore, Food Chain Level: Primary, Energy: 999, \
         Average Lifespan: 2000 hours, Age: 0 hours, Count: 1\n\
         Plants:\n\
         1. Name: Grass, Growth Level: 4, Water Needs: 5 per day, \
         Optimal Temperature: 20 degrees, Count: 1\n",
    )
    .unwrap();

    match persist::load(&path) {
        Err(persist::LoadError::Invalid { errors }) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "energy");
            assert_eq!(errors[0].line, 5);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowhere.txt");
    assert!(matches!(
        persist::load(&path),
        Err(persist::LoadError::Io(_))
    ));
}
