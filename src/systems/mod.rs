pub mod behavior;
pub mod population;

mod fauna;
mod flora;
mod weather;

pub use fauna::FaunaSystem;
pub use flora::FloraSystem;
pub use weather::WeatherSystem;
