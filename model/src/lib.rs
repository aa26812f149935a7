#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod bounds;
mod clock;
mod dataset;
mod index;
mod interpolate;
mod player;
mod records;
mod scene;
mod visibility;

pub use self::bounds::{compute_ceiling, MIN_CEILING};
pub use self::clock::{format_clock, Clock, ClockConfig};
pub use self::dataset::{Dataset, PASSENGERS_FILE, TRIPS_FILE};
pub use self::index::locate_segment;
pub use self::interpolate::{interpolate, position_at};
pub use self::player::Player;
pub use self::records::{Coord, Passenger, Trip};
pub use self::scene::{Connector, Marker, Scene, SceneConfig, Vehicle};

/// The loaded datasets, plus the end of the replay cycle derived from them.
pub struct Model {
    dataset: Dataset,
    ceiling: f64,
}

impl Model {
    pub fn new(dataset: Dataset) -> Model {
        let ceiling = compute_ceiling(&dataset.trips, &dataset.passengers);
        info!(
            "Model has {} trips and {} passengers, ending at {}",
            dataset.trips.len(),
            dataset.passengers.len(),
            format_clock(ceiling)
        );
        if let Some((sw, ne)) = dataset.extent() {
            info!("Everything happens between {} and {}", sw, ne);
        }
        Model { dataset, ceiling }
    }

    /// Before anything's loaded
    pub fn empty() -> Model {
        Model::new(Dataset::empty())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Swaps in new data. This is the only time the ceiling gets recalculated.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        *self = Model::new(dataset);
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn project(&self, time: f64, config: &SceneConfig) -> Scene {
        Scene::project(&self.dataset.trips, &self.dataset.passengers, time, config)
    }
}
