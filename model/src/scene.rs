use serde::{Deserialize, Serialize};

use crate::records::{Coord, Passenger, Trip};
use crate::visibility;

/// Which optional layers to build. The two connector layers are independent of each other.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Vehicle to pickup point, until the pickup happens
    pub show_pickup_connectors: bool,
    /// Vehicle to destination, while the passenger is on board
    pub show_dropoff_connectors: bool,
    /// How many minutes of path behind each vehicle the renderer should draw
    pub trail_length: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            show_pickup_connectors: false,
            show_dropoff_connectors: false,
            trail_length: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub route: Vec<Coord>,
    pub timestamp: Vec<f64>,
    /// Interpolated along the route at the scene's time
    pub position: Coord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub location: Coord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub source: Coord,
    pub target: Coord,
}

/// Everything a renderer needs to draw one frame. It's rebuilt from scratch for every time; to
/// find what changed between frames, diff two scenes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub time: f64,
    pub trail_length: f64,
    pub vehicles: Vec<Vehicle>,
    pub waiting_passengers: Vec<Marker>,
    pub destinations: Vec<Marker>,
    pub pickup_connectors: Vec<Connector>,
    pub dropoff_connectors: Vec<Connector>,
}

impl Scene {
    /// Projects the datasets at one time. This has no side effects and doesn't depend on anything
    /// besides the arguments, so it can be called every frame or for an arbitrary scrubbed time.
    pub fn project(
        trips: &[Trip],
        passengers: &[Passenger],
        time: f64,
        config: &SceneConfig,
    ) -> Scene {
        let mut scene = Scene {
            time,
            trail_length: config.trail_length,
            vehicles: Vec::new(),
            waiting_passengers: Vec::new(),
            destinations: Vec::new(),
            pickup_connectors: Vec::new(),
            dropoff_connectors: Vec::new(),
        };

        for trip in trips {
            scene.vehicles.extend(visibility::vehicle(trip, time));
            scene.destinations.extend(visibility::destination(trip, time));
            if config.show_pickup_connectors {
                scene
                    .pickup_connectors
                    .extend(visibility::pickup_connector(trip, time));
            }
            if config.show_dropoff_connectors {
                scene
                    .dropoff_connectors
                    .extend(visibility::dropoff_connector(trip, time));
            }
        }
        for passenger in passengers {
            scene
                .waiting_passengers
                .extend(visibility::waiting_passenger(passenger, time));
        }

        scene
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
            && self.waiting_passengers.is_empty()
            && self.destinations.is_empty()
            && self.pickup_connectors.is_empty()
            && self.dropoff_connectors.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} vehicles, {} waiting, {} destinations, {} / {} connectors",
            self.vehicles.len(),
            self.waiting_passengers.len(),
            self.destinations.len(),
            self.pickup_connectors.len(),
            self.dropoff_connectors.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trips() -> Vec<Trip> {
        vec![
            Trip::new(
                vec![Coord(0.0, 0.0), Coord(1.0, 1.0), Coord(2.0, 2.0)],
                vec![0.0, 5.0, 20.0],
            ),
            Trip::new(
                vec![Coord(10.0, 10.0), Coord(11.0, 10.0), Coord(12.0, 10.0)],
                vec![8.0, 12.0, 30.0],
            ),
            // Corrupt records don't take out the rest of the scene
            Trip::default(),
            serde_json::from_str(r#"{"route": [[0, 0], [1, 1]], "timestamp": ["x", 3]}"#)
                .unwrap(),
        ]
    }

    fn passengers() -> Vec<Passenger> {
        vec![
            Passenger::new(Coord(1.0, 1.0), 0.0, 5.0),
            Passenger::new(Coord(11.0, 10.0), 6.0, 12.0),
            Passenger::default(),
        ]
    }

    fn all_layers() -> SceneConfig {
        SceneConfig {
            show_pickup_connectors: true,
            show_dropoff_connectors: true,
            ..Default::default()
        }
    }

    #[test]
    fn empty_datasets() {
        let scene = Scene::project(&[], &[], 420.0, &all_layers());
        assert!(scene.is_empty());
        assert_eq!(scene.time, 420.0);
    }

    #[test]
    fn mid_simulation() {
        let scene = Scene::project(&trips(), &passengers(), 10.0, &all_layers());
        assert_eq!(scene.vehicles.len(), 2);
        assert_eq!(scene.vehicles[1].position, Coord(10.5, 10.0));
        // The first passenger was picked up at 5
        assert_eq!(
            scene.waiting_passengers,
            vec![Marker {
                location: Coord(11.0, 10.0)
            }]
        );
        assert_eq!(
            scene.destinations,
            vec![Marker {
                location: Coord(2.0, 2.0)
            }]
        );
        assert_eq!(
            scene.pickup_connectors,
            vec![Connector {
                source: Coord(10.5, 10.0),
                target: Coord(11.0, 10.0),
            }]
        );
        assert_eq!(scene.dropoff_connectors.len(), 1);
        assert_eq!(scene.dropoff_connectors[0].target, Coord(2.0, 2.0));
    }

    #[test]
    fn connector_flags_are_independent() {
        let only_dropoff = SceneConfig {
            show_dropoff_connectors: true,
            ..Default::default()
        };
        let scene = Scene::project(&trips(), &passengers(), 10.0, &only_dropoff);
        assert!(scene.pickup_connectors.is_empty());
        assert_eq!(scene.dropoff_connectors.len(), 1);

        let only_pickup = SceneConfig {
            show_pickup_connectors: true,
            ..Default::default()
        };
        let scene = Scene::project(&trips(), &passengers(), 10.0, &only_pickup);
        assert_eq!(scene.pickup_connectors.len(), 1);
        assert!(scene.dropoff_connectors.is_empty());

        let scene = Scene::project(&trips(), &passengers(), 10.0, &SceneConfig::default());
        assert!(scene.pickup_connectors.is_empty());
        assert!(scene.dropoff_connectors.is_empty());
    }

    #[test]
    fn idempotent_and_pure() {
        let trips = trips();
        let passengers = passengers();
        let before = (trips.clone(), passengers.clone());

        let first = Scene::project(&trips, &passengers, 12.0, &all_layers());
        let second = Scene::project(&trips, &passengers, 12.0, &all_layers());
        assert_eq!(first, second);
        assert_eq!((trips, passengers), before);
    }

    #[test]
    fn summary() {
        let scene = Scene::project(&trips(), &passengers(), 10.0, &all_layers());
        assert_eq!(
            scene.summary(),
            "2 vehicles, 1 waiting, 1 destinations, 1 / 1 connectors"
        );
    }
}
