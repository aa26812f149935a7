use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A (longitude, latitude) pair, encoded as `[lon, lat]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coord(pub f64, pub f64);

impl Coord {
    pub fn new(lon: f64, lat: f64) -> Coord {
        Coord(lon, lat)
    }

    pub fn lon(self) -> f64 {
        self.0
    }

    pub fn lat(self) -> f64 {
        self.1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

/// One vehicle's precomputed trip. `route[i]` is where the vehicle is at `timestamp[i]`. The first
/// timestamp is dispatch, the second is pickup, and the last is drop-off at the final route point.
///
/// Entries that weren't numbers in the input are kept as `None`, so every consumer has to guard
/// around them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub route: Vec<Option<Coord>>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub timestamp: Vec<Option<f64>>,
}

impl Trip {
    /// Builds a fully populated trip
    pub fn new(route: Vec<Coord>, timestamp: Vec<f64>) -> Trip {
        Trip {
            route: route.into_iter().map(Some).collect(),
            timestamp: timestamp.into_iter().map(Some).collect(),
        }
    }

    /// True when route and timestamps line up, have at least 2 entries, and nothing is missing.
    /// Only these trips are animated.
    pub fn well_formed(&self) -> bool {
        self.route.len() >= 2
            && self.route.len() == self.timestamp.len()
            && self.route.iter().all(Option::is_some)
            && self.timestamp.iter().all(|t| t.map(f64::is_finite).unwrap_or(false))
    }

    /// The looser guard used for static markers: at least 2 route points and 2 timestamps.
    pub fn has_endpoints(&self) -> bool {
        self.route.len() >= 2 && self.timestamp.len() >= 2
    }

    pub fn start_time(&self) -> Option<f64> {
        self.timestamp.first().copied().flatten()
    }

    /// Falls back to the start time when there's only one timestamp
    pub fn pickup_time(&self) -> Option<f64> {
        if self.timestamp.len() > 1 {
            self.timestamp[1]
        } else {
            self.start_time()
        }
    }

    pub fn drop_time(&self) -> Option<f64> {
        self.timestamp.last().copied().flatten()
    }

    pub fn pickup_point(&self) -> Option<Coord> {
        self.route.get(1).copied().flatten()
    }

    pub fn destination(&self) -> Option<Coord> {
        self.route.last().copied().flatten()
    }
}

/// Someone waiting to be picked up. `timestamp` should be exactly `[request, pickup]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(default, deserialize_with = "lenient_one")]
    pub location: Option<Coord>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub timestamp: Vec<Option<f64>>,
}

impl Passenger {
    pub fn new(location: Coord, request_time: f64, pickup_time: f64) -> Passenger {
        Passenger {
            location: Some(location),
            timestamp: vec![Some(request_time), Some(pickup_time)],
        }
    }

    /// The half-open window `[request, pickup)`, if both ends are present
    pub fn waiting_window(&self) -> Option<(f64, f64)> {
        match self.timestamp.as_slice() {
            [Some(request), Some(pickup)] => Some((*request, *pickup)),
            _ => None,
        }
    }

    pub fn end_time(&self) -> Option<f64> {
        self.timestamp.last().copied().flatten()
    }
}

// A field that isn't a list at all decodes as empty; individual bad entries become None.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(list) => list
            .into_iter()
            .map(|x| serde_json::from_value(x).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_one<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}
