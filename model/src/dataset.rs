use abstutil::Timer;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::records::{Coord, Passenger, Trip};

/// The default file names, relative to some data directory
pub const TRIPS_FILE: &str = "trips.json";
pub const PASSENGERS_FILE: &str = "passengers.json";

/// The raw input. Loaded once and never modified afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub trips: Vec<Trip>,
    pub passengers: Vec<Passenger>,
}

impl Dataset {
    pub fn empty() -> Dataset {
        Dataset::default()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty() && self.passengers.is_empty()
    }

    /// The southwest and northeast corners around every present trip and passenger point
    pub fn extent(&self) -> Option<(Coord, Coord)> {
        let trip_pts = self.trips.iter().flat_map(|trip| trip.route.iter().copied().flatten());
        let passenger_pts = self.passengers.iter().filter_map(|p| p.location);

        let mut corners: Option<(Coord, Coord)> = None;
        for pt in trip_pts.chain(passenger_pts) {
            corners = Some(match corners {
                None => (pt, pt),
                Some((min, max)) => (
                    Coord::new(min.lon().min(pt.lon()), min.lat().min(pt.lat())),
                    Coord::new(max.lon().max(pt.lon()), max.lat().max(pt.lat())),
                ),
            });
        }
        corners
    }

    /// Reads two JSON arrays of records. Elements that aren't records at all are skipped with a
    /// warning; the files themselves have to exist and be arrays.
    pub fn load(trips_path: &str, passengers_path: &str, timer: &mut Timer) -> Result<Dataset> {
        timer.start("load trips");
        let trips = read_records("trip", trips_path);
        timer.stop("load trips");

        timer.start("load passengers");
        let passengers = read_records("passenger", passengers_path);
        timer.stop("load passengers");

        let dataset = Dataset {
            trips: trips?,
            passengers: passengers?,
        };
        timer.note(format!(
            "Loaded {} trips and {} passengers",
            dataset.trips.len(),
            dataset.passengers.len()
        ));
        Ok(dataset)
    }

    /// Like `load`, but any failure just means there's nothing to show.
    pub fn load_or_empty(trips_path: &str, passengers_path: &str, timer: &mut Timer) -> Dataset {
        match Dataset::load(trips_path, passengers_path, timer) {
            Ok(dataset) => dataset,
            Err(err) => {
                error!("Couldn't load the datasets, starting empty: {:#}", err);
                Dataset::empty()
            }
        }
    }

    /// For hosts that already have the JSON in memory
    pub fn from_json_strs(trips: &str, passengers: &str) -> Result<Dataset> {
        Ok(Dataset {
            trips: parse_records("trip", trips)?,
            passengers: parse_records("passenger", passengers)?,
        })
    }
}

fn read_records<T: DeserializeOwned>(kind: &str, path: &str) -> Result<Vec<T>> {
    let raw = fs_err::read_to_string(path)?;
    parse_records(kind, &raw).with_context(|| format!("parsing {path}"))
}

fn parse_records<T: DeserializeOwned>(kind: &str, raw: &str) -> Result<Vec<T>> {
    let values = match serde_json::from_str::<Value>(raw)? {
        Value::Array(values) => values,
        other => bail!("Expected a list of {kind}s, but got {}", describe(&other)),
    };

    let mut records = Vec::new();
    let mut skipped = 0;
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(rec) => records.push(rec),
            Err(err) => {
                debug!("Skipping {kind} #{idx}: {err}");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} malformed {kind} records");
    }
    Ok(records)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_in_memory() {
        let dataset = Dataset::from_json_strs(
            r#"[{"route": [[0, 0], [1, 1]], "timestamp": [0, 10]}]"#,
            r#"[{"location": [0.5, 0.5], "timestamp": [2, 4]}]"#,
        )
        .unwrap();
        assert_eq!(
            dataset.trips,
            vec![Trip::new(
                vec![Coord(0.0, 0.0), Coord(1.0, 1.0)],
                vec![0.0, 10.0]
            )]
        );
        assert_eq!(
            dataset.passengers,
            vec![Passenger::new(Coord(0.5, 0.5), 2.0, 4.0)]
        );
    }

    #[test]
    fn skip_non_records() {
        let dataset =
            Dataset::from_json_strs(r#"[5, "trip", {"route": [], "timestamp": []}]"#, "[]")
                .unwrap();
        assert_eq!(dataset.trips, vec![Trip::default()]);
        assert!(dataset.passengers.is_empty());
    }

    #[test]
    fn not_a_list() {
        assert!(Dataset::from_json_strs(r#"{"route": []}"#, "[]").is_err());
        assert!(Dataset::from_json_strs("[]", "not json").is_err());
    }

    #[test]
    fn missing_files_fall_back_to_empty() {
        let dataset = Dataset::load_or_empty(
            "/definitely/not/here/trips.json",
            "/definitely/not/here/passengers.json",
            &mut Timer::throwaway(),
        );
        assert!(dataset.is_empty());
    }

    #[test]
    fn extent() {
        assert_eq!(Dataset::empty().extent(), None);

        let dataset = Dataset::from_json_strs(
            r#"[{"route": [[127.1, 37.5], null, [127.3, 37.4]], "timestamp": [0, 5, 10]}]"#,
            r#"[{"location": [127.0, 37.6], "timestamp": [2, 4]}, {"timestamp": [1, 2]}]"#,
        )
        .unwrap();
        assert_eq!(
            dataset.extent(),
            Some((Coord::new(127.0, 37.4), Coord::new(127.3, 37.6)))
        );
    }

    #[test]
    fn load_sample_data() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");
        let dataset = Dataset::load(
            &format!("{dir}/{TRIPS_FILE}"),
            &format!("{dir}/{PASSENGERS_FILE}"),
            &mut Timer::throwaway(),
        )
        .unwrap();
        assert_eq!(dataset.trips.len(), 3);
        assert_eq!(dataset.passengers.len(), 3);
        assert!(dataset.trips.iter().all(Trip::well_formed));
    }

    #[test]
    fn load_skips_bad_elements_from_files() {
        let dir = std::env::temp_dir().join(format!("replay_dataset_{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        let trips_path = dir.join(TRIPS_FILE);
        let passengers_path = dir.join(PASSENGERS_FILE);
        fs_err::write(
            &trips_path,
            r#"[{"route": [[0, 0], [1, 1]], "timestamp": [0, 10]}, 7, "oops"]"#,
        )
        .unwrap();
        fs_err::write(
            &passengers_path,
            r#"[{"location": [1, 1], "timestamp": [0, 5]}, "passenger", null]"#,
        )
        .unwrap();

        let dataset = Dataset::load(
            trips_path.to_str().unwrap(),
            passengers_path.to_str().unwrap(),
            &mut Timer::throwaway(),
        )
        .unwrap();
        fs_err::remove_dir_all(&dir).unwrap();

        assert_eq!(dataset.trips.len(), 1);
        assert!(dataset.trips[0].well_formed());
        assert_eq!(
            dataset.passengers,
            vec![Passenger::new(Coord::new(1.0, 1.0), 0.0, 5.0)]
        );
    }
}
