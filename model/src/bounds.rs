use crate::records::{Passenger, Trip};

/// The shortest cycle the clock will ever loop over, in minutes
pub const MIN_CEILING: f64 = 60.0;

/// The latest time anything happens in the datasets, but never less than an hour. Only the final
/// timestamp of each trip and passenger counts; missing ones are skipped. If the latest time isn't
/// finite, the whole cycle falls back to an hour.
///
/// This is linear in the size of the datasets, so compute it once per dataset, not per frame.
pub fn compute_ceiling(trips: &[Trip], passengers: &[Passenger]) -> f64 {
    let trip_ends = trips.iter().filter_map(Trip::drop_time);
    let passenger_ends = passengers.iter().filter_map(Passenger::end_time);

    let max = trip_ends
        .chain(passenger_ends)
        .filter(|t| !t.is_nan())
        .fold(MIN_CEILING, f64::max);
    if max.is_finite() && max > 0.0 {
        max
    } else {
        MIN_CEILING
    }
}
