use crate::index::locate_segment;
use crate::records::{Coord, Trip};

/// Linearly blends from `a` at `t0` to `b` at `t1`. The fraction is clamped to `[0, 1]`, so the
/// result never leaves the segment. A degenerate or backwards segment (`t1 <= t0`) just yields `a`.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn interpolate(a: Coord, b: Coord, t0: f64, t1: f64, time: f64) -> Coord {
    // Written this way to also catch NaN
    if !(t1 > t0) {
        return a;
    }
    let alpha = ((time - t0) / (t1 - t0)).clamp(0.0, 1.0);
    Coord(a.0 + alpha * (b.0 - a.0), a.1 + alpha * (b.1 - a.1))
}

/// Where a trip's vehicle is at some time, by way of the bracketing segment. Before the trip
/// starts, this is the first point; after it ends, the last.
///
/// None when the trip has fewer than 2 present timestamps, or either end of the bracketing
/// segment is missing a coordinate. If only a timestamp of the segment is missing, the vehicle is
/// held at the segment's start.
pub fn position_at(trip: &Trip, time: f64) -> Option<Coord> {
    let idx = locate_segment(&trip.timestamp, time)?;
    let a = trip.route.get(idx).copied().flatten()?;
    let b = trip.route.get(idx + 1).copied().flatten()?;
    match (trip.timestamp[idx], trip.timestamp[idx + 1]) {
        (Some(t0), Some(t1)) => Some(interpolate(a, b, t0, t1, time)),
        _ => Some(a),
    }
}
