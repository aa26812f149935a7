//! Decides, one entity at a time, whether something is active at a query time and what it
//! contributes to the scene. Incomplete records contribute nothing; they're never errors.

use crate::interpolate::position_at;
use crate::records::{Passenger, Trip};
use crate::scene::{Connector, Marker, Vehicle};

/// Every well-formed trip is animated. The renderer clips the path to the trailing window itself.
pub fn vehicle(trip: &Trip, time: f64) -> Option<Vehicle> {
    if !trip.well_formed() {
        return None;
    }
    Some(Vehicle {
        route: trip.route.iter().copied().flatten().collect(),
        timestamp: trip.timestamp.iter().copied().flatten().collect(),
        position: position_at(trip, time)?,
    })
}

/// A passenger shows up from their request until the moment they're picked up, exclusive.
pub fn waiting_passenger(passenger: &Passenger, time: f64) -> Option<Marker> {
    let (request, pickup) = passenger.waiting_window()?;
    if request <= time && time < pickup {
        Some(Marker {
            location: passenger.location?,
        })
    } else {
        None
    }
}

/// The drop-off point is marked while the passenger is on board, inclusive on both ends.
pub fn destination(trip: &Trip, time: f64) -> Option<Marker> {
    if !trip.has_endpoints() {
        return None;
    }
    let pickup = trip.pickup_time()?;
    let drop = trip.drop_time()?;
    if pickup <= time && time <= drop {
        Some(Marker {
            location: trip.destination()?,
        })
    } else {
        None
    }
}

/// From the vehicle's current position to the pickup point, while the vehicle is on its way.
pub fn pickup_connector(trip: &Trip, time: f64) -> Option<Connector> {
    if !trip.well_formed() {
        return None;
    }
    let start = trip.start_time()?;
    let pickup = trip.pickup_time()?;
    if time < start || time > pickup {
        return None;
    }
    Some(Connector {
        source: position_at(trip, time)?,
        target: trip.pickup_point()?,
    })
}

/// From the vehicle's current position to the destination, while the passenger is on board.
pub fn dropoff_connector(trip: &Trip, time: f64) -> Option<Connector> {
    if !trip.well_formed() {
        return None;
    }
    let pickup = trip.pickup_time()?;
    let drop = trip.drop_time()?;
    if time < pickup || time > drop {
        return None;
    }
    Some(Connector {
        source: position_at(trip, time)?,
        target: trip.destination()?,
    })
}
