use chrono::{DateTime, Utc};
use geo::Point;

use crate::network::EdgeId;

pub type VehicleId = u64;

/// Index of a point within the analysis table it was read into. Derived
/// samples refer back to their originating point through this.
pub type PointId = usize;

/// A single timestamped GPS observation of one vehicle. `edge` is filled by
/// map-matching and stays `None` when no edge lies within the search radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryPoint {
    pub vehicle: VehicleId,
    pub time: DateTime<Utc>,
    pub position: Point,
    pub edge: Option<EdgeId>,
}

impl TrajectoryPoint {
    pub fn new(vehicle: VehicleId, time: DateTime<Utc>, position: Point) -> Self {
        TrajectoryPoint {
            vehicle,
            time,
            position,
            edge: None,
        }
    }
}
