use std::io::Read;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use geo::point;
use log::{debug, warn};

use crate::network::graph::valid_position;
use crate::trajectory::error::TrajectoryError;
use crate::trajectory::point::TrajectoryPoint;

/// Raw CSV row: `vehicle, time, lat, lng`. Timestamps are RFC 3339 or unix
/// seconds (fractions allowed).
#[derive(Debug, serde::Deserialize)]
struct RawPoint {
    vehicle: u64,
    time: String,
    lat: f64,
    lng: f64,
}

/// Reads a trajectory table from CSV into points ordered by
/// `(vehicle, time)`. Malformed rows are dropped and counted, never fatal.
pub struct TrajectoryReader;

impl TrajectoryReader {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<TrajectoryPoint>, TrajectoryError> {
        let reader = csv::Reader::from_path(path)?;
        Self::read(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TrajectoryPoint>, TrajectoryError> {
        Self::read(csv::Reader::from_reader(reader))
    }

    fn read<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<TrajectoryPoint>, TrajectoryError> {
        let mut points = Vec::new();
        let mut dropped = 0usize;

        for row in reader.deserialize::<RawPoint>() {
            let raw = match row {
                Ok(raw) => raw,
                Err(err) => {
                    debug!("Dropping unreadable trajectory row: {:?}", err);
                    dropped += 1;
                    continue;
                }
            };

            match Self::point(raw) {
                Some(point) => points.push(point),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!("Dropped {} malformed trajectory rows", dropped);
        }

        points.sort_by(|a, b| a.vehicle.cmp(&b.vehicle).then(a.time.cmp(&b.time)));
        Ok(points)
    }

    fn point(raw: RawPoint) -> Option<TrajectoryPoint> {
        let time = timestamp(&raw.time)?;
        let position = point! { x: raw.lng, y: raw.lat };

        if !valid_position(&position) {
            debug!("Dropping out-of-range position: {:?}", position);
            return None;
        }

        Some(TrajectoryPoint::new(raw.vehicle, time, position))
    }
}

fn timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }

    // Unix epoch seconds, kept at millisecond precision.
    let seconds = value.parse::<f64>().ok().filter(|s| s.is_finite())?;
    Utc.timestamp_millis_opt((seconds * 1000.0) as i64).single()
}
