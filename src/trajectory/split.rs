use std::ops::Range;

use chrono::Duration;

use crate::trajectory::point::{TrajectoryPoint, VehicleId};

/// A contiguous sub-trajectory of one vehicle in which every consecutive
/// pair of points is separated by a positive time delta of at most the gap
/// threshold. A lone point forms a run of length 1 with no kinematics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub vehicle: VehicleId,
    pub points: Range<usize>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Splits a `(vehicle, time)`-ordered point table into runs, breaking at
/// vehicle changes and wherever the time delta exceeds `threshold` or is
/// non-positive. Kinematic differencing downstream therefore only ever sees
/// pairs with `0 < dt <= threshold`.
///
/// Splitting is idempotent: re-splitting any produced run at the same
/// threshold returns the run itself.
pub fn split_runs(points: &[TrajectoryPoint], threshold: Duration) -> Vec<Run> {
    let mut runs = Vec::new();
    if points.is_empty() {
        return runs;
    }

    let mut start = 0usize;
    for current in 1..=points.len() {
        let boundary = current == points.len() || {
            let prev = &points[current - 1];
            let next = &points[current];

            next.vehicle != prev.vehicle || {
                let delta = next.time - prev.time;
                delta <= Duration::zero() || delta > threshold
            }
        };

        if boundary {
            runs.push(Run {
                vehicle: points[start].vehicle,
                points: start..current,
            });
            start = current;
        }
    }

    runs
}
