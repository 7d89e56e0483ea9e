
use geo::{Distance, Haversine};

use crate::trajectory::{PointId, Run, TrajectoryPoint};

/// Instantaneous kinematic state derived for one trajectory point from its
/// predecessor in the same run. Speed is in m/s, acceleration in m/s².
/// The first sample of a run has no prior speed to difference against, so
/// its `acceleration` is `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicSample {
    pub point: PointId,
    pub speed: f64,
    pub acceleration: Option<f64>,
}

/// Computes per-point speed and acceleration over each run: for every
/// consecutive pair, `speed = haversine distance / dt` and `acceleration =
/// (speed - prior speed) / dt`. Exactly one sample is produced per pair
/// with `dt > 0`; runs of length 1 yield nothing.
pub fn compute(points: &[TrajectoryPoint], runs: &[Run]) -> Vec<KinematicSample> {
    let mut samples = Vec::new();

    for run in runs {
        let mut prior_speed: Option<f64> = None;

        for current in run.points.start + 1..run.points.end {
            let prev = &points[current - 1];
            let next = &points[current];

            let seconds = (next.time - prev.time).num_milliseconds() as f64 / 1000.0;
            if seconds <= 0.0 {
                // The splitter never emits such a pair inside a run.
                prior_speed = None;
                continue;
            }

            let speed = Haversine.distance(prev.position, next.position) / seconds;
            let acceleration = prior_speed.map(|prior| (speed - prior) / seconds);

            samples.push(KinematicSample {
                point: current,
                speed,
                acceleration,
            });

            prior_speed = Some(speed);
        }
    }

    samples
}
