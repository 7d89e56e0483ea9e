
use std::time::Instant;

use chrono::Duration;
use log::debug;
use rustc_hash::FxHashMap;

use crate::aggregate::{self, fit_per_pollutant, DistributionFamily, DistributionFit, EmissionTotals};
use crate::emissions::{self, EmissionSample, FuelType, Pollutant};
use crate::kinematics::{self, KinematicSample};
use crate::network::{EdgeId, RoadNetwork};
use crate::trajectory::{split_runs, Run, TrajectoryPoint, VehicleId};

/// Parameters of one analysis run.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Largest usable time gap between consecutive points of a run.
    pub gap_threshold: Duration,
    /// Map-matching search radius, metres.
    pub match_radius: f64,
    pub fuel: FuelType,
    pub family: DistributionFamily,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gap_threshold: Duration::seconds(60),
            match_radius: 30.0,
            fuel: FuelType::Petrol,
            family: DistributionFamily::LogNormal,
        }
    }
}

/// The in-memory result tables of one analysis run. Derived, never
/// persisted; a new run recomputes everything from its inputs.
#[derive(Debug)]
pub struct AnalysisTables {
    pub points: Vec<TrajectoryPoint>,
    pub runs: Vec<Run>,
    pub kinematics: Vec<KinematicSample>,
    pub emissions: Vec<EmissionSample>,
    pub per_edge: FxHashMap<EdgeId, EmissionTotals>,
    pub per_vehicle: FxHashMap<VehicleId, EmissionTotals>,
    pub fits: FxHashMap<Pollutant, DistributionFit>,
}

/// Chains the pipeline over a point table:
/// match → split → kinematics → emissions → aggregate → fit.
pub struct Analysis {
    config: Config,
}

impl Analysis {
    pub fn new(config: Config) -> Self {
        Analysis { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(
        &self,
        network: &RoadNetwork,
        mut points: Vec<TrajectoryPoint>,
    ) -> crate::Result<AnalysisTables> {
        let mut start_time = Instant::now();

        network.match_points(&mut points, self.config.match_radius);
        debug!("Matching took: {:?}", start_time.elapsed());
        start_time = Instant::now();

        let runs = split_runs(&points, self.config.gap_threshold);
        let kinematics = kinematics::compute(&points, &runs);
        debug!(
            "Kinematics over {} runs took: {:?}",
            runs.len(),
            start_time.elapsed()
        );
        start_time = Instant::now();

        let emissions = emissions::estimate(&kinematics, self.config.fuel)?;
        debug!(
            "Estimating {} emission samples took: {:?}",
            emissions.len(),
            start_time.elapsed()
        );
        start_time = Instant::now();

        let per_edge = aggregate::sum_per_edge(&points, &emissions);
        let per_vehicle = aggregate::sum_per_vehicle(&points, &emissions);
        let fits = fit_per_pollutant(&emissions, self.config.family);
        debug!("Aggregation took: {:?}", start_time.elapsed());

        Ok(AnalysisTables {
            points,
            runs,
            kinematics,
            emissions,
            per_edge,
            per_vehicle,
            fits,
        })
    }
}
