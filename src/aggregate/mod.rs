#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod fit;
#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use fit::{fit_per_pollutant, DistributionFamily, DistributionFit, LogNormalFit, NormalFit};

use rustc_hash::FxHashMap;

use crate::emissions::{EmissionSample, Pollutant};
use crate::network::EdgeId;
use crate::trajectory::{TrajectoryPoint, VehicleId};

/// Summed emission rates per pollutant.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct EmissionTotals {
    #[serde(rename = "CO_2")]
    pub co2: f64,
    #[serde(rename = "NO_x")]
    pub nox: f64,
    #[serde(rename = "PM")]
    pub pm: f64,
    #[serde(rename = "VOC")]
    pub voc: f64,
}

impl EmissionTotals {
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Co2 => self.co2,
            Pollutant::Nox => self.nox,
            Pollutant::Pm => self.pm,
            Pollutant::Voc => self.voc,
        }
    }

    pub fn add(&mut self, pollutant: Pollutant, rate: f64) {
        match pollutant {
            Pollutant::Co2 => self.co2 += rate,
            Pollutant::Nox => self.nox += rate,
            Pollutant::Pm => self.pm += rate,
            Pollutant::Voc => self.voc += rate,
        }
    }
}

/// Sums emission samples onto the undirected edge their point matched.
/// Samples of unmatched points contribute nowhere here.
pub fn sum_per_edge(
    points: &[TrajectoryPoint],
    samples: &[EmissionSample],
) -> FxHashMap<EdgeId, EmissionTotals> {
    let mut sums: FxHashMap<EdgeId, EmissionTotals> = FxHashMap::default();

    for sample in samples {
        if let Some(edge) = points[sample.point].edge {
            sums.entry(edge.canonical())
                .or_default()
                .add(sample.pollutant, sample.rate);
        }
    }

    sums
}

/// Sums emission samples per vehicle. Unmatched points are retained; the
/// vehicle total does not depend on map-matching.
pub fn sum_per_vehicle(
    points: &[TrajectoryPoint],
    samples: &[EmissionSample],
) -> FxHashMap<VehicleId, EmissionTotals> {
    let mut sums: FxHashMap<VehicleId, EmissionTotals> = FxHashMap::default();

    for sample in samples {
        sums.entry(points[sample.point].vehicle)
            .or_default()
            .add(sample.pollutant, sample.rate);
    }

    sums
}

/// Rescales each sample to its share of the pollutant's total, as a
/// fraction or a percentage. A pollutant whose total is zero yields zero
/// shares rather than NaN.
pub fn normalize(samples: &[EmissionSample], percentage: bool) -> Vec<EmissionSample> {
    let mut totals = EmissionTotals::default();
    for sample in samples {
        totals.add(sample.pollutant, sample.rate);
    }

    samples
        .iter()
        .map(|sample| {
            let total = totals.get(sample.pollutant);
            let share = if total > 0.0 { sample.rate / total } else { 0.0 };

            EmissionSample {
                rate: if percentage { share * 100.0 } else { share },
                ..*sample
            }
        })
        .collect()
}
