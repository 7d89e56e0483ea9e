#[doc(hidden)]
pub mod coefficients;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod pollutant;

#[doc(inline)]
pub use coefficients::Coefficients;
#[doc(inline)]
pub use pollutant::{FuelType, Pollutant};

use strum::IntoEnumIterator;

use crate::emissions::error::EmissionsError;
use crate::kinematics::KinematicSample;
use crate::trajectory::PointId;

/// An instantaneous emission rate (g/s) of one pollutant at one point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EmissionSample {
    pub point: PointId,
    pub pollutant: Pollutant,
    pub rate: f64,
}

/// The pure instantaneous-rate function: deterministic in its inputs, no
/// state. Speeds must be finite and non-negative; accelerations finite.
pub fn instantaneous(
    speed: f64,
    acceleration: f64,
    pollutant: Pollutant,
    fuel: FuelType,
) -> Result<f64, EmissionsError> {
    if !speed.is_finite() || speed < 0.0 {
        return Err(EmissionsError::InvalidSpeed(speed));
    }

    if !acceleration.is_finite() {
        return Err(EmissionsError::InvalidAcceleration(acceleration));
    }

    Ok(Coefficients::lookup(fuel, pollutant).evaluate(speed, acceleration))
}

/// Evaluates every pollutant for every kinematic sample: four emission
/// samples per input sample. A missing acceleration (first sample of a run)
/// is evaluated at 0 m/s².
pub fn estimate(
    samples: &[KinematicSample],
    fuel: FuelType,
) -> Result<Vec<EmissionSample>, EmissionsError> {
    let mut emissions = Vec::with_capacity(samples.len() * Pollutant::COUNT);

    for sample in samples {
        let acceleration = sample.acceleration.unwrap_or(0.0);

        for pollutant in Pollutant::iter() {
            let rate = instantaneous(sample.speed, acceleration, pollutant, fuel)?;
            emissions.push(EmissionSample {
                point: sample.point,
                pollutant,
                rate,
            });
        }
    }

    Ok(emissions)
}
