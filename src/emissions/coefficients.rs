use crate::emissions::pollutant::{FuelType, Pollutant};

/// One coefficient set of the instantaneous microscopic emission model of
/// Int Panis et al. (2006):
///
/// `E = max(e0, f1 + f2·v + f3·v² + f4·a + f5·a² + f6·v·a)`
///
/// with speed `v` in m/s, acceleration `a` in m/s² and the rate in g/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub e0: f64,
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub f4: f64,
    pub f5: f64,
    pub f6: f64,
}

/// Petrol and LPG passenger cars carry no tailpipe PM coefficients in the
/// published table; their rate is identically zero.
const ZERO: Coefficients = Coefficients::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

impl Coefficients {
    pub const fn new(e0: f64, f1: f64, f2: f64, f3: f64, f4: f64, f5: f64, f6: f64) -> Self {
        Coefficients {
            e0,
            f1,
            f2,
            f3,
            f4,
            f5,
            f6,
        }
    }

    /// The passenger-car coefficient sets from Int Panis et al. (2006),
    /// per fuel and pollutant.
    pub const fn lookup(fuel: FuelType, pollutant: Pollutant) -> Coefficients {
        match (fuel, pollutant) {
            (FuelType::Petrol, Pollutant::Co2) => {
                Coefficients::new(0.0, 5.53e-1, 1.61e-1, -2.89e-3, 2.66e-1, 5.11e-1, 1.83e-1)
            }
            (FuelType::Petrol, Pollutant::Nox) => {
                Coefficients::new(0.0, 6.19e-4, 8.00e-5, -4.03e-6, -4.13e-4, 3.80e-4, 1.77e-4)
            }
            (FuelType::Petrol, Pollutant::Pm) => ZERO,
            (FuelType::Petrol, Pollutant::Voc) => {
                Coefficients::new(0.0, 4.47e-3, 7.32e-7, -2.87e-8, -3.41e-6, 4.94e-6, 1.66e-6)
            }
            (FuelType::Diesel, Pollutant::Co2) => {
                Coefficients::new(0.0, 3.24e-1, 8.59e-2, 4.96e-3, -5.86e-2, 4.48e-1, 2.30e-1)
            }
            (FuelType::Diesel, Pollutant::Nox) => {
                Coefficients::new(0.0, 2.41e-3, -4.11e-4, 6.73e-5, -3.07e-3, 2.14e-3, 1.50e-3)
            }
            (FuelType::Diesel, Pollutant::Pm) => {
                Coefficients::new(0.0, 0.0, 3.13e-4, -1.84e-5, 0.0, 7.50e-4, 3.78e-4)
            }
            (FuelType::Diesel, Pollutant::Voc) => {
                Coefficients::new(0.0, 9.22e-5, 9.09e-6, -2.29e-7, -2.20e-5, 1.69e-5, 3.75e-6)
            }
            (FuelType::Lpg, Pollutant::Co2) => {
                Coefficients::new(0.0, 6.00e-1, 2.19e-1, -7.74e-3, 3.57e-1, 5.14e-1, 1.70e-1)
            }
            (FuelType::Lpg, Pollutant::Nox) => {
                Coefficients::new(0.0, 8.92e-4, 1.61e-4, -9.93e-6, -1.40e-4, 1.06e-3, 2.82e-4)
            }
            (FuelType::Lpg, Pollutant::Pm) => ZERO,
            (FuelType::Lpg, Pollutant::Voc) => {
                Coefficients::new(0.0, 4.38e-3, 7.82e-7, -7.21e-9, -1.96e-6, 4.05e-6, 1.36e-6)
            }
        }
    }

    /// Evaluates the polynomial, clamped below by `e0`.
    pub fn evaluate(&self, speed: f64, acceleration: f64) -> f64 {
        let rate = self.f1
            + self.f2 * speed
            + self.f3 * speed * speed
            + self.f4 * acceleration
            + self.f5 * acceleration * acceleration
            + self.f6 * speed * acceleration;

        rate.max(self.e0)
    }

    /// The idle rate, at zero speed and zero acceleration.
    pub fn baseline(&self) -> f64 {
        self.f1.max(self.e0)
    }
}
