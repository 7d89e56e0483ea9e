use std::f64::consts::PI;

use log::debug;
use rustc_hash::FxHashMap;

use crate::aggregate::error::AggregateError;
use crate::emissions::{EmissionSample, Pollutant};

/// The distribution family fitted over per-point emission rates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, strum::Display)]
pub enum DistributionFamily {
    #[default]
    LogNormal,
    Normal,
}

/// Closed-form maximum-likelihood log-normal fit: `mu` and `sigma` are the
/// mean and standard deviation of the log of the strictly positive samples.
/// Non-positive and non-finite values cannot contribute and are counted in
/// `discarded`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LogNormalFit {
    pub mu: f64,
    pub sigma: f64,
    pub n: usize,
    pub discarded: usize,
}

impl LogNormalFit {
    pub fn fit(values: &[f64]) -> Result<LogNormalFit, AggregateError> {
        let logs = values
            .iter()
            .copied()
            .filter(|value| value.is_finite() && *value > 0.0)
            .map(f64::ln)
            .collect::<Vec<_>>();

        let discarded = values.len() - logs.len();
        if logs.is_empty() {
            return Err(AggregateError::EmptySample);
        }

        let n = logs.len();
        let mu = logs.iter().sum::<f64>() / n as f64;
        let sigma = (logs.iter().map(|value| (value - mu).powi(2)).sum::<f64>() / n as f64).sqrt();

        Ok(LogNormalFit {
            mu,
            sigma,
            n,
            discarded,
        })
    }

    pub fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 || self.sigma == 0.0 {
            return 0.0;
        }

        let z = (x.ln() - self.mu) / self.sigma;
        (-0.5 * z * z).exp() / (x * self.sigma * (2.0 * PI).sqrt())
    }

    pub fn mean(&self) -> f64 {
        (self.mu + 0.5 * self.sigma * self.sigma).exp()
    }

    pub fn median(&self) -> f64 {
        self.mu.exp()
    }
}

/// Closed-form maximum-likelihood normal fit over finite samples.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct NormalFit {
    pub mean: f64,
    pub std: f64,
    pub n: usize,
    pub discarded: usize,
}

impl NormalFit {
    pub fn fit(values: &[f64]) -> Result<NormalFit, AggregateError> {
        let finite = values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .collect::<Vec<_>>();

        let discarded = values.len() - finite.len();
        if finite.is_empty() {
            return Err(AggregateError::EmptySample);
        }

        let n = finite.len();
        let mean = finite.iter().sum::<f64>() / n as f64;
        let std = (finite.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / n as f64).sqrt();

        Ok(NormalFit {
            mean,
            std,
            n,
            discarded,
        })
    }

    pub fn pdf(&self, x: f64) -> f64 {
        if self.std == 0.0 {
            return 0.0;
        }

        let z = (x - self.mean) / self.std;
        (-0.5 * z * z).exp() / (self.std * (2.0 * PI).sqrt())
    }

    pub fn median(&self) -> f64 {
        self.mean
    }
}

/// A fitted distribution of either family.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum DistributionFit {
    LogNormal(LogNormalFit),
    Normal(NormalFit),
}

impl DistributionFit {
    pub fn fit(values: &[f64], family: DistributionFamily) -> Result<DistributionFit, AggregateError> {
        match family {
            DistributionFamily::LogNormal => LogNormalFit::fit(values).map(DistributionFit::LogNormal),
            DistributionFamily::Normal => NormalFit::fit(values).map(DistributionFit::Normal),
        }
    }

    pub fn family(&self) -> DistributionFamily {
        match self {
            DistributionFit::LogNormal(_) => DistributionFamily::LogNormal,
            DistributionFit::Normal(_) => DistributionFamily::Normal,
        }
    }

    /// `(location, scale)` of the fit: `(mu, sigma)` for the log-normal,
    /// `(mean, std)` for the normal.
    pub fn params(&self) -> (f64, f64) {
        match self {
            DistributionFit::LogNormal(fit) => (fit.mu, fit.sigma),
            DistributionFit::Normal(fit) => (fit.mean, fit.std),
        }
    }

    pub fn n(&self) -> usize {
        match self {
            DistributionFit::LogNormal(fit) => fit.n,
            DistributionFit::Normal(fit) => fit.n,
        }
    }

    pub fn pdf(&self, x: f64) -> f64 {
        match self {
            DistributionFit::LogNormal(fit) => fit.pdf(x),
            DistributionFit::Normal(fit) => fit.pdf(x),
        }
    }

    pub fn mean(&self) -> f64 {
        match self {
            DistributionFit::LogNormal(fit) => fit.mean(),
            DistributionFit::Normal(fit) => fit.mean,
        }
    }

    pub fn median(&self) -> f64 {
        match self {
            DistributionFit::LogNormal(fit) => fit.median(),
            DistributionFit::Normal(fit) => fit.median(),
        }
    }
}

/// Fits the chosen family per pollutant over the sample rates. Pollutants
/// with no usable values (e.g. PM on petrol, identically zero) are omitted
/// rather than erroring.
pub fn fit_per_pollutant(
    samples: &[EmissionSample],
    family: DistributionFamily,
) -> FxHashMap<Pollutant, DistributionFit> {
    let mut rates: FxHashMap<Pollutant, Vec<f64>> = FxHashMap::default();
    for sample in samples {
        rates.entry(sample.pollutant).or_default().push(sample.rate);
    }

    let mut fits = FxHashMap::default();
    for (pollutant, values) in rates {
        match DistributionFit::fit(&values, family) {
            Ok(fit) => {
                fits.insert(pollutant, fit);
            }
            Err(err) => debug!("No {} fit for {}: {:?}", family, pollutant, err),
        }
    }

    fits
}
