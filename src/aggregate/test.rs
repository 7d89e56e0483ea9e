use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use geo::point;
use strum::IntoEnumIterator;

use crate::aggregate::error::AggregateError;
use crate::aggregate::{
    fit_per_pollutant, normalize, sum_per_edge, sum_per_vehicle, DistributionFamily, LogNormalFit,
    NormalFit,
};
use crate::emissions::{EmissionSample, Pollutant};
use crate::network::EdgeId;
use crate::trajectory::TrajectoryPoint;

fn pt(vehicle: u64, edge: Option<EdgeId>) -> TrajectoryPoint {
    let mut point = TrajectoryPoint::new(
        vehicle,
        Utc.timestamp_opt(0, 0).unwrap(),
        point! { x: 0.0, y: 0.0 },
    );
    point.edge = edge;
    point
}

fn sample(point: usize, pollutant: Pollutant, rate: f64) -> EmissionSample {
    EmissionSample {
        point,
        pollutant,
        rate,
    }
}

fn fixture() -> (Vec<TrajectoryPoint>, Vec<EmissionSample>) {
    let points = vec![
        pt(1, Some(EdgeId::new(1, 2))),
        // Matched onto the same road, opposite direction.
        pt(1, Some(EdgeId::new(2, 1))),
        pt(2, None),
    ];

    let samples = vec![
        sample(0, Pollutant::Co2, 1.0),
        sample(1, Pollutant::Co2, 2.0),
        sample(2, Pollutant::Co2, 4.0),
        sample(0, Pollutant::Nox, 0.5),
    ];

    (points, samples)
}

#[test]
fn per_edge_sums_match_direct_recomputation() {
    let (points, samples) = fixture();
    let per_edge = sum_per_edge(&points, &samples);

    // Both directions collapse onto one undirected key; the unmatched
    // point contributes nowhere.
    assert_eq!(per_edge.len(), 1);

    let totals = &per_edge[&EdgeId::new(1, 2)];
    for pollutant in Pollutant::iter() {
        let direct: f64 = samples
            .iter()
            .filter(|sample| sample.pollutant == pollutant)
            .filter(|sample| {
                points[sample.point]
                    .edge
                    .is_some_and(|edge| edge.canonical() == EdgeId::new(1, 2))
            })
            .map(|sample| sample.rate)
            .sum();

        assert_relative_eq!(totals.get(pollutant), direct);
    }

    assert_relative_eq!(totals.co2, 3.0);
    assert_relative_eq!(totals.nox, 0.5);
}

#[test]
fn per_vehicle_retains_unmatched_points() {
    let (points, samples) = fixture();
    let per_vehicle = sum_per_vehicle(&points, &samples);

    assert_eq!(per_vehicle.len(), 2);
    assert_relative_eq!(per_vehicle[&1].co2, 3.0);
    assert_relative_eq!(per_vehicle[&2].co2, 4.0);
}

#[test]
fn normalisation_sums_to_the_whole() {
    let samples = vec![
        sample(0, Pollutant::Co2, 1.0),
        sample(1, Pollutant::Co2, 3.0),
        sample(0, Pollutant::Pm, 0.0),
        sample(1, Pollutant::Pm, 0.0),
    ];

    let shares = normalize(&samples, true);
    assert_relative_eq!(shares[0].rate, 25.0);
    assert_relative_eq!(shares[1].rate, 75.0);

    // A zero-total pollutant yields zero shares, not NaN.
    assert_eq!(shares[2].rate, 0.0);
    assert_eq!(shares[3].rate, 0.0);

    let fractions = normalize(&samples, false);
    let co2: f64 = fractions
        .iter()
        .filter(|sample| sample.pollutant == Pollutant::Co2)
        .map(|sample| sample.rate)
        .sum();
    assert_relative_eq!(co2, 1.0);
}

#[test]
fn lognormal_mle_recovers_parameters() {
    // Log-values symmetric around 1.0 with spread 0.5.
    let values = [(1.5f64).exp(), (0.5f64).exp()];
    let fit = LogNormalFit::fit(&values).expect("Positive samples");

    assert_relative_eq!(fit.mu, 1.0, epsilon = 1e-12);
    assert_relative_eq!(fit.sigma, 0.5, epsilon = 1e-12);
    assert_relative_eq!(fit.median(), 1.0f64.exp(), epsilon = 1e-12);
    assert_relative_eq!(fit.mean(), (1.0f64 + 0.125).exp(), epsilon = 1e-12);
    assert_eq!(fit.n, 2);

    // The density integrates mass around the median.
    assert!(fit.pdf(fit.median()) > fit.pdf(fit.median() * 10.0));
}

#[test]
fn lognormal_discards_non_positive_values() {
    let fit = LogNormalFit::fit(&[1.0, 0.0, -3.0, f64::NAN]).expect("One usable value");
    assert_eq!(fit.n, 1);
    assert_eq!(fit.discarded, 3);
    assert_eq!(fit.sigma, 0.0);

    assert!(matches!(
        LogNormalFit::fit(&[0.0, -1.0]),
        Err(AggregateError::EmptySample)
    ));
}

#[test]
fn normal_fit_recovers_moments() {
    let fit = NormalFit::fit(&[1.0, 2.0, 3.0]).expect("Finite samples");
    assert_relative_eq!(fit.mean, 2.0);
    assert_relative_eq!(fit.std, (2.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    assert_relative_eq!(fit.median(), 2.0);
}

#[test]
fn fit_per_pollutant_omits_empty_pollutants() {
    let samples = vec![
        sample(0, Pollutant::Co2, 1.0),
        sample(1, Pollutant::Co2, 2.0),
        sample(0, Pollutant::Pm, 0.0),
        sample(1, Pollutant::Pm, 0.0),
    ];

    let fits = fit_per_pollutant(&samples, DistributionFamily::LogNormal);

    assert!(fits.contains_key(&Pollutant::Co2));
    assert!(!fits.contains_key(&Pollutant::Pm));
    assert!(!fits.contains_key(&Pollutant::Voc));

    // The normal family has no positivity constraint.
    let fits = fit_per_pollutant(&samples, DistributionFamily::Normal);
    assert!(fits.contains_key(&Pollutant::Pm));
}
