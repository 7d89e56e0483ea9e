use geo::point;
use rustc_hash::FxHashMap;

use crate::aggregate::{DistributionFit, EmissionTotals, LogNormalFit};
use crate::emissions::Pollutant;
use crate::network::{EdgeId, RoadNetwork};
use crate::visual::error::VisualError;
use crate::visual::{fit_report, network_emissions_geojson, ColorRamp};

fn network() -> RoadNetwork {
    let a = (1, point! { x: 0.0, y: 0.0 });
    let b = (2, point! { x: 0.001, y: 0.0 });
    let c = (3, point! { x: 0.002, y: 0.0 });

    RoadNetwork::from_edges([(a, b), (b, c)]).expect("Could not build network")
}

fn totals(co2: f64) -> EmissionTotals {
    EmissionTotals {
        co2,
        ..Default::default()
    }
}

#[test]
fn one_feature_per_aggregated_edge() {
    let network = network();

    let mut per_edge = FxHashMap::default();
    per_edge.insert(EdgeId::new(1, 2), totals(1.0));
    per_edge.insert(EdgeId::new(2, 3), totals(50.0));

    let collection =
        network_emissions_geojson(&network, &per_edge, Pollutant::Co2, &ColorRamp::default())
            .expect("Renderable aggregate");

    assert_eq!(collection.features.len(), 2);

    let mut colors = Vec::new();
    for feature in &collection.features {
        let properties = feature.properties.as_ref().expect("Feature has properties");

        let color = properties["color"].as_str().expect("Hex colour string");
        assert!(color.starts_with('#') && color.len() == 7, "Bad colour: {color}");
        colors.push(color.to_string());

        assert!(properties["CO_2"].as_f64().is_some());
        assert!(properties["source"].as_i64().is_some());
    }

    // The hotter edge must resolve to a different colour than the cooler.
    assert_ne!(colors[0], colors[1]);
}

#[test]
fn unknown_edges_are_skipped() {
    let network = network();

    let mut per_edge = FxHashMap::default();
    per_edge.insert(EdgeId::new(1, 2), totals(1.0));
    per_edge.insert(EdgeId::new(7, 8), totals(2.0));

    let collection =
        network_emissions_geojson(&network, &per_edge, Pollutant::Co2, &ColorRamp::default())
            .expect("Renderable aggregate");

    assert_eq!(collection.features.len(), 1);
}

#[test]
fn empty_aggregate_is_an_error() {
    let network = network();
    let per_edge = FxHashMap::default();

    assert!(matches!(
        network_emissions_geojson(&network, &per_edge, Pollutant::Co2, &ColorRamp::default()),
        Err(VisualError::EmptyAggregate)
    ));
}

#[test]
fn fit_report_serialises() {
    let mut fits = FxHashMap::default();
    fits.insert(
        Pollutant::Co2,
        DistributionFit::LogNormal(LogNormalFit {
            mu: 1.0,
            sigma: 0.5,
            n: 10,
            discarded: 0,
        }),
    );

    let report = fit_report(&fits);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].pollutant, "CO_2");
    assert_eq!(report.rows[0].family, "LogNormal");
    assert_eq!(report.rows[0].n, 10);

    let json = report.to_json().expect("Serialisable report");
    assert!(json.contains("CO_2"));
}
