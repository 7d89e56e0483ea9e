#[doc(hidden)]
pub mod error;
#[doc(hidden)]
#[cfg(test)]
mod test;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;

use crate::aggregate::{DistributionFit, EmissionTotals};
use crate::emissions::Pollutant;
use crate::network::{EdgeId, RoadNetwork};
use crate::visual::error::VisualError;

/// Continuous colour scale over aggregated emission values. Emission sums
/// span orders of magnitude across a network, so the scale is log-stretched
/// unless asked otherwise.
#[derive(Clone, Copy)]
pub struct ColorRamp {
    pub gradient: colorous::Gradient,
    pub log: bool,
}

impl Default for ColorRamp {
    fn default() -> Self {
        ColorRamp {
            gradient: colorous::VIRIDIS,
            log: true,
        }
    }
}

impl ColorRamp {
    fn color(&self, value: f64, min: f64, max: f64) -> String {
        let stretch = |v: f64| if self.log { v.ln_1p() } else { v };
        let (value, min, max) = (stretch(value), stretch(min), stretch(max));

        let t = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };

        let color = self.gradient.eval_continuous(t);
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    }
}

/// Renders the network's aggregated edges as a GeoJSON FeatureCollection:
/// one LineString per edge, carrying the summed pollutant quantity and a
/// colour sampled from the ramp. Edges whose endpoints are unknown to the
/// given network are skipped.
pub fn network_emissions_geojson(
    network: &RoadNetwork,
    per_edge: &FxHashMap<EdgeId, EmissionTotals>,
    pollutant: Pollutant,
    ramp: &ColorRamp,
) -> Result<FeatureCollection, VisualError> {
    if per_edge.is_empty() {
        return Err(VisualError::EmptyAggregate);
    }

    let values = per_edge
        .values()
        .map(|totals| totals.get(pollutant))
        .collect::<Vec<_>>();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let features = per_edge
        .iter()
        .sorted_by_key(|(edge, _)| **edge)
        .filter_map(|(edge, totals)| {
            let (source, target) = match (
                network.get_position(&edge.source),
                network.get_position(&edge.target),
            ) {
                (Some(source), Some(target)) => (source, target),
                _ => {
                    debug!("Skipping edge absent from network: {:?}", edge);
                    return None;
                }
            };

            let value = totals.get(pollutant);

            let mut properties = JsonObject::new();
            properties.insert("source".to_string(), JsonValue::from(edge.source));
            properties.insert("target".to_string(), JsonValue::from(edge.target));
            properties.insert(pollutant.to_string(), JsonValue::from(value));
            properties.insert(
                "color".to_string(),
                JsonValue::from(ramp.color(value, min, max)),
            );

            Some(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(vec![
                    vec![source.x(), source.y()],
                    vec![target.x(), target.y()],
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect::<Vec<_>>();

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// One fitted distribution, flattened for serialisation.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FitRow {
    pub pollutant: String,
    pub family: String,
    pub n: usize,
    pub location: f64,
    pub scale: f64,
    pub mean: f64,
    pub median: f64,
}

/// Per-pollutant summary of the fitted distributions, ready to plot
/// elsewhere.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FitReport {
    pub rows: Vec<FitRow>,
}

impl FitReport {
    pub fn to_json(&self) -> Result<String, VisualError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn fit_report(fits: &FxHashMap<Pollutant, DistributionFit>) -> FitReport {
    let rows = fits
        .iter()
        .map(|(pollutant, fit)| {
            let (location, scale) = fit.params();

            FitRow {
                pollutant: pollutant.to_string(),
                family: fit.family().to_string(),
                n: fit.n(),
                location,
                scale,
                mean: fit.mean(),
                median: fit.median(),
            }
        })
        .sorted_by(|a, b| a.pollutant.cmp(&b.pollutant))
        .collect();

    FitReport { rows }
}
