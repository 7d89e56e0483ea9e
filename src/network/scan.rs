use geo::{Destination, Distance, Geodesic, Haversine, InterpolatableLine, LineLocatePoint, Point};
use itertools::Itertools;
use log::debug;
use rstar::AABB;

use crate::network::graph::{EdgeId, RoadNetwork, Segment};
use crate::trajectory::TrajectoryPoint;

pub trait Scan {
    /// Finds all segments whose envelope intersects a square radius around
    /// the target position.
    fn nearest_segments(&self, point: &Point, distance: f64) -> impl Iterator<Item = &Segment>;

    /// Projects the point onto every nearby segment, yielding the projected
    /// position, the edge and the haversine distance to it, closest first.
    fn nearest_projected(
        &self,
        point: Point,
        distance: f64,
    ) -> impl Iterator<Item = (Point, EdgeId, f64)>;

    /// The closest edge within `distance` metres, with the projected
    /// distance to it. `None` when nothing lies within the radius.
    fn nearest_edge(&self, point: &Point, distance: f64) -> Option<(EdgeId, f64)>;
}

impl Scan for RoadNetwork {
    #[inline]
    fn nearest_segments(&self, point: &Point, distance: f64) -> impl Iterator<Item = &Segment> {
        let bottom_right = Geodesic.destination(*point, 135.0, distance);
        let top_left = Geodesic.destination(*point, 315.0, distance);

        let bbox = AABB::from_corners(top_left, bottom_right);
        self.index().locate_in_envelope_intersecting(&bbox)
    }

    #[inline]
    fn nearest_projected(
        &self,
        point: Point,
        distance: f64,
    ) -> impl Iterator<Item = (Point, EdgeId, f64)> {
        self.nearest_segments(&point, distance)
            .filter_map(move |segment| {
                let line = segment.line();

                // We locate the point upon the segment, and then project
                // that fractional (%) upon it to obtain the closest position
                // on the edge itself.
                line.line_locate_point(&point)
                    .map(|frac| line.point_at_ratio_from_start(&Haversine, frac))
                    .map(|projected| (projected, segment.id, Haversine.distance(projected, point)))
            })
            .filter(move |(_, _, metres)| *metres <= distance)
            .sorted_by(|(_, _, a), (_, _, b)| a.total_cmp(b))
    }

    #[inline]
    fn nearest_edge(&self, point: &Point, distance: f64) -> Option<(EdgeId, f64)> {
        self.nearest_projected(*point, distance)
            .map(|(_, edge, metres)| (edge, metres))
            .next()
    }
}

impl RoadNetwork {
    /// Assigns each trajectory point to its nearest edge within `radius`
    /// metres. Points with no edge in range keep `edge: None` and are left
    /// for per-vehicle statistics only. Returns the matched count.
    pub fn match_points(&self, points: &mut [TrajectoryPoint], radius: f64) -> usize {
        let mut matched = 0usize;

        for point in points.iter_mut() {
            point.edge = self.nearest_edge(&point.position, radius).map(|(edge, _)| edge);
            if point.edge.is_some() {
                matched += 1;
            }
        }

        debug!("Matched {}/{} trajectory points", matched, points.len());
        matched
    }
}
