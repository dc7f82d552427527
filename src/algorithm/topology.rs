//! Detection of polygonal components whose rings cross or overlap.
//!
//! Relate and overlay both need well-formed areas. A ring that crosses itself, or two rings of
//! one (multi)polygon that cross or share a stretch of boundary, leave the interior ambiguous.
//! Rings may still touch at single points.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};

use crate::algorithm::index::candidate_pairs;
use crate::algorithm::Operation;
use crate::error::{GeoError, Result};
use crate::geometry::{Coord, Geometry, Polygon};
use crate::io::geo::coord_to_geo;

struct RingSegment {
    ring: usize,
    index: usize,
    ring_len: usize,
    line: geo::Line,
}

impl RingSegment {
    /// Consecutive segments of one ring, including the last and first.
    fn is_adjacent(&self, other: &RingSegment) -> bool {
        if self.ring != other.ring {
            return false;
        }
        let (lo, hi) = if self.index < other.index {
            (self.index, other.index)
        } else {
            (other.index, self.index)
        };
        hi == lo + 1 || (lo == 0 && hi + 1 == self.ring_len)
    }
}

fn ring_segments<'a>(polygons: impl IntoIterator<Item = &'a Polygon>) -> Vec<RingSegment> {
    let mut segments = vec![];
    for (ring_id, ring) in polygons
        .into_iter()
        .flat_map(|polygon| polygon.rings())
        .enumerate()
    {
        let ring_len = ring.num_coords().saturating_sub(1);
        for (index, pair) in ring.coords().windows(2).enumerate() {
            if pair[0] == pair[1] {
                continue;
            }
            segments.push(RingSegment {
                ring: ring_id,
                index,
                ring_len,
                line: geo::Line::new(coord_to_geo(&pair[0]), coord_to_geo(&pair[1])),
            });
        }
    }
    segments
}

/// The first location where two boundary segments of the given polygons cross or overlap.
fn first_conflict<'a>(polygons: impl IntoIterator<Item = &'a Polygon>) -> Option<Coord> {
    let segments = ring_segments(polygons);
    let lines: Vec<geo::Line> = segments.iter().map(|segment| segment.line).collect();
    for (i, j) in candidate_pairs(&lines) {
        let (a, b) = (&segments[i], &segments[j]);
        match line_intersection(a.line, b.line) {
            Some(LineIntersection::SinglePoint {
                intersection,
                is_proper: true,
            }) if !a.is_adjacent(b) => {
                return Some(Coord::new(intersection.x, intersection.y));
            }
            Some(LineIntersection::Collinear { intersection })
                if intersection.start != intersection.end =>
            {
                return Some(Coord::new(intersection.start.x, intersection.start.y));
            }
            _ => {}
        }
    }
    None
}

/// Find the first topology conflict in any polygonal component of the geometry.
///
/// Each Polygon and MultiPolygon is checked on its own; members of a collection are not checked
/// against each other.
pub(crate) fn find_conflict(geom: &Geometry) -> Option<Coord> {
    match geom {
        Geometry::Polygon(polygon) => first_conflict([polygon]),
        Geometry::MultiPolygon(multi_polygon) => first_conflict(multi_polygon.polygons()),
        Geometry::GeometryCollection(collection) => {
            collection.geometries().iter().find_map(find_conflict)
        }
        _ => None,
    }
}

/// Fail a relate-based operation when an input has a conflicting polygonal component.
pub(crate) fn check_relate_input(geom: &Geometry, operation: Operation) -> Result<()> {
    match find_conflict(geom) {
        Some(at) => Err(GeoError::topology(
            operation,
            format!(
                "side location conflict at {} {}. This can occur if the input geometry is invalid.",
                at.x, at.y
            ),
        )),
        None => Ok(()),
    }
}

/// Fail an overlay when input `index` (0 or 1) has a conflicting polygonal component.
pub(crate) fn check_overlay_input(geom: &Geometry, index: usize, operation: Operation) -> Result<()> {
    match find_conflict(geom) {
        Some(at) => Err(GeoError::topology(
            operation,
            format!(
                "Input geom {index} is invalid: Self-intersection at {} {}",
                at.x, at.y
            ),
        )),
        None => Ok(()),
    }
}
