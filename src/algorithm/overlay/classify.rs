//! Decomposition of the inputs and location of noded edges and nodes against them.

use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Coord, Line, MultiPolygon, Winding};

use super::noding::{Edge, Origin, Segment};
use crate::algorithm::index::dissolve;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::io::geo::{coord_to_geo, polygon_to_geo};

/// One overlay input split into its dissolved area, line segments and isolated points.
pub(super) struct Input {
    pub area: MultiPolygon,
    pub lines: Vec<Line>,
    pub points: Vec<Coord>,
}

impl Input {
    pub fn new(geom: &Geometry) -> Self {
        let mut polygons = vec![];
        let mut lines = vec![];
        let mut points = vec![];
        decompose(geom, &mut polygons, &mut lines, &mut points);
        Self {
            area: dissolve(&polygons),
            lines,
            points,
        }
    }

    /// Lines and area boundary edges, tagged as belonging to input `index`.
    pub fn segments(&self, index: usize) -> Vec<Segment> {
        let tagged = |line: Line, origin: Origin| {
            let mut origins = [Origin::default(); 2];
            origins[index] = origin;
            Segment { line, origins }
        };
        let mut segments: Vec<Segment> = self
            .lines
            .iter()
            .map(|line| tagged(*line, Origin::line()))
            .collect();
        for polygon in &self.area {
            let rings = std::iter::once((polygon.exterior(), true))
                .chain(polygon.interiors().iter().map(|ring| (ring, false)));
            for (ring, is_exterior) in rings {
                let area_left = ring.is_ccw() == is_exterior;
                segments.extend(ring.lines().map(|line| tagged(line, Origin::ring(area_left))));
            }
        }
        segments
    }

    pub fn locate(&self, coord: &Coord) -> CoordPos {
        self.area.coordinate_position(coord)
    }
}

fn decompose_line_string(
    line_string: &LineString,
    lines: &mut Vec<Line>,
    points: &mut Vec<Coord>,
) {
    let coords: Vec<Coord> = line_string.coords().iter().map(coord_to_geo).collect();
    match coords.first() {
        None => {}
        // A line of coincident points is a point.
        Some(first) if coords.iter().all(|c| c == first) => points.push(*first),
        Some(_) => lines.extend(
            coords
                .windows(2)
                .filter(|pair| pair[0] != pair[1])
                .map(|pair| Line::new(pair[0], pair[1])),
        ),
    }
}

fn area_part(polygon: &Polygon) -> Option<geo::Polygon> {
    (!polygon.is_empty()).then(|| polygon_to_geo(polygon))
}

fn decompose(
    geom: &Geometry,
    polygons: &mut Vec<geo::Polygon>,
    lines: &mut Vec<Line>,
    points: &mut Vec<Coord>,
) {
    match geom {
        Geometry::Point(point) => points.extend(point.coord().map(|c| coord_to_geo(&c))),
        Geometry::MultiPoint(multi_point) => points.extend(
            multi_point
                .points()
                .iter()
                .filter_map(|point| point.coord())
                .map(|c| coord_to_geo(&c)),
        ),
        Geometry::LineString(line_string) => decompose_line_string(line_string, lines, points),
        Geometry::MultiLineString(multi_line_string) => {
            for line_string in multi_line_string.lines() {
                decompose_line_string(line_string, lines, points);
            }
        }
        Geometry::Polygon(polygon) => polygons.extend(area_part(polygon)),
        Geometry::MultiPolygon(multi_polygon) => {
            polygons.extend(multi_polygon.polygons().iter().filter_map(area_part))
        }
        Geometry::GeometryCollection(collection) => {
            for member in collection.geometries() {
                decompose(member, polygons, lines, points);
            }
        }
    }
}

/// Membership of a noded edge, and of the faces on either side of it, in each input.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct EdgeLabel {
    pub on: [bool; 2],
    pub left: [bool; 2],
    pub right: [bool; 2],
}

pub(super) fn label_edge(edge: &Edge, inputs: &[Input; 2]) -> EdgeLabel {
    let mut label = EdgeLabel::default();
    let midpoint = edge.midpoint();
    for (i, (origin, input)) in edge.origins.iter().zip(inputs).enumerate() {
        if origin.is_ring() {
            label.left[i] = origin.area_left;
            label.right[i] = origin.area_right;
        } else {
            let inside = input.locate(&midpoint) == CoordPos::Inside;
            label.left[i] = inside;
            label.right[i] = inside;
        }
        label.on[i] = origin.is_set() || label.left[i] || label.right[i];
    }
    label
}
