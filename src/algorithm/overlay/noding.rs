//! Splitting segments at every mutual intersection.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Intersects, Line};
use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::algorithm::index::candidate_pairs;
use crate::geometry::coord_key;

pub(super) type Key = [u64; 2];

pub(super) fn key(coord: Coord) -> Key {
    coord_key(&crate::geometry::Coord::new(coord.x, coord.y))
}

/// What a segment is in one of the two inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Origin {
    /// Part of a line of the input.
    pub line: bool,
    /// Edge of the input's area, with the area on its left.
    pub area_left: bool,
    /// Edge of the input's area, with the area on its right.
    pub area_right: bool,
}

impl Origin {
    pub fn line() -> Self {
        Self {
            line: true,
            ..Default::default()
        }
    }

    pub fn ring(area_left: bool) -> Self {
        Self {
            line: false,
            area_left,
            area_right: !area_left,
        }
    }

    pub fn is_ring(&self) -> bool {
        self.area_left || self.area_right
    }

    pub fn is_set(&self) -> bool {
        self.line || self.is_ring()
    }

    fn reversed(self) -> Self {
        Self {
            line: self.line,
            area_left: self.area_right,
            area_right: self.area_left,
        }
    }

    fn merge(&mut self, other: Origin) {
        self.line |= other.line;
        self.area_left |= other.area_left;
        self.area_right |= other.area_right;
    }
}

/// An input segment, tagged with what it is in each input.
#[derive(Debug, Clone, Copy)]
pub(super) struct Segment {
    pub line: Line,
    pub origins: [Origin; 2],
}

/// A noded edge. Edges only meet at their endpoints.
#[derive(Debug, Clone, Copy)]
pub(super) struct Edge {
    pub start: Coord,
    pub end: Coord,
    pub origins: [Origin; 2],
}

impl Edge {
    pub fn midpoint(&self) -> Coord {
        Coord {
            x: (self.start.x + self.end.x) / 2.,
            y: (self.start.y + self.end.y) / 2.,
        }
    }
}

/// Position of `coord` along `line`, 0 at the start and 1 at the end.
fn parameter(line: &Line, coord: Coord) -> f64 {
    let delta = line.delta();
    if delta.x.abs() >= delta.y.abs() {
        (coord.x - line.start.x) / delta.x
    } else {
        (coord.y - line.start.y) / delta.y
    }
}

/// Split the segments against each other and against `points`, then merge coincident pieces.
///
/// Zero-length segments are ignored. Pieces covering the same stretch keep the direction of the
/// first one seen and collect the origins of all of them.
pub(super) fn node(segments: &[Segment], points: &[Coord]) -> Vec<Edge> {
    let segments: Vec<&Segment> = segments
        .iter()
        .filter(|segment| segment.line.start != segment.line.end)
        .collect();

    let mut splits: Vec<Vec<Coord>> = segments
        .iter()
        .map(|segment| vec![segment.line.start, segment.line.end])
        .collect();
    let lines: Vec<Line> = segments.iter().map(|segment| segment.line).collect();
    for (i, j) in candidate_pairs(&lines) {
        match line_intersection(lines[i], lines[j]) {
            Some(LineIntersection::SinglePoint { intersection, .. }) => {
                splits[i].push(intersection);
                splits[j].push(intersection);
            }
            Some(LineIntersection::Collinear { intersection }) => {
                splits[i].extend([intersection.start, intersection.end]);
                splits[j].extend([intersection.start, intersection.end]);
            }
            None => {}
        }
    }
    for (segment, split) in segments.iter().zip(splits.iter_mut()) {
        split.extend(points.iter().filter(|point| segment.line.intersects(*point)));
    }

    let mut edges: IndexMap<(Key, Key), Edge> = IndexMap::new();
    for (segment, mut split) in segments.iter().zip(splits) {
        split.sort_by(|p, q| parameter(&segment.line, *p).total_cmp(&parameter(&segment.line, *q)));
        split.dedup_by_key(|coord| key(*coord));
        for pair in split.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let (start_key, end_key) = (key(start), key(end));
            let edge_key = if start_key <= end_key {
                (start_key, end_key)
            } else {
                (end_key, start_key)
            };
            match edges.entry(edge_key) {
                Entry::Occupied(mut entry) => {
                    let edge = entry.get_mut();
                    let same_direction = key(edge.start) == start_key;
                    for (origin, new) in edge.origins.iter_mut().zip(segment.origins) {
                        origin.merge(if same_direction { new } else { new.reversed() });
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(Edge {
                        start,
                        end,
                        origins: segment.origins,
                    });
                }
            }
        }
    }
    edges.into_values().collect()
}
