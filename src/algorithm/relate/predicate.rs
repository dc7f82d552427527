//! Named spatial predicates.
//!
//! Each predicate first rules out cheap cases from the bounding rectangles, and answers
//! `intersects` and `contains` against an axis-aligned rectangle directly. Only the remaining
//! inputs are checked for topology conflicts and related.

use geo::{Intersects, Rect};

use crate::algorithm::relate::relate_checked;
use crate::algorithm::Operation;
use crate::error::Result;
use crate::geometry::{Coord, Geometry, LineString, Polygon};
use crate::io::geo::geometry_to_geo;

/// The eight named DE-9IM predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    Contains,
    Crosses,
    Disjoint,
    Equals,
    Intersects,
    Overlaps,
    Touches,
    Within,
}

impl Predicate {
    pub const ALL: [Predicate; 8] = [
        Predicate::Contains,
        Predicate::Crosses,
        Predicate::Disjoint,
        Predicate::Equals,
        Predicate::Intersects,
        Predicate::Overlaps,
        Predicate::Touches,
        Predicate::Within,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Contains => "contains",
            Predicate::Crosses => "crosses",
            Predicate::Disjoint => "disjoint",
            Predicate::Equals => "equals",
            Predicate::Intersects => "intersects",
            Predicate::Overlaps => "overlaps",
            Predicate::Touches => "touches",
            Predicate::Within => "within",
        }
    }

    /// Evaluate the predicate on `a` and `b`.
    pub fn evaluate(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        let operation = Operation::Predicate(*self);
        match self {
            Predicate::Equals => equals(a, b, operation),
            Predicate::Intersects => intersects(a, b, operation),
            Predicate::Disjoint => intersects(a, b, operation).map(|i| !i),
            Predicate::Contains => contains(a, b, operation),
            Predicate::Within => contains(b, a, operation),
            Predicate::Touches => {
                let Some(matrix) = relate_if_close(a, b, operation)? else {
                    return Ok(false);
                };
                Ok(matrix.is_touches(a.dimension(), b.dimension()))
            }
            Predicate::Crosses => {
                let Some(matrix) = relate_if_close(a, b, operation)? else {
                    return Ok(false);
                };
                Ok(matrix.is_crosses(a.dimension(), b.dimension()))
            }
            Predicate::Overlaps => {
                let Some(matrix) = relate_if_close(a, b, operation)? else {
                    return Ok(false);
                };
                Ok(matrix.is_overlaps(a.dimension(), b.dimension()))
            }
        }
    }
}

fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.min().x <= b.max().x
        && b.min().x <= a.max().x
        && a.min().y <= b.max().y
        && b.min().y <= a.max().y
}

fn rect_covers(a: &Rect, b: &Rect) -> bool {
    a.min().x <= b.min().x
        && a.min().y <= b.min().y
        && b.max().x <= a.max().x
        && b.max().y <= a.max().y
}

/// Relate the inputs unless their bounding rectangles are disjoint, or either is empty.
fn relate_if_close(
    a: &Geometry,
    b: &Geometry,
    operation: Operation,
) -> Result<Option<super::IntersectionMatrix>> {
    match (a.bounding_rect(), b.bounding_rect()) {
        (Some(rect_a), Some(rect_b)) if rects_intersect(&rect_a, &rect_b) => {
            relate_checked(a, b, operation).map(Some)
        }
        _ => Ok(None),
    }
}

fn equals(a: &Geometry, b: &Geometry, operation: Operation) -> Result<bool> {
    match (a.bounding_rect(), b.bounding_rect()) {
        (None, None) => Ok(true),
        (Some(rect_a), Some(rect_b)) => {
            if rect_a != rect_b {
                return Ok(false);
            }
            let matrix = relate_checked(a, b, operation)?;
            Ok(matrix.is_equals(a.dimension(), b.dimension()))
        }
        _ => Ok(false),
    }
}

fn intersects(a: &Geometry, b: &Geometry, operation: Operation) -> Result<bool> {
    let (Some(rect_a), Some(rect_b)) = (a.bounding_rect(), b.bounding_rect()) else {
        return Ok(false);
    };
    if !rects_intersect(&rect_a, &rect_b) {
        return Ok(false);
    }
    if as_rectangle(a).is_some() || as_rectangle(b).is_some() {
        return Ok(geometry_to_geo(a).intersects(&geometry_to_geo(b)));
    }
    Ok(relate_checked(a, b, operation)?.is_intersects())
}

fn contains(a: &Geometry, b: &Geometry, operation: Operation) -> Result<bool> {
    let (Some(rect_a), Some(rect_b)) = (a.bounding_rect(), b.bounding_rect()) else {
        return Ok(false);
    };
    if !rect_covers(&rect_a, &rect_b) {
        return Ok(false);
    }
    if let Some(rect) = as_rectangle(a) {
        return Ok(!on_rectangle_boundary(&rect, b));
    }
    Ok(relate_checked(a, b, operation)?.is_contains())
}

/// The rectangle a polygon covers, when it is an axis-aligned rectangle without holes drawn with
/// exactly four corners.
fn as_rectangle(geom: &Geometry) -> Option<Rect> {
    let Geometry::Polygon(polygon) = geom else {
        return None;
    };
    if polygon.num_interiors() != 0 {
        return None;
    }
    let coords = polygon.exterior().coords();
    if coords.len() != 5 {
        return None;
    }
    let rect = geom.bounding_rect()?;
    let (min, max) = (rect.min(), rect.max());
    if min.x == max.x || min.y == max.y {
        return None;
    }
    let on_corner =
        |c: &Coord| (c.x == min.x || c.x == max.x) && (c.y == min.y || c.y == max.y);
    if !coords.iter().all(on_corner) {
        return None;
    }
    let axis_steps = coords
        .windows(2)
        .all(|pair| (pair[0].x == pair[1].x) != (pair[0].y == pair[1].y));
    axis_steps.then_some(rect)
}

/// Whether `geom`, already known to lie within `rect`, lies entirely on its boundary.
fn on_rectangle_boundary(rect: &Rect, geom: &Geometry) -> bool {
    let (min, max) = (rect.min(), rect.max());
    let point_on = |c: &Coord| c.x == min.x || c.x == max.x || c.y == min.y || c.y == max.y;
    let line_on = |line: &LineString| {
        line.coords().windows(2).all(|pair| {
            let (p, q) = (&pair[0], &pair[1]);
            if p == q {
                point_on(p)
            } else if p.x == q.x {
                p.x == min.x || p.x == max.x
            } else if p.y == q.y {
                p.y == min.y || p.y == max.y
            } else {
                false
            }
        })
    };
    let polygon_on = |polygon: &Polygon| polygon.is_empty();
    match geom {
        Geometry::Point(point) => point.coord().map_or(true, |c| point_on(&c)),
        Geometry::MultiPoint(multi_point) => multi_point
            .points()
            .iter()
            .all(|point| point.coord().map_or(true, |c| point_on(&c))),
        Geometry::LineString(line) => line_on(line),
        Geometry::MultiLineString(multi_line) => multi_line.lines().iter().all(line_on),
        Geometry::Polygon(polygon) => polygon_on(polygon),
        Geometry::MultiPolygon(multi_polygon) => multi_polygon.polygons().iter().all(polygon_on),
        Geometry::GeometryCollection(collection) => collection
            .geometries()
            .iter()
            .all(|member| on_rectangle_boundary(rect, member)),
    }
}
