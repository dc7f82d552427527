//! Boolean set operations between two geometries of any kind.
//!
//! The areas of both inputs are combined with [`geo::BooleanOps`], and the result is snapped back
//! onto the exact input vertices and boundary intersections. Lines and points are handled
//! on a noded graph of all input segments and area boundaries: every edge and node is located
//! against both inputs, and kept when the operation selects it and it is not already covered by a
//! higher-dimensional part of the result.

mod build;
mod classify;
mod noding;

use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::BooleanOps;
use indexmap::IndexMap;

use crate::algorithm::index::VertexSnapper;
use crate::algorithm::topology::check_overlay_input;
use crate::algorithm::Operation;
use crate::error::Result;
use crate::geometry::{Dimension, Geometry, Point};
use crate::io::geo::multi_polygon_from_geo;
use build::{assemble, merge_lines};
use classify::{label_edge, Input};
use noding::{key, node, Key};

/// The four overlay operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayOp {
    Difference,
    Intersection,
    SymDifference,
    Union,
}

impl OverlayOp {
    pub const ALL: [OverlayOp; 4] = [
        OverlayOp::Difference,
        OverlayOp::Intersection,
        OverlayOp::SymDifference,
        OverlayOp::Union,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OverlayOp::Difference => "difference",
            OverlayOp::Intersection => "intersection",
            OverlayOp::SymDifference => "symdifference",
            OverlayOp::Union => "union",
        }
    }

    /// Whether a location inside (or not) each of the two inputs is part of the result.
    fn selects(&self, in_a: bool, in_b: bool) -> bool {
        match self {
            OverlayOp::Difference => in_a && !in_b,
            OverlayOp::Intersection => in_a && in_b,
            OverlayOp::SymDifference => in_a != in_b,
            OverlayOp::Union => in_a || in_b,
        }
    }

    /// Dimension of the EMPTY value returned when nothing is selected.
    fn empty_dimension(&self, a: &Geometry, b: &Geometry) -> Dimension {
        match self {
            OverlayOp::Difference => a.dimension(),
            OverlayOp::Intersection => a.dimension().min(b.dimension()),
            OverlayOp::SymDifference | OverlayOp::Union => a.dimension().max(b.dimension()),
        }
    }

    fn combine_areas(&self, a: &geo::MultiPolygon, b: &geo::MultiPolygon) -> geo::MultiPolygon {
        match self {
            OverlayOp::Difference => a.difference(b),
            OverlayOp::Intersection => a.intersection(b),
            OverlayOp::SymDifference => a.xor(b),
            OverlayOp::Union => a.union(b),
        }
    }
}

/// Point-set operations between two geometries.
///
/// ```
/// use sfgeom::algorithm::{Overlay, Relate};
/// use sfgeom::io::wkt::from_wkt;
///
/// let left = from_wkt("POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))").unwrap();
/// let right = from_wkt("POLYGON ((1 0, 1 1, 2 1, 2 0, 1 0))").unwrap();
///
/// let union = left.union(&right).unwrap();
/// let expected = from_wkt("POLYGON ((0 0, 0 1, 1 1, 2 1, 2 0, 1 0, 0 0))").unwrap();
/// assert!(union.equals(&expected).unwrap());
/// ```
pub trait Overlay {
    fn difference(&self, other: &Geometry) -> Result<Geometry>;
    fn intersection(&self, other: &Geometry) -> Result<Geometry>;
    fn sym_difference(&self, other: &Geometry) -> Result<Geometry>;
    fn union(&self, other: &Geometry) -> Result<Geometry>;
}

impl Overlay for Geometry {
    fn difference(&self, other: &Geometry) -> Result<Geometry> {
        overlay(self, other, OverlayOp::Difference)
    }

    fn intersection(&self, other: &Geometry) -> Result<Geometry> {
        overlay(self, other, OverlayOp::Intersection)
    }

    fn sym_difference(&self, other: &Geometry) -> Result<Geometry> {
        overlay(self, other, OverlayOp::SymDifference)
    }

    fn union(&self, other: &Geometry) -> Result<Geometry> {
        overlay(self, other, OverlayOp::Union)
    }
}

#[derive(Default)]
struct NodeInfo {
    coord: geo::Coord,
    is_input_point: [bool; 2],
    edges: Vec<usize>,
}

/// Compute `a <op> b`.
pub fn overlay(a: &Geometry, b: &Geometry, op: OverlayOp) -> Result<Geometry> {
    let operation = Operation::Overlay(op);
    check_overlay_input(a, 0, operation)?;
    check_overlay_input(b, 1, operation)?;

    let inputs = [Input::new(a), Input::new(b)];
    let snapper = VertexSnapper::new(inputs.iter().flat_map(|input| &input.area));
    let area = snapper.snap_multi_polygon(&op.combine_areas(&inputs[0].area, &inputs[1].area));

    let mut segments = inputs[0].segments(0);
    segments.extend(inputs[1].segments(1));
    let points: Vec<geo::Coord> = inputs
        .iter()
        .flat_map(|input| input.points.iter().copied())
        .collect();
    let edges = node(&segments, &points);
    log::trace!(
        "{}: {} segments noded into {} edges",
        op.name(),
        segments.len(),
        edges.len()
    );

    let mut nodes: IndexMap<Key, NodeInfo> = IndexMap::new();
    for (i, input) in inputs.iter().enumerate() {
        for point in &input.points {
            let node = nodes.entry(key(*point)).or_default();
            node.coord = *point;
            node.is_input_point[i] = true;
        }
    }

    let mut kept_edges = vec![];
    let mut line_edges = vec![false; edges.len()];
    let mut area_edges = vec![false; edges.len()];
    for (i, edge) in edges.iter().enumerate() {
        let label = label_edge(edge, &inputs);
        let borders_area = op.selects(label.left[0], label.left[1])
            || op.selects(label.right[0], label.right[1]);
        area_edges[i] = borders_area;
        if op.selects(label.on[0], label.on[1]) && !borders_area {
            line_edges[i] = true;
            kept_edges.push((edge.start, edge.end));
        }
        for end in [edge.start, edge.end] {
            let node = nodes.entry(key(end)).or_default();
            node.coord = end;
            node.edges.push(i);
        }
    }

    let mut points = vec![];
    for node in nodes.values() {
        let covered = if node.edges.is_empty() {
            area.coordinate_position(&node.coord) != CoordPos::Outside
        } else {
            node.edges
                .iter()
                .any(|edge| line_edges[*edge] || area_edges[*edge])
        };
        if covered {
            continue;
        }
        let mut inside = [false; 2];
        for (i, input) in inputs.iter().enumerate() {
            inside[i] = node.is_input_point[i]
                || node
                    .edges
                    .iter()
                    .any(|edge| edges[*edge].origins[i].is_set())
                || input.locate(&node.coord) != CoordPos::Outside;
        }
        if op.selects(inside[0], inside[1]) {
            points.push(Point::try_new(crate::geometry::Coord::new(
                node.coord.x,
                node.coord.y,
            ))?);
        }
    }

    let polygons = multi_polygon_from_geo(&area)?.polygons().to_vec();
    let lines = merge_lines(&kept_edges)?;
    Ok(assemble(polygons, lines, points, op.empty_dimension(a, b)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::Relate;
    use crate::io::wkt::{from_wkt, to_wkt};
    use crate::test::relation::INVALID_MULTIPOLYGON;

    fn geom(wkt: &str) -> Geometry {
        from_wkt(wkt).unwrap()
    }

    #[track_caller]
    fn check(op: OverlayOp, a: &str, b: &str, expected: &str) {
        let result = overlay(&geom(a), &geom(b), op).unwrap();
        let expected = geom(expected);
        assert!(
            result.equals(&expected).unwrap(),
            "{a} {} {b}: expected {expected}, got {result}",
            op.name()
        );
    }

    #[test]
    fn difference() {
        use OverlayOp::Difference;
        check(
            Difference,
            "MULTIPOINT (50 100, 50 200)",
            "POINT (50 100)",
            "POINT (50 200)",
        );
        check(
            Difference,
            "LINESTRING (50 100, 50 200)",
            "LINESTRING (50 50, 50 150)",
            "LINESTRING (50 150, 50 200)",
        );
        check(
            Difference,
            "MULTILINESTRING ((1 1, 5 1), (2 4, 4 4))",
            "MULTILINESTRING ((2 1, 4 1), (3 3, 7 3))",
            "MULTILINESTRING ((1 1, 2 1), (4 1, 5 1), (2 4, 4 4))",
        );
        check(
            Difference,
            "POLYGON ((1 1, 1 4, 4 4, 4 1, 1 1))",
            "POLYGON ((2 2, 2 5, 5 5, 5 2, 2 2))",
            "POLYGON ((1 4, 2 4, 2 2, 4 2, 4 1, 1 1, 1 4))",
        );
        check(
            Difference,
            "MULTIPOLYGON (((1 1, 1 3, 3 3, 3 1, 1 1)), ((0 0, 0 1, 1 1, 1 0, 0 0)))",
            "POLYGON ((0 1, 3 1, 3 3, 0 3, 0 1))",
            "POLYGON ((0 1, 1 1, 1 0, 0 0, 0 1))",
        );
    }

    #[test]
    fn intersection() {
        use OverlayOp::Intersection;
        check(Intersection, "POINT (50 100)", "POINT (150 150)", "POINT EMPTY");
        check(
            Intersection,
            "MULTIPOINT (50 100, 50 200)",
            "POINT (50 100)",
            "POINT (50 100)",
        );
        check(
            Intersection,
            "LINESTRING (50 100, 50 200)",
            "LINESTRING (20 150, 100 150)",
            "POINT (50 150)",
        );
        check(
            Intersection,
            "MULTILINESTRING ((1 1, 5 1), (2 4, 4 4))",
            "MULTILINESTRING ((3 4, 6 4), (5 0, 5 4))",
            "GEOMETRYCOLLECTION (LINESTRING (3 4, 4 4), POINT (5 1))",
        );
        check(
            Intersection,
            "POLYGON ((1 1, 1 3, 3 3, 3 1, 1 1))",
            "POLYGON ((4 4, 4 5, 5 5, 5 4, 4 4))",
            "POLYGON EMPTY",
        );
        check(
            Intersection,
            "MULTIPOLYGON (((1 1, 1 3, 3 3, 3 1, 1 1)), ((0 0, 0 1, 1 1, 1 0, 0 0)))",
            "POLYGON ((0 1, 3 1, 3 3, 0 3, 0 1))",
            "GEOMETRYCOLLECTION (POLYGON ((1 3, 3 3, 3 1, 1 1, 1 3)), LINESTRING (0 1, 1 1))",
        );
        check(
            Intersection,
            "POLYGON ((1 1, 1 4, 4 4, 4 1, 1 1))",
            "LINESTRING (2 0, 2 3)",
            "LINESTRING (2 1, 2 3)",
        );
        check(
            Intersection,
            "POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))",
            "LINESTRING (0 0, 1 -1, 1 2)",
            "GEOMETRYCOLLECTION (LINESTRING (1 1, 1 0), POINT (0 0))",
        );
    }

    #[test]
    fn sym_difference() {
        use OverlayOp::SymDifference;
        check(
            SymDifference,
            "POINT (50 100)",
            "POINT (50 150)",
            "MULTIPOINT (50 100, 50 150)",
        );
        check(
            SymDifference,
            "MULTIPOINT (50 100, 60 200)",
            "MULTIPOINT (60 200, 70 150)",
            "MULTIPOINT (50 100, 70 150)",
        );
        check(
            SymDifference,
            "LINESTRING (50 100, 50 200)",
            "LINESTRING (50 50, 50 150)",
            "MULTILINESTRING ((50 150, 50 200), (50 50, 50 100))",
        );
        check(
            SymDifference,
            "MULTILINESTRING ((1 1, 5 1), (2 4, 4 4))",
            "MULTILINESTRING ((3 4, 6 4), (5 0, 5 4))",
            "MULTILINESTRING ((1 1, 5 1), (2 4, 3 4), (4 4, 5 4), (5 4, 6 4), (5 0, 5 1), \
             (5 1, 5 4))",
        );
        check(
            SymDifference,
            "POLYGON ((1 1, 1 4, 4 4, 4 1, 1 1))",
            "POLYGON ((2 2, 2 5, 5 5, 5 2, 2 2))",
            "MULTIPOLYGON (((1 4, 2 4, 2 2, 4 2, 4 1, 1 1, 1 4)), \
             ((4 2, 4 4, 2 4, 2 5, 5 5, 5 2, 4 2)))",
        );
        check(
            SymDifference,
            "MULTIPOLYGON (((0 0, 0 2, 2 2, 2 0, 0 0)), ((2 2, 2 4, 4 4, 4 2, 2 2)))",
            "POLYGON ((0 0, 0 3, 3 3, 3 0, 0 0))",
            "MULTIPOLYGON (((0 2, 0 3, 2 3, 2 2, 0 2)), ((2 2, 3 2, 3 0, 2 0, 2 2)), \
             ((2 4, 4 4, 4 2, 3 2, 3 3, 2 3, 2 4)))",
        );
    }

    const SIMPLE_WKT: [&str; 7] = [
        "POINT (1 2)",
        "MULTIPOINT (1 2, 3 4)",
        "LINESTRING (0 0, 2 2, 4 4)",
        "MULTILINESTRING ((0 0, 2 2, 4 4), (5 5, 7 7, 9 9))",
        "POLYGON ((0 1, 1 1, 1 0, 0 0, 0 1))",
        "MULTIPOLYGON (((1 1, 1 3, 3 3, 3 1, 1 1)), ((2 4, 2 6, 6 6, 6 4, 2 4)))",
        "GEOMETRYCOLLECTION (LINESTRING (0 5, 5 5), POLYGON ((1 1, 1 3, 3 3, 3 1, 1 1)))",
    ];

    #[test]
    fn union_with_empty() {
        let empties = [
            "POINT EMPTY",
            "MULTIPOINT EMPTY",
            "LINESTRING EMPTY",
            "MULTILINESTRING EMPTY",
            "POLYGON EMPTY",
            "MULTIPOLYGON EMPTY",
            "GEOMETRYCOLLECTION EMPTY",
        ];
        for empty in empties {
            for wkt in SIMPLE_WKT {
                let result = geom(empty).union(&geom(wkt)).unwrap();
                assert!(result.equals(&geom(wkt)).unwrap(), "{empty} {wkt}: {result}");
            }
        }
    }

    #[test]
    fn union_with_self() {
        for wkt in SIMPLE_WKT {
            let result = geom(wkt).union(&geom(wkt)).unwrap();
            assert!(result.equals(&geom(wkt)).unwrap(), "{wkt}: {result}");
        }
    }

    #[test]
    fn union() {
        use OverlayOp::Union;
        check(
            Union,
            "LINESTRING (0 1, 1 2)",
            "LINESTRING (1 2, 3 4)",
            "LINESTRING (0 1, 1 2, 3 4)",
        );
        check(
            Union,
            "POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))",
            "POLYGON ((1 0, 1 1, 2 1, 2 0, 1 0))",
            "POLYGON ((0 0, 0 1, 1 1, 2 1, 2 0, 1 0, 0 0))",
        );
        check(
            Union,
            "GEOMETRYCOLLECTION (POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0)), POINT (1 2))",
            "GEOMETRYCOLLECTION (POLYGON ((1 0, 2 0, 2 1, 1 1, 1 0)), MULTIPOINT ((1 2), (3 4)))",
            "GEOMETRYCOLLECTION (POLYGON ((0 0, 0 1, 1 1, 2 1, 2 0, 1 0, 0 0)), POINT (1 2), \
             POINT (3 4))",
        );
        check(
            Union,
            "LINESTRING (20 20, 30 30)",
            "LINESTRING (25 25, 27 27)",
            "LINESTRING (20 20, 25 25, 27 27, 30 30)",
        );
        check(
            Union,
            "LINESTRING (1 1, 3 1)",
            "LINESTRING (2 1, 4 1)",
            "LINESTRING (1 1, 2 1, 3 1, 4 1)",
        );
        check(
            Union,
            "GEOMETRYCOLLECTION (POLYGON ((1 1, 3 1, 3 3, 1 3, 1 1)), LINESTRING (1 1, 3 1))",
            "GEOMETRYCOLLECTION (POLYGON ((2 2, 4 2, 4 4, 2 4, 2 2)), LINESTRING (2 1, 4 1))",
            "GEOMETRYCOLLECTION (POLYGON ((1 1, 1 3, 2 3, 2 4, 4 4, 4 2, 3 2, 3 1, 2 1, 1 1)), \
             LINESTRING (3 1, 4 1))",
        );
    }

    fn vertices(geom: &Geometry) -> Vec<crate::geometry::Coord> {
        let polygons = match geom {
            Geometry::Polygon(polygon) => vec![polygon.clone()],
            Geometry::MultiPolygon(multi_polygon) => multi_polygon.polygons().to_vec(),
            _ => panic!("expected a polygonal result, got {geom}"),
        };
        polygons
            .iter()
            .flat_map(|polygon| polygon.rings())
            .flat_map(|ring| ring.coords().to_vec())
            .collect()
    }

    #[track_caller]
    fn check_exact(op: OverlayOp, a: &str, b: &str, expected: &str, xs: &[f64], ys: &[f64]) {
        check(op, a, b, expected);
        let result = overlay(&geom(a), &geom(b), op).unwrap();
        for coord in vertices(&result) {
            assert!(
                xs.contains(&coord.x) && ys.contains(&coord.y),
                "{result} has a vertex outside the inputs: {coord:?}"
            );
        }
    }

    #[test]
    fn fractional_coordinates() {
        let square = "POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))";
        let inner = "POLYGON ((0.1 0.1, 0.1 0.3, 0.3 0.3, 0.3 0.1, 0.1 0.1))";
        check_exact(OverlayOp::Intersection, square, inner, inner, &[0.1, 0.3], &[0.1, 0.3]);
        check_exact(
            OverlayOp::Union,
            square,
            "POLYGON ((1 0, 1 1, 2.3 1, 2.3 0, 1 0))",
            "POLYGON ((0 0, 0 1, 2.3 1, 2.3 0, 0 0))",
            &[0., 1., 2.3],
            &[0., 1.],
        );
        check_exact(
            OverlayOp::Difference,
            square,
            "POLYGON ((0.5 0.25, 0.5 0.75, 1.5 0.75, 1.5 0.25, 0.5 0.25))",
            "POLYGON ((0 0, 0 1, 1 1, 1 0.75, 0.5 0.75, 0.5 0.25, 1 0.25, 1 0, 0 0))",
            &[0., 0.5, 1.],
            &[0., 0.25, 0.75, 1.],
        );
        check_exact(
            OverlayOp::SymDifference,
            "POLYGON ((0.125 0.125, 0.125 0.625, 0.625 0.625, 0.625 0.125, 0.125 0.125))",
            "POLYGON ((0.375 0.375, 0.375 0.875, 0.875 0.875, 0.875 0.375, 0.375 0.375))",
            "MULTIPOLYGON (((0.125 0.125, 0.125 0.625, 0.375 0.625, 0.375 0.375, 0.625 0.375, \
             0.625 0.125, 0.125 0.125)), ((0.625 0.375, 0.625 0.625, 0.375 0.625, 0.375 0.875, \
             0.875 0.875, 0.875 0.375, 0.625 0.375)))",
            &[0.125, 0.375, 0.625, 0.875],
            &[0.125, 0.375, 0.625, 0.875],
        );

        let intersection = geom(square).intersection(&geom(inner)).unwrap();
        assert!(geom(inner).within(&geom(square)).unwrap());
        assert!(intersection.equals(&geom(inner)).unwrap());
    }

    #[test]
    fn points_covered_by_higher_dimensions() {
        use OverlayOp::Union;
        check(
            Union,
            "LINESTRING (20 20, 30 30)",
            "POINT (25 25)",
            "LINESTRING (20 20, 30 30)",
        );
        check(
            Union,
            "POLYGON ((0 0, 0 4, 4 4, 4 0, 0 0))",
            "MULTIPOINT (4 4, 2 2, 9 9)",
            "GEOMETRYCOLLECTION (POLYGON ((0 0, 0 4, 4 4, 4 0, 0 0)), POINT (9 9))",
        );
    }

    #[test]
    fn empty_result_dimension() {
        let intersect = |a: &str, b: &str| to_wkt(&geom(a).intersection(&geom(b)).unwrap());
        assert_eq!(intersect("POINT (0 0)", "POLYGON EMPTY"), "POINT EMPTY");
        assert_eq!(
            intersect("LINESTRING (0 0, 1 1)", "LINESTRING (5 5, 6 6)"),
            "LINESTRING EMPTY"
        );
        assert_eq!(
            intersect("GEOMETRYCOLLECTION EMPTY", "GEOMETRYCOLLECTION EMPTY"),
            "GEOMETRYCOLLECTION EMPTY"
        );
        assert_eq!(
            to_wkt(
                &geom("POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))")
                    .difference(&geom("POLYGON ((0 0, 0 2, 2 2, 2 0, 0 0))"))
                    .unwrap()
            ),
            "POLYGON EMPTY"
        );
    }

    #[test]
    fn topology_errors() {
        let line = geom("LINESTRING (0 0, 1 1, 1 0, 0 1)");
        let invalid = geom(INVALID_MULTIPOLYGON);
        for op in OverlayOp::ALL {
            let err = overlay(&line, &invalid, op).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!(
                    "Failed to compute geometry {}: TopologyException: Input geom 1 is invalid: \
                     Self-intersection at 1 2",
                    op.name()
                )
            );
        }
        let err = overlay(&invalid, &line, OverlayOp::Union).unwrap_err();
        assert!(err.to_string().contains("Input geom 0 is invalid"));
    }
}
