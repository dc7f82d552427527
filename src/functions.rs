//! SQL-style scalar functions.
//!
//! Every function propagates nulls: a `None` argument gives a `None` result and never an error.
//! Errors are reserved for malformed input and topology failures.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::algorithm::{overlay, Area, OverlayOp, Predicate, Relate};
use crate::error::Result;
use crate::geometry::Geometry;
use crate::io::{wkb, wkt};

/// Names under which the functions of this module are registered.
pub const FUNCTION_NAMES: [&str; 18] = [
    "ST_GeometryFromText",
    "ST_GeomFromBinary",
    "ST_AsText",
    "ST_AsBinary",
    "ST_Area",
    "ST_Relate",
    "ST_Contains",
    "ST_Crosses",
    "ST_Disjoint",
    "ST_Equals",
    "ST_Intersects",
    "ST_Overlaps",
    "ST_Touches",
    "ST_Within",
    "ST_Difference",
    "ST_Intersection",
    "ST_SymDifference",
    "ST_Union",
];

pub fn st_geometry_from_text(text: Option<&str>) -> Result<Option<Geometry>> {
    text.map(wkt::from_wkt).transpose()
}

pub fn st_geom_from_binary(buf: Option<&[u8]>) -> Result<Option<Geometry>> {
    buf.map(wkb::from_wkb).transpose()
}

pub fn st_as_text(geom: Option<&Geometry>) -> Option<String> {
    geom.map(wkt::to_wkt)
}

/// Little-endian WKB.
pub fn st_as_binary(geom: Option<&Geometry>) -> Result<Option<Vec<u8>>> {
    geom.map(wkb::to_wkb).transpose()
}

pub fn st_area(geom: Option<&Geometry>) -> Option<f64> {
    geom.map(Area::unsigned_area)
}

/// Whether the DE-9IM matrix of `a` against `b` matches `pattern`.
pub fn st_relate(
    a: Option<&Geometry>,
    b: Option<&Geometry>,
    pattern: Option<&str>,
) -> Result<Option<bool>> {
    match (a, b, pattern) {
        (Some(a), Some(b), Some(pattern)) => a.relate_pattern(b, pattern).map(Some),
        _ => Ok(None),
    }
}

fn predicate(
    predicate: Predicate,
    a: Option<&Geometry>,
    b: Option<&Geometry>,
) -> Result<Option<bool>> {
    match (a, b) {
        (Some(a), Some(b)) => predicate.evaluate(a, b).map(Some),
        _ => Ok(None),
    }
}

macro_rules! predicate_fn {
    ($name:ident, $predicate:ident) => {
        pub fn $name(a: Option<&Geometry>, b: Option<&Geometry>) -> Result<Option<bool>> {
            predicate(Predicate::$predicate, a, b)
        }
    };
}

predicate_fn!(st_contains, Contains);
predicate_fn!(st_crosses, Crosses);
predicate_fn!(st_disjoint, Disjoint);
predicate_fn!(st_equals, Equals);
predicate_fn!(st_intersects, Intersects);
predicate_fn!(st_overlaps, Overlaps);
predicate_fn!(st_touches, Touches);
predicate_fn!(st_within, Within);

fn overlay_op(
    op: OverlayOp,
    a: Option<&Geometry>,
    b: Option<&Geometry>,
) -> Result<Option<Geometry>> {
    match (a, b) {
        (Some(a), Some(b)) => overlay::overlay(a, b, op).map(Some),
        _ => Ok(None),
    }
}

macro_rules! overlay_fn {
    ($name:ident, $op:ident) => {
        pub fn $name(a: Option<&Geometry>, b: Option<&Geometry>) -> Result<Option<Geometry>> {
            overlay_op(OverlayOp::$op, a, b)
        }
    };
}

overlay_fn!(st_difference, Difference);
overlay_fn!(st_intersection, Intersection);
overlay_fn!(st_sym_difference, SymDifference);
overlay_fn!(st_union, Union);

/// Evaluate a predicate row by row over two columns of equal length.
///
/// The first failing row aborts the batch.
pub fn evaluate_predicate(
    predicate: Predicate,
    left: &[Option<Geometry>],
    right: &[Option<Geometry>],
) -> Result<Vec<Option<bool>>> {
    let map_op = |(a, b): (&Option<Geometry>, &Option<Geometry>)| {
        self::predicate(predicate, a.as_ref(), b.as_ref())
    };

    #[cfg(feature = "rayon")]
    {
        left.par_iter().zip(right.par_iter()).map(map_op).collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        left.iter().zip(right.iter()).map(map_op).collect()
    }
}

/// Evaluate an overlay row by row over two columns of equal length.
pub fn evaluate_overlay(
    op: OverlayOp,
    left: &[Option<Geometry>],
    right: &[Option<Geometry>],
) -> Result<Vec<Option<Geometry>>> {
    let map_op = |(a, b): (&Option<Geometry>, &Option<Geometry>)| {
        overlay_op(op, a.as_ref(), b.as_ref())
    };

    #[cfg(feature = "rayon")]
    {
        left.par_iter().zip(right.par_iter()).map(map_op).collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        left.iter().zip(right.iter()).map(map_op).collect()
    }
}

pub fn evaluate_area(column: &[Option<Geometry>]) -> Vec<Option<f64>> {
    let map_op = |geom: &Option<Geometry>| st_area(geom.as_ref());

    #[cfg(feature = "rayon")]
    {
        let mut output_vec = Vec::with_capacity(column.len());
        column.par_iter().map(map_op).collect_into_vec(&mut output_vec);
        output_vec
    }

    #[cfg(not(feature = "rayon"))]
    {
        column.iter().map(map_op).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoError;

    fn geom(wkt: &str) -> Option<Geometry> {
        st_geometry_from_text(Some(wkt)).unwrap()
    }

    #[test]
    fn text_round_trip() {
        let point = geom("POINT (1 2)");
        assert_eq!(st_as_text(point.as_ref()).as_deref(), Some("POINT (1 2)"));
        assert_eq!(st_geometry_from_text(None).unwrap(), None);
        assert_eq!(st_as_text(None), None);
    }

    #[test]
    fn binary_round_trip() {
        let point = geom("POINT (1 2)");
        let wkb = st_as_binary(point.as_ref()).unwrap().unwrap();
        assert_eq!(
            hex::encode_upper(&wkb),
            "0101000000000000000000F03F0000000000000040"
        );
        assert_eq!(st_geom_from_binary(Some(wkb.as_slice())).unwrap(), point);
        assert_eq!(st_geom_from_binary(None).unwrap(), None);
        assert_eq!(st_as_binary(None).unwrap(), None);
    }

    #[test]
    fn malformed_input() {
        let err = st_geometry_from_text(Some("LINESTRING (1 1)")).unwrap_err();
        assert!(matches!(err, GeoError::InvalidGeometry(_)), "{err}");

        let err = st_geom_from_binary(Some(&[0x01, 0x01][..])).unwrap_err();
        assert!(matches!(err, GeoError::MalformedInput(_)), "{err}");
        assert!(err.to_string().contains("Unexpected EOF"), "{err}");
    }

    #[test]
    fn scenarios() {
        assert_eq!(
            st_contains(
                geom("POLYGON ((0 0, 0 4, 4 4, 4 0, 0 0))").as_ref(),
                geom("POLYGON ((1 1, 1 2, 2 2, 2 1, 1 1))").as_ref()
            )
            .unwrap(),
            Some(true)
        );
        let union = st_union(
            geom("POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))").as_ref(),
            geom("POLYGON ((1 0, 2 0, 2 1, 1 1, 1 0))").as_ref(),
        )
        .unwrap();
        assert_eq!(
            st_equals(
                union.as_ref(),
                geom("POLYGON ((0 0, 0 1, 1 1, 2 1, 2 0, 1 0, 0 0))").as_ref()
            )
            .unwrap(),
            Some(true)
        );
        assert_eq!(
            st_area(geom("POLYGON ((2 2, 2 6, 6 6, 6 2, 2 2))").as_ref()),
            Some(16.0)
        );
        assert_eq!(
            st_relate(
                geom("LINESTRING (0 0, 2 2)").as_ref(),
                geom("LINESTRING (0 2, 2 0)").as_ref(),
                Some("0********")
            )
            .unwrap(),
            Some(true)
        );
    }

    type PredicateFn = fn(Option<&Geometry>, Option<&Geometry>) -> Result<Option<bool>>;

    fn check(f: PredicateFn, a: &str, b: &str) -> bool {
        f(geom(a).as_ref(), geom(b).as_ref()).unwrap().unwrap()
    }

    #[test]
    fn literal_relations() {
        assert!(check(st_contains, "MULTIPOINT (20 20, 25 25)", "POINT (25 25)"));
        assert!(check(st_contains, "LINESTRING (20 20, 30 30)", "POINT (25 25)"));
        assert!(!check(
            st_contains,
            "LINESTRING (20 20, 30 30)",
            "MULTIPOINT (25 25, 31 31)"
        ));
        assert!(check(
            st_contains,
            "LINESTRING (20 20, 30 30)",
            "LINESTRING (25 25, 27 27)"
        ));
        assert!(!check(
            st_contains,
            "MULTILINESTRING ((1 1, 5 1), (2 4, 4 4))",
            "MULTILINESTRING ((3 4, 4 4), (2 1, 6 1))"
        ));
        assert!(!check(
            st_contains,
            "POLYGON ((0 0, 0 4, 4 4, 4 0, 0 0))",
            "POLYGON ((-1 -1, -1 2, 2 2, 2 -1, -1 -1))"
        ));
        assert!(check(
            st_contains,
            "MULTIPOLYGON (((0 0, 0 2, 2 2, 2 0, 0 0)), ((2 2, 2 4, 4 4, 4 2, 2 2)))",
            "POLYGON ((2 2, 2 3, 3 3, 3 2, 2 2))"
        ));
        assert!(!check(
            st_contains,
            "LINESTRING EMPTY",
            "POLYGON ((0 0, 0 4, 4 4, 4 0, 0 0))"
        ));
        assert!(!check(st_contains, "LINESTRING (20 20, 30 30)", "POLYGON EMPTY"));

        assert!(!check(st_crosses, "POINT (20 20)", "POINT (25 25)"));
        assert!(!check(st_crosses, "LINESTRING (20 20, 30 30)", "POINT (25 25)"));
        assert!(check(
            st_crosses,
            "LINESTRING (20 20, 30 30)",
            "MULTIPOINT (25 25, 31 31)"
        ));
        assert!(check(st_crosses, "LINESTRING(0 0, 1 1)", "LINESTRING (1 0, 0 1)"));
        assert!(!check(
            st_crosses,
            "POLYGON ((1 1, 1 4, 4 4, 4 1, 1 1))",
            "POLYGON ((2 2, 2 5, 5 5, 5 2, 2 2))"
        ));
    }

    #[test]
    fn nulls_propagate() {
        let point = geom("POINT (1 2)");
        for predicate in Predicate::ALL {
            assert_eq!(self::predicate(predicate, None, point.as_ref()).unwrap(), None);
            assert_eq!(self::predicate(predicate, point.as_ref(), None).unwrap(), None);
        }
        for op in OverlayOp::ALL {
            assert_eq!(overlay_op(op, None, point.as_ref()).unwrap(), None);
            assert_eq!(overlay_op(op, point.as_ref(), None).unwrap(), None);
        }
        assert_eq!(st_area(None), None);
        assert_eq!(st_relate(point.as_ref(), point.as_ref(), None).unwrap(), None);
        // A null argument wins over one that would fail.
        let invalid = geom(crate::test::relation::INVALID_MULTIPOLYGON);
        assert_eq!(st_touches(invalid.as_ref(), None).unwrap(), None);
    }

    #[test]
    fn batches() {
        let left = vec![
            geom("POLYGON ((0 0, 0 4, 4 4, 4 0, 0 0))"),
            None,
            geom("POINT (9 9)"),
        ];
        let right = vec![geom("POINT (1 1)"), geom("POINT (1 1)"), geom("POINT (1 1)")];

        assert_eq!(
            evaluate_predicate(Predicate::Contains, &left, &right).unwrap(),
            vec![Some(true), None, Some(false)]
        );
        assert_eq!(evaluate_area(&left), vec![Some(16.0), None, Some(0.0)]);
        let unions = evaluate_overlay(OverlayOp::Union, &left, &right).unwrap();
        assert_eq!(unions.len(), 3);
        assert!(unions[1].is_none());
        assert_eq!(
            st_as_text(unions[2].as_ref()).as_deref(),
            Some("MULTIPOINT (9 9, 1 1)")
        );

        let invalid = vec![geom(crate::test::relation::INVALID_MULTIPOLYGON)];
        assert!(evaluate_predicate(Predicate::Touches, &invalid, &right[..1]).is_err());
    }
}
