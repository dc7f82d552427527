//! Assembly of overlay results into model geometries.

use std::collections::HashMap;

use geo::Coord;

use super::noding::{key, Key};
use crate::error::Result;
use crate::geometry::{
    Dimension, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

fn to_model(coord: Coord) -> crate::geometry::Coord {
    crate::geometry::Coord::new(coord.x, coord.y)
}

/// Join edges into maximal lines that only break where more or fewer than two edges meet.
pub(super) fn merge_lines(edges: &[(Coord, Coord)]) -> Result<Vec<LineString>> {
    let mut incident: HashMap<Key, Vec<usize>> = HashMap::new();
    for (i, (start, end)) in edges.iter().enumerate() {
        incident.entry(key(*start)).or_default().push(i);
        incident.entry(key(*end)).or_default().push(i);
    }
    let degree = |coord: Coord| incident.get(&key(coord)).map_or(0, Vec::len);

    let mut used = vec![false; edges.len()];
    let walk = |first: usize, from: Coord, used: &mut Vec<bool>| {
        let mut coords = vec![to_model(from)];
        let mut current = first;
        let mut at = from;
        loop {
            used[current] = true;
            let (start, end) = edges[current];
            at = if key(start) == key(at) { end } else { start };
            coords.push(to_model(at));
            if degree(at) != 2 {
                break;
            }
            let next = incident
                .get(&key(at))
                .and_then(|ids| ids.iter().copied().find(|id| !used[*id]));
            match next {
                Some(id) => current = id,
                None => break,
            }
        }
        coords
    };

    let mut lines = vec![];
    for (i, (start, end)) in edges.iter().enumerate() {
        if used[i] {
            continue;
        }
        let from = if degree(*start) != 2 {
            *start
        } else if degree(*end) != 2 {
            *end
        } else {
            continue;
        };
        lines.push(LineString::try_new(walk(i, from, &mut used))?);
    }
    // Whatever is left forms closed loops.
    for (i, (start, _)) in edges.iter().enumerate() {
        if !used[i] {
            lines.push(LineString::try_new(walk(i, *start, &mut used))?);
        }
    }
    Ok(lines)
}

/// The simplest geometry holding the given parts, or an EMPTY value of `empty_dimension`.
pub(super) fn assemble(
    polygons: Vec<Polygon>,
    lines: Vec<LineString>,
    points: Vec<Point>,
    empty_dimension: Dimension,
) -> Geometry {
    let kinds = [!polygons.is_empty(), !lines.is_empty(), !points.is_empty()]
        .iter()
        .filter(|present| **present)
        .count();
    match kinds {
        0 => match empty_dimension {
            Dimension::Empty => GeometryCollection::empty().into(),
            Dimension::Zero => Point::empty().into(),
            Dimension::One => LineString::empty().into(),
            Dimension::Two => Polygon::empty().into(),
        },
        1 => {
            if !polygons.is_empty() {
                single_or_multi(polygons, MultiPolygon::new)
            } else if !lines.is_empty() {
                single_or_multi(lines, MultiLineString::new)
            } else {
                single_or_multi(points, MultiPoint::new)
            }
        }
        _ => {
            let members = polygons
                .into_iter()
                .map(Geometry::from)
                .chain(lines.into_iter().map(Geometry::from))
                .chain(points.into_iter().map(Geometry::from))
                .collect();
            GeometryCollection::new(members).into()
        }
    }
}

fn single_or_multi<T, M>(mut parts: Vec<T>, multi: impl FnOnce(Vec<T>) -> M) -> Geometry
where
    T: Into<Geometry>,
    M: Into<Geometry>,
{
    if parts.len() == 1 {
        if let Some(part) = parts.pop() {
            return part.into();
        }
    }
    multi(parts).into()
}

#[cfg(test)]
mod test {
    use geo::coord;

    use super::*;
    use crate::io::wkt::to_wkt;

    fn edge(a: (f64, f64), b: (f64, f64)) -> (Coord, Coord) {
        (Coord::from(a), Coord::from(b))
    }

    fn merged(edges: &[(Coord, Coord)]) -> Vec<String> {
        merge_lines(edges)
            .unwrap()
            .into_iter()
            .map(|line| to_wkt(&line.into()))
            .collect()
    }

    #[test]
    fn chains() {
        assert_eq!(
            merged(&[edge((1., 2.), (3., 4.)), edge((0., 1.), (1., 2.))]),
            ["LINESTRING (3 4, 1 2, 0 1)"]
        );
        // Three edges meeting at a node stay apart.
        assert_eq!(
            merged(&[
                edge((0., 0.), (1., 1.)),
                edge((1., 1.), (2., 2.)),
                edge((1., 1.), (2., 0.)),
            ])
            .len(),
            3
        );
    }

    #[test]
    fn loops() {
        let lines = merge_lines(&[
            edge((0., 0.), (1., 0.)),
            edge((1., 0.), (1., 1.)),
            edge((1., 1.), (0., 0.)),
        ])
        .unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_closed());
        assert_eq!(lines[0].num_coords(), 4);
        assert_eq!(lines[0].coords()[0], to_model(coord! { x: 0., y: 0. }));
    }

    #[test]
    fn simplest_type() {
        let point = || Point::try_new((1., 2.).into()).unwrap();
        assert_eq!(
            to_wkt(&assemble(vec![], vec![], vec![point()], Dimension::Zero)),
            "POINT (1 2)"
        );
        assert_eq!(
            to_wkt(&assemble(vec![], vec![], vec![point(), point()], Dimension::Zero)),
            "MULTIPOINT (1 2, 1 2)"
        );
        assert_eq!(
            to_wkt(&assemble(vec![], vec![], vec![], Dimension::Two)),
            "POLYGON EMPTY"
        );
        assert_eq!(
            to_wkt(&assemble(vec![], vec![], vec![], Dimension::Empty)),
            "GEOMETRYCOLLECTION EMPTY"
        );
        let line = LineString::try_new(vec![(0., 0.).into(), (1., 1.).into()]).unwrap();
        assert_eq!(
            to_wkt(&assemble(vec![], vec![line], vec![point()], Dimension::One)),
            "GEOMETRYCOLLECTION (LINESTRING (0 0, 1 1), POINT (1 2))"
        );
    }
}
