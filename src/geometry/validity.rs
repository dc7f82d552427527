//! Structural well-formedness rules enforced whenever a point sequence, line or ring is
//! assembled.
//!
//! These checks are purely structural. A ring that crosses itself passes here; topological
//! validity is the concern of [`crate::algorithm::topology`].

use crate::error::{GeoError, Result};
use crate::geometry::{Coord, LinearRing};

pub(crate) fn check_coord(coord: &Coord) -> Result<()> {
    if coord.is_finite() {
        Ok(())
    } else {
        Err(GeoError::InvalidGeometry(format!(
            "Coordinate values must be finite, found {} {}",
            coord.x, coord.y
        )))
    }
}

pub(crate) fn check_coords(coords: &[Coord]) -> Result<()> {
    coords.iter().try_for_each(check_coord)
}

/// A line string holds either no points or at least two.
pub(crate) fn check_line_points(coords: &[Coord]) -> Result<()> {
    if coords.len() == 1 {
        return Err(GeoError::InvalidGeometry(
            "point array must contain 0 or >1 elements".to_string(),
        ));
    }
    check_coords(coords)
}

/// A ring is either empty, or closed with at least four points.
pub(crate) fn check_ring_points(coords: &[Coord]) -> Result<()> {
    if coords.is_empty() {
        return Ok(());
    }
    if coords.first() != coords.last() {
        return Err(GeoError::InvalidGeometry(
            "Points of LinearRing do not form a closed linestring".to_string(),
        ));
    }
    if coords.len() < 4 {
        return Err(GeoError::InvalidGeometry(format!(
            "Invalid number of points in LinearRing found {} - must be 0 or >= 4",
            coords.len()
        )));
    }
    check_coords(coords)
}

pub(crate) fn check_polygon_rings(exterior: &LinearRing, interiors: &[LinearRing]) -> Result<()> {
    if exterior.is_empty() && interiors.iter().any(|ring| !ring.is_empty()) {
        return Err(GeoError::InvalidGeometry(
            "shell is empty but holes are not".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn coords(values: &[(f64, f64)]) -> Vec<Coord> {
        values.iter().copied().map(Coord::from).collect()
    }

    #[test]
    fn single_point_line() {
        let err = check_line_points(&coords(&[(1., 1.)])).unwrap_err();
        assert_eq!(err.to_string(), "point array must contain 0 or >1 elements");
        assert!(check_line_points(&[]).is_ok());
        assert!(check_line_points(&coords(&[(0., 0.), (1., 1.)])).is_ok());
    }

    #[test]
    fn ring_rules() {
        let err = check_ring_points(&coords(&[(0., 0.), (0., 0.)])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid number of points in LinearRing found 2 - must be 0 or >= 4"
        );

        let err =
            check_ring_points(&coords(&[(0., 0.), (0., 1.), (1., 1.), (1., 0.)])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Points of LinearRing do not form a closed linestring"
        );

        assert!(check_ring_points(&coords(&[(0., 0.), (0., 1.), (1., 1.), (0., 0.)])).is_ok());
    }

    #[test]
    fn non_finite() {
        let err = check_line_points(&coords(&[(0., 0.), (f64::NAN, 1.)])).unwrap_err();
        assert!(matches!(err, GeoError::InvalidGeometry(_)));
        assert!(check_coord(&Coord::new(f64::INFINITY, 0.)).is_err());
    }
}
