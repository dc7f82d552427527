//! Planar Simple Features geometries: a validated geometry model, WKT and WKB codecs, DE-9IM
//! predicates, boolean overlay and area.
//!
//! ```
//! use sfgeom::algorithm::{Area, Overlay, Relate};
//! use sfgeom::io::wkt::{from_wkt, to_wkt};
//!
//! let square = from_wkt("POLYGON ((0 0, 0 4, 4 4, 4 0, 0 0))").unwrap();
//! let inner = from_wkt("POLYGON ((1 1, 1 2, 2 2, 2 1, 1 1))").unwrap();
//!
//! assert!(square.contains(&inner).unwrap());
//! assert_eq!(square.difference(&inner).unwrap().unsigned_area(), 15.0);
//! assert_eq!(to_wkt(&inner), "POLYGON ((1 1, 1 2, 2 2, 2 1, 1 1))");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use error::{GeoError, Result};
pub use geometry::Geometry;

pub mod algorithm;
pub mod error;
pub mod functions;
pub mod geometry;
pub mod io;
#[cfg(test)]
pub(crate) mod test;
