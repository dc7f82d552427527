//! R-tree indexes over input segments and vertices.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{unary_union, Coord, Line, LineString, MultiPolygon, Polygon};
use rstar::{RTree, RTreeObject, AABB};

/// Snapping tolerance relative to the extent of the indexed vertices.
const RELATIVE_TOLERANCE: f64 = 1e-6;

struct IndexedLine {
    index: usize,
    line: Line,
}

impl RTreeObject for IndexedLine {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let (start, end) = (self.line.start, self.line.end);
        AABB::from_corners(
            [start.x.min(end.x), start.y.min(end.y)],
            [start.x.max(end.x), start.y.max(end.y)],
        )
    }
}

/// Index pairs `(i, j)` with `i < j` whose bounding boxes intersect, in ascending order.
pub(crate) fn candidate_pairs(lines: &[Line]) -> Vec<(usize, usize)> {
    let tree = RTree::bulk_load(
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| IndexedLine { index, line: *line })
            .collect(),
    );
    let mut pairs = vec![];
    for item in tree.iter() {
        pairs.extend(
            tree.locate_in_envelope_intersecting(&item.envelope())
                .filter(|other| other.index > item.index)
                .map(|other| (item.index, other.index)),
        );
    }
    pairs.sort_unstable();
    pairs
}

fn ring_lines<'a>(polygons: impl IntoIterator<Item = &'a Polygon>) -> Vec<Line> {
    polygons
        .into_iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
        .flat_map(|ring| ring.lines())
        .filter(|line| line.start != line.end)
        .collect()
}

/// Moves coordinates back onto the exact vertices they approximate.
///
/// `geo`'s boolean operations compute on a fixed-precision grid, so their output vertices are
/// close to, but not equal to, the input vertices and boundary intersections they stand for.
pub(crate) struct VertexSnapper {
    tree: RTree<[f64; 2]>,
    tolerance: f64,
}

impl VertexSnapper {
    /// Index the ring vertices of `polygons` and every point where their boundaries meet.
    pub fn new<'a>(polygons: impl IntoIterator<Item = &'a Polygon>) -> Self {
        let lines = ring_lines(polygons);
        let mut vertices: Vec<[f64; 2]> = lines
            .iter()
            .flat_map(|line| [line.start, line.end])
            .map(|coord| [coord.x, coord.y])
            .collect();
        for (i, j) in candidate_pairs(&lines) {
            match line_intersection(lines[i], lines[j]) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    vertices.push([intersection.x, intersection.y]);
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    vertices.push([intersection.start.x, intersection.start.y]);
                    vertices.push([intersection.end.x, intersection.end.y]);
                }
                None => {}
            }
        }

        let tree = RTree::bulk_load(vertices);
        let extent = tree.root().envelope();
        let (lower, upper) = (extent.lower(), extent.upper());
        let size = (upper[0] - lower[0]).max(upper[1] - lower[1]);
        let tolerance = if size.is_finite() {
            size * RELATIVE_TOLERANCE
        } else {
            0.0
        };
        Self { tree, tolerance }
    }

    /// The nearest indexed vertex within tolerance, or `coord` itself.
    pub fn snap(&self, coord: Coord) -> Coord {
        match self.tree.nearest_neighbor(&[coord.x, coord.y]) {
            Some([x, y]) if (x - coord.x).hypot(y - coord.y) <= self.tolerance => {
                Coord { x: *x, y: *y }
            }
            _ => coord,
        }
    }

    fn snap_ring(&self, ring: &LineString) -> Option<LineString> {
        let mut coords: Vec<Coord> = ring.coords().map(|coord| self.snap(*coord)).collect();
        coords.dedup();
        (coords.len() >= 4).then(|| LineString::new(coords))
    }

    /// Snap every vertex. Rings that collapse below four points are dropped.
    pub fn snap_multi_polygon(&self, multi_polygon: &MultiPolygon) -> MultiPolygon {
        multi_polygon
            .iter()
            .filter_map(|polygon| {
                let exterior = self.snap_ring(polygon.exterior())?;
                let interiors = polygon
                    .interiors()
                    .iter()
                    .filter_map(|ring| self.snap_ring(ring))
                    .collect();
                Some(Polygon::new(exterior, interiors))
            })
            .collect()
    }
}

/// The union of `polygons`, with the exact input and intersection coordinates.
pub(crate) fn dissolve(polygons: &[Polygon]) -> MultiPolygon {
    if polygons.is_empty() {
        return MultiPolygon::new(vec![]);
    }
    VertexSnapper::new(polygons).snap_multi_polygon(&unary_union(polygons))
}
