// Point location — which triangle contains a given position?
//
// The canonical query is a linear scan with a signed-area containment
// test, first match wins. Triangles share edges, so a point exactly on a
// shared edge is inside both; it resolves to whichever triangle comes
// first in list order. That tie-break is deterministic with respect to
// the list and accepted as-is — do not "fix" it by perturbing geometry.
//
// `None` is the normal answer for a point outside the lattice's physical
// extent. Movement logic treats it as "agent off the playable lattice",
// never as an error.
//
// `TriangleIndex` is a spatial bucket over the same triangle list for
// lattices large enough that the O(2·width·height) scan per query hurts.
// It must agree with the linear scan on every probe, tie-breaks included,
// which is why buckets keep triangle indices in ascending list order.

use crate::types::{LatticePos, Triangle};
use rustc_hash::FxHashMap;

/// Signed area cross product: `(a.x−c.x)(b.z−c.z) − (b.x−c.x)(a.z−c.z)`.
fn cross(a: LatticePos, b: LatticePos, c: LatticePos) -> f64 {
    (a.x - c.x) * (b.z - c.z) - (b.x - c.x) * (a.z - c.z)
}

/// Edge-inclusive point-in-triangle test on the x/z plane.
///
/// The point is inside iff the three signed areas do not mix strict signs;
/// a zero means "on an edge" and counts as inside.
pub fn triangle_contains(triangle: &Triangle, x: f64, z: f64) -> bool {
    let p = LatticePos::new(x, z);
    let [v0, v1, v2] = &triangle.vertices;
    let d1 = cross(p, v0.pos, v1.pos);
    let d2 = cross(p, v1.pos, v2.pos);
    let d3 = cross(p, v2.pos, v0.pos);

    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}

/// Linear scan over the triangle list, first match wins.
pub fn find_triangle_at(x: f64, z: f64, triangles: &[Triangle]) -> Option<&Triangle> {
    triangles.iter().find(|t| triangle_contains(t, x, z))
}

// ---------------------------------------------------------------------------
// Spatial bucket index
// ---------------------------------------------------------------------------

/// Buckets triangle indices by quantized `(x, z)` cell.
///
/// Each triangle is registered in every bucket its bounding box overlaps,
/// in ascending list order, so a bucket lookup walks candidates in the
/// same order the linear scan would.
#[derive(Clone, Debug)]
pub struct TriangleIndex {
    buckets: FxHashMap<(i64, i64), Vec<u32>>,
    cell_size: f64,
}

impl TriangleIndex {
    /// Build the index. `cell_size` should be on the order of the triangle
    /// size; smaller cells mean more buckets but shorter candidate lists.
    pub fn build(triangles: &[Triangle], cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "bucket cell size must be positive");
        let mut buckets: FxHashMap<(i64, i64), Vec<u32>> = FxHashMap::default();
        for (i, triangle) in triangles.iter().enumerate() {
            let xs = triangle.vertices.iter().map(|v| v.pos.x);
            let zs = triangle.vertices.iter().map(|v| v.pos.z);
            let min_x = xs.clone().fold(f64::INFINITY, f64::min);
            let max_x = xs.fold(f64::NEG_INFINITY, f64::max);
            let min_z = zs.clone().fold(f64::INFINITY, f64::min);
            let max_z = zs.fold(f64::NEG_INFINITY, f64::max);

            let lo_x = (min_x / cell_size).floor() as i64;
            let hi_x = (max_x / cell_size).floor() as i64;
            let lo_z = (min_z / cell_size).floor() as i64;
            let hi_z = (max_z / cell_size).floor() as i64;
            for bx in lo_x..=hi_x {
                for bz in lo_z..=hi_z {
                    buckets.entry((bx, bz)).or_default().push(i as u32);
                }
            }
        }
        Self { buckets, cell_size }
    }

    fn bucket_of(&self, x: f64, z: f64) -> (i64, i64) {
        (
            (x / self.cell_size).floor() as i64,
            (z / self.cell_size).floor() as i64,
        )
    }

    /// Bucket-accelerated lookup. `triangles` must be the same list the
    /// index was built from.
    pub fn find_triangle_at<'a>(
        &self,
        x: f64,
        z: f64,
        triangles: &'a [Triangle],
    ) -> Option<&'a Triangle> {
        let candidates = self.buckets.get(&self.bucket_of(x, z))?;
        candidates
            .iter()
            .map(|&i| &triangles[i as usize])
            .find(|t| triangle_contains(t, x, z))
    }
}
