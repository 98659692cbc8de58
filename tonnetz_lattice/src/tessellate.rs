// Triangle tessellation — turns the pitch-class grid into chord regions.
//
// Each `width × height` cell of the grid yields two triangles: an upward
// (major) and a downward (minor) one. The triangle list is built once at
// startup, centered on the origin, and read-only afterwards.
//
// Vertex placement uses a **cumulative row shift**: every row is offset by
// `row · size / 2`, not by a parity flag on odd rows. The parity variant
// looks plausible on a two-row lattice and then tears the tiling apart on
// the third row — rows 0 and 2 land flush with each other instead of a
// full shift apart, so triangles overlap on one side of the seam and gap
// on the other. An earlier variant of this system shipped the parity
// formula; it is a defect, do not reintroduce it.
//
// See also: `grid.rs` for the cell data, `chord.rs` for triad derivation,
// `locate.rs` for hit-testing against the output.
//
// **Critical constraint: the centering translation runs exactly once.**
// It is applied inside `build`, so a triangle list can never be translated
// twice — rebuilding from the grid is the only way to get a fresh list,
// and that rebuild re-derives everything from scratch.

use crate::chord::{triad, triad_name};
use crate::grid::{GridCell, PitchClassGrid};
use crate::types::{LatticePos, TriadKind, Triangle, Vertex};

/// World-space position of a grid vertex. One rule for every vertex:
/// `x = col·size + row·size/2`, `z = row·size·√3/2`.
fn vertex_position(row: u32, col: u32, triangle_size: f64) -> LatticePos {
    let sqrt3_half = 3.0_f64.sqrt() / 2.0;
    LatticePos::new(
        col as f64 * triangle_size + row as f64 * triangle_size / 2.0,
        row as f64 * triangle_size * sqrt3_half,
    )
}

fn vertex_of(cell: &GridCell, triangle_size: f64) -> Vertex {
    Vertex {
        pos: vertex_position(cell.row, cell.col, triangle_size),
        pitch_class: cell.pitch_class,
        note_name: cell.note_name.to_string(),
    }
}

fn centroid(vertices: &[Vertex; 3]) -> LatticePos {
    LatticePos::new(
        (vertices[0].pos.x + vertices[1].pos.x + vertices[2].pos.x) / 3.0,
        (vertices[0].pos.z + vertices[1].pos.z + vertices[2].pos.z) / 3.0,
    )
}

/// Build the full triangle list from a grid.
///
/// Output order is row-major over cells, major before minor within each
/// cell. That order is part of the point-location contract: a point on a
/// shared edge resolves to the first matching triangle in this list.
pub fn build(grid: &PitchClassGrid, triangle_size: f64, base_octave: u8) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(2 * (grid.width as usize) * (grid.height as usize));

    for row in 0..grid.height {
        for col in 0..grid.width {
            let c00 = grid.get(row, col);
            let c01 = grid.get(row, col + 1);
            let c10 = grid.get(row + 1, col);
            let c11 = grid.get(row + 1, col + 1);

            // Upward triangle: root at c00, major third a row up (c10),
            // perfect fifth a column right (c01).
            let vertices = [
                vertex_of(c00, triangle_size),
                vertex_of(c01, triangle_size),
                vertex_of(c10, triangle_size),
            ];
            let center = centroid(&vertices);
            triangles.push(Triangle {
                kind: TriadKind::Major,
                vertices,
                center,
                chord: triad(base_octave, c00.pitch_class, c10.pitch_class, c01.pitch_class),
                chord_name: triad_name(TriadKind::Major, c00.pitch_class),
                row,
                col,
            });

            // Downward triangle: root at c10; c01 sits a minor third above
            // it and c11 a perfect fifth above it.
            let vertices = [
                vertex_of(c10, triangle_size),
                vertex_of(c01, triangle_size),
                vertex_of(c11, triangle_size),
            ];
            let center = centroid(&vertices);
            triangles.push(Triangle {
                kind: TriadKind::Minor,
                vertices,
                center,
                chord: triad(base_octave, c10.pitch_class, c01.pitch_class, c11.pitch_class),
                chord_name: triad_name(TriadKind::Minor, c10.pitch_class),
                row,
                col,
            });
        }
    }

    // Center the lattice on the origin. Applied here, once, to every
    // vertex and center; the untranslated list never escapes this function.
    let dx = -(grid.width as f64) * triangle_size / 2.0;
    let dz = -(grid.height as f64) * triangle_size * 3.0_f64.sqrt() / 2.0 / 2.0;
    for triangle in &mut triangles {
        triangle.translate(dx, dz);
    }

    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegionKey;

    fn default_triangles() -> Vec<Triangle> {
        let grid = PitchClassGrid::generate(12, 8, 7, 4);
        build(&grid, 3.0, 60)
    }

    #[test]
    fn triangle_count_is_two_per_cell() {
        assert_eq!(default_triangles().len(), 2 * 12 * 8);
    }

    #[test]
    fn origin_cell_major_is_c() {
        let triangles = default_triangles();
        let major = &triangles[0];
        assert_eq!(major.key(), RegionKey { row: 0, col: 0, kind: TriadKind::Major });
        assert_eq!(major.chord, [60, 64, 67]);
        assert_eq!(major.chord_name, "C");
        // Traversal order: root, fifth, third.
        let names: Vec<&str> = major.vertices.iter().map(|v| v.note_name.as_str()).collect();
        assert_eq!(names, ["C", "G", "E"]);
    }

    #[test]
    fn origin_cell_minor_is_em() {
        let triangles = default_triangles();
        let minor = &triangles[1];
        assert_eq!(minor.key(), RegionKey { row: 0, col: 0, kind: TriadKind::Minor });
        assert_eq!(minor.chord, [64, 67, 71]);
        assert_eq!(minor.chord_name, "Em");
        let names: Vec<&str> = minor.vertices.iter().map(|v| v.note_name.as_str()).collect();
        assert_eq!(names, ["E", "G", "B"]);
    }

    #[test]
    fn every_chord_is_three_notes_in_base_octave() {
        for triangle in &default_triangles() {
            assert_eq!(triangle.chord.len(), 3);
            for &note in &triangle.chord {
                assert!((60..=71).contains(&note), "note {note} outside [60, 71]");
            }
        }
    }

    #[test]
    fn shared_vertices_are_bit_identical() {
        // Seamlessness: a grid vertex shared between triangles must resolve
        // to exactly the same position everywhere it appears. With the
        // cumulative row shift this holds bitwise; the parity-offset
        // formula fails it from row 2 on.
        let triangles = default_triangles();
        let at = |row: u32, col: u32, kind: TriadKind| {
            triangles
                .iter()
                .find(|t| t.key() == RegionKey { row, col, kind })
                .unwrap()
        };

        for row in 0..8 {
            for col in 0..11 {
                // Major(row, col)'s fifth vertex (c01) is Major(row, col+1)'s root (c00).
                let left = at(row, col, TriadKind::Major);
                let right = at(row, col + 1, TriadKind::Major);
                assert_eq!(left.vertices[1].pos, right.vertices[0].pos);
            }
        }
        for row in 0..7 {
            for col in 0..12 {
                // Minor(row, col)'s root vertex (c10) is Major(row+1, col)'s root (c00).
                let below = at(row, col, TriadKind::Minor);
                let above = at(row + 1, col, TriadKind::Major);
                assert_eq!(below.vertices[0].pos, above.vertices[0].pos);
            }
        }
    }

    #[test]
    fn lattice_is_centered() {
        // The first grid vertex (row 0, col 0) starts at the origin and the
        // centering translation moves it to (-w·s/2, -h·s·√3/4).
        let triangles = default_triangles();
        let first = &triangles[0].vertices[0];
        let expected_x = -12.0 * 3.0 / 2.0;
        let expected_z = -8.0 * 3.0 * 3.0_f64.sqrt() / 4.0;
        assert!((first.pos.x - expected_x).abs() < 1e-12);
        assert!((first.pos.z - expected_z).abs() < 1e-12);
        // z extent is symmetric about the origin.
        let min_z = triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|v| v.pos.z)
            .fold(f64::INFINITY, f64::min);
        let max_z = triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|v| v.pos.z)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((min_z + max_z).abs() < 1e-9);
    }

    #[test]
    fn build_is_pure() {
        // Rebuilding from the same grid yields an identical list — the
        // centering translation cannot stack across builds.
        let grid = PitchClassGrid::generate(12, 8, 7, 4);
        let a = build(&grid, 3.0, 60);
        let b = build(&grid, 3.0, 60);
        assert_eq!(a, b);
    }

    #[test]
    fn center_is_the_vertex_mean() {
        for triangle in default_triangles().iter().take(10) {
            let mean_x: f64 = triangle.vertices.iter().map(|v| v.pos.x).sum::<f64>() / 3.0;
            let mean_z: f64 = triangle.vertices.iter().map(|v| v.pos.z).sum::<f64>() / 3.0;
            assert!((triangle.center.x - mean_x).abs() < 1e-12);
            assert!((triangle.center.z - mean_z).abs() < 1e-12);
        }
    }
}
