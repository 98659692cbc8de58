// Dense 2D grid of pitch classes — the raw material of the Tonnetz.
//
// The grid is stored as a flat `Vec<GridCell>` in row-major order
// (`index = row * cols + col`), giving O(1) access. It holds
// `(height + 1) × (width + 1)` cells so that `width × height` tessellation
// cells each have all four corners available.
//
// Every cell's pitch class follows one rule:
// `pc(row, col) = normalize(row·third_interval + col·fifth_interval)`.
// Stepping right adds a fifth, stepping up adds a major third — the
// neo-Riemannian Tonnetz axes.
//
// See also: `tessellate.rs` which consumes the grid, `chord.rs` for the
// note-name table the cells reference.
//
// **Critical constraint: immutability.** The grid is generated once at
// startup and never mutated. Out-of-range access is a construction bug
// and panics; it is not a recoverable condition.

use crate::chord::note_name;
use crate::types::PitchClass;

/// One lattice grid point: its coordinates and resolved pitch data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub pitch_class: PitchClass,
    /// Canonical spelling from the `chord::NOTE_NAMES` table.
    pub note_name: &'static str,
}

/// Dense `(height + 1) × (width + 1)` grid of pitch classes.
#[derive(Clone, Debug)]
pub struct PitchClassGrid {
    /// Flat storage: index = row * (width + 1) + col.
    cells: Vec<GridCell>,
    /// Tessellation cells across (one less than the column count).
    pub width: u32,
    /// Tessellation cells down (one less than the row count).
    pub height: u32,
}

impl PitchClassGrid {
    /// Generate the full grid. Intervals are in semitones and may be
    /// negative; the modulo-12 normalization handles both directions.
    pub fn generate(width: u32, height: u32, fifth_interval: i64, third_interval: i64) -> Self {
        let cols = width as usize + 1;
        let rows = height as usize + 1;
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows as u32 {
            for col in 0..cols as u32 {
                let pitch_class = PitchClass::normalize(
                    row as i64 * third_interval + col as i64 * fifth_interval,
                );
                cells.push(GridCell {
                    row,
                    col,
                    pitch_class,
                    note_name: note_name(pitch_class),
                });
            }
        }
        Self {
            cells,
            width,
            height,
        }
    }

    /// Number of cell rows (`height + 1`).
    pub fn rows(&self) -> u32 {
        self.height + 1
    }

    /// Number of cell columns (`width + 1`).
    pub fn cols(&self) -> u32 {
        self.width + 1
    }

    /// Fetch a cell. Panics on out-of-range coordinates — callers iterate
    /// within the grid's own bounds, so a miss is a construction bug.
    pub fn get(&self, row: u32, col: u32) -> &GridCell {
        assert!(
            row < self.rows() && col < self.cols(),
            "grid access ({row}, {col}) outside {}x{} grid",
            self.rows(),
            self.cols()
        );
        &self.cells[(row * self.cols() + col) as usize]
    }

    /// Pitch class at a grid point.
    pub fn pitch_class(&self, row: u32, col: u32) -> PitchClass {
        self.get(row, col).pitch_class
    }
}
