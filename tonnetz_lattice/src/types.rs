// Core types shared across the lattice engine.
//
// Defines the `PitchClass` newtype (the modulo-12 residue at the heart of
// every derivation rule), triangle/region identity, and world-space
// positions on the x/z plane. All public data types derive `Serialize`
// so consumers can dump lattice geometry as JSON.
//
// **Critical constraint: portable identity.** The "which region is the
// agent in" question is answered by comparing `RegionKey` values
// `(row, col, kind)`, never by pointer or memory identity. Reference
// identity does not survive serialization or cloning and must not be
// used as a contract.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Pitch classes
// ---------------------------------------------------------------------------

/// A pitch class: an integer in `[0, 11]` naming a note irrespective of
/// octave (0 = C, 7 = G, ...).
///
/// The range invariant is enforced at construction. A value outside
/// `[0, 11]` can only arise from a construction bug, so `new` asserts
/// rather than returning a `Result`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Wrap a raw residue. Panics if `pc >= 12` — that is a violated
    /// construction invariant, not a recoverable condition.
    pub fn new(pc: u8) -> Self {
        assert!(pc < 12, "pitch class {pc} out of range [0, 11]");
        Self(pc)
    }

    /// Canonical modulo-12 residue of any integer, negative inputs
    /// included: `((n mod 12) + 12) mod 12` is always in `[0, 11]`.
    pub fn normalize(n: i64) -> Self {
        Self(((n % 12 + 12) % 12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

// Custom deserialize so a hand-edited JSON file cannot smuggle an
// out-of-range residue past the constructor.
impl<'de> Deserialize<'de> for PitchClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = u8::deserialize(deserializer)?;
        if v < 12 {
            Ok(PitchClass(v))
        } else {
            Err(serde::de::Error::custom(format!(
                "pitch class {v} out of range [0, 11]"
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Triangle identity
// ---------------------------------------------------------------------------

/// Whether a triangle carries a major (upward) or minor (downward) triad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TriadKind {
    Major,
    Minor,
}

/// Portable identity of a triangle: the tessellation cell that produced it
/// plus which of the cell's two triangles it is.
///
/// Two `Triangle` values describe the same region iff their keys compare
/// equal. This is the only supported way to detect "active region changed".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionKey {
    pub row: u32,
    pub col: u32,
    pub kind: TriadKind,
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}, {})", self.kind, self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// World-space geometry
// ---------------------------------------------------------------------------

/// A position on the lattice plane. The lattice lives in the x/z plane of
/// the host's world space; y (height) is the renderer's concern.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticePos {
    pub x: f64,
    pub z: f64,
}

impl LatticePos {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn translate(&mut self, dx: f64, dz: f64) {
        self.x += dx;
        self.z += dz;
    }
}

/// A lattice vertex: a grid cell's pitch data resolved to world space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: LatticePos,
    pub pitch_class: PitchClass,
    pub note_name: String,
}

/// One triangular region of the tessellation.
///
/// Vertices are in traversal order (see `tessellate.rs` for the per-kind
/// ordering), `chord` is in root/third/fifth order, and `(row, col, kind)`
/// identify the region — see `RegionKey`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub kind: TriadKind,
    pub vertices: [Vertex; 3],
    pub center: LatticePos,
    /// Absolute MIDI notes in root/third/fifth order.
    pub chord: [u8; 3],
    /// Display name of the triad, e.g. `"C"` or `"Em"`.
    pub chord_name: String,
    pub row: u32,
    pub col: u32,
}

impl Triangle {
    pub fn key(&self) -> RegionKey {
        RegionKey {
            row: self.row,
            col: self.col,
            kind: self.kind,
        }
    }

    /// Shift the triangle's vertices and center by `(dx, dz)`.
    pub fn translate(&mut self, dx: f64, dz: f64) {
        for vertex in &mut self.vertices {
            vertex.pos.translate(dx, dz);
        }
        self.center.translate(dx, dz);
    }
}
