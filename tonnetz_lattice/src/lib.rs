// tonnetz_lattice — pure Rust Tonnetz lattice engine.
//
// Generates a 2D lattice of pitch classes, tessellates it into triangular
// chord regions (one major and one minor triad per cell), and answers
// "which triangle contains this point" for a moving agent. Rendering,
// audio synthesis, and input handling are external collaborators that
// consume this crate's output; it depends on none of them.
//
// Module overview:
// - `types.rs`:      PitchClass, TriadKind, RegionKey, LatticePos, Vertex, Triangle.
// - `chord.rs`:      Triad derivation + the single canonical note-name table.
// - `grid.rs`:       Dense (height+1) x (width+1) pitch-class grid generation.
// - `tessellate.rs`: Triangle construction (cumulative row shift, one-shot centering).
// - `locate.rs`:     Point-in-triangle scan + spatial bucket index.
// - `config.rs`:     LatticeConfig — all tunables, JSON-loadable, validated.
// - `lattice.rs`:    Lattice — the assembled one-shot startup state.
//
// **Critical constraint: build once, read forever.** Grid and triangles
// are constructed during initialization and never mutated afterwards.
// Point-location queries are pure reads; the only mutable state in the
// system (the active region) lives with the consuming loop, not here.

pub mod chord;
pub mod config;
pub mod grid;
pub mod lattice;
pub mod locate;
pub mod tessellate;
pub mod types;
