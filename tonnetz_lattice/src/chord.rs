// Chord derivation rules — pure functions, no state.
//
// Maps lattice cells to MIDI note triples and display names. This module
// owns the one canonical note-spelling table in the workspace; chord
// naming, vertex labels, and any display collaborator all read from it.
// A second, divergent table must not exist — earlier variants of this
// system shipped with a sharp-preferred table in one place and a
// flat-preferred table in another, and the two drifted.
//
// Spelling decision: **sharp-preferred** (C# rather than Db, and so on).
// Recorded in DESIGN.md as the resolution of that open question.

use crate::types::{PitchClass, TriadKind};

/// Canonical display name per pitch class, sharp-preferred.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitones from root to the perfect fifth.
pub const PERFECT_FIFTH: i64 = 7;
/// Semitones from root to the major third.
pub const MAJOR_THIRD: i64 = 4;
/// Semitones from root to the minor third.
pub const MINOR_THIRD: i64 = 3;

/// Display name of a pitch class. Total over the `PitchClass` range; the
/// range invariant makes the index infallible.
pub fn note_name(pc: PitchClass) -> &'static str {
    NOTE_NAMES[pc.value() as usize]
}

/// Absolute MIDI notes of a triad in root/third/fifth order.
///
/// Each note is `base_octave + pitch class`, so with the default base of
/// 60 (middle C's octave) every note lands in `[60, 71]`. The third and
/// fifth come from the lattice's own cells rather than from interval
/// arithmetic — the lattice layout guarantees the intervals.
pub fn triad(base_octave: u8, root: PitchClass, third: PitchClass, fifth: PitchClass) -> [u8; 3] {
    [
        base_octave + root.value(),
        base_octave + third.value(),
        base_octave + fifth.value(),
    ]
}

/// Display name of a triad: root name, with an `"m"` suffix for minor.
pub fn triad_name(kind: TriadKind, root: PitchClass) -> String {
    match kind {
        TriadKind::Major => note_name(root).to_string(),
        TriadKind::Minor => format!("{}m", note_name(root)),
    }
}
