// Active-region state machine.
//
// The host loop feeds the agent's position in every tick; the tracker
// locates the containing triangle and reports a change only when the
// region's `(row, col, kind)` key actually differs from the current one.
// Re-locating the same region on successive frames is silent — collaborators
// only hear transitions.
//
// Changes carry a `RegionSnapshot` with everything the downstream
// collaborators need: the chord for audio, the chord name and vertex note
// names for display. Snapshots are serializable so a session can be logged
// or replayed.

use serde::{Deserialize, Serialize};
use tonnetz_lattice::lattice::Lattice;
use tonnetz_lattice::types::{RegionKey, Triangle};

/// Everything a collaborator needs to react to entering a region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub key: RegionKey,
    /// MIDI notes in root/third/fifth order.
    pub chord: [u8; 3],
    /// Triad display name, e.g. `"C"` or `"Em"`.
    pub chord_name: String,
    /// Vertex note names in traversal order.
    pub vertex_notes: [String; 3],
}

impl RegionSnapshot {
    pub fn of(triangle: &Triangle) -> Self {
        Self {
            key: triangle.key(),
            chord: triangle.chord,
            chord_name: triangle.chord_name.clone(),
            vertex_notes: [
                triangle.vertices[0].note_name.clone(),
                triangle.vertices[1].note_name.clone(),
                triangle.vertices[2].note_name.clone(),
            ],
        }
    }

    /// One-line display form: chord name plus vertex notes, e.g. `"C [C G E]"`.
    pub fn display_label(&self) -> String {
        format!("{} [{}]", self.chord_name, self.vertex_notes.join(" "))
    }
}

/// A transition reported by the tracker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionChange {
    /// The agent entered a region different from the previous one.
    Entered(RegionSnapshot),
    /// The agent left the lattice entirely.
    Exited,
}

/// Where the agent currently is, by key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionState {
    Outside,
    Inside(RegionKey),
}

/// Tracks the active region across position updates.
#[derive(Clone, Debug)]
pub struct RegionTracker {
    state: RegionState,
}

impl Default for RegionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionTracker {
    pub fn new() -> Self {
        Self {
            state: RegionState::Outside,
        }
    }

    pub fn state(&self) -> RegionState {
        self.state
    }

    /// Process one position update. Returns a change only on transition.
    pub fn update(&mut self, lattice: &Lattice, x: f64, z: f64) -> Option<RegionChange> {
        match (self.state, lattice.find_triangle_at(x, z)) {
            (RegionState::Inside(current), Some(triangle)) if triangle.key() == current => None,
            (_, Some(triangle)) => {
                self.state = RegionState::Inside(triangle.key());
                Some(RegionChange::Entered(RegionSnapshot::of(triangle)))
            }
            (RegionState::Inside(_), None) => {
                self.state = RegionState::Outside;
                Some(RegionChange::Exited)
            }
            (RegionState::Outside, None) => None,
        }
    }
}
