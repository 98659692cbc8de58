// Session glue — wires the tracker to the audio and display collaborators.
//
// `Session::tick` is the whole per-frame contract: feed it the agent
// position, and on a region change it plays the new chord through the
// voice set and tells the highlight sink which region is active. No
// transition, no side effects.
//
// The collaborators stay behind narrow traits (`ChordSink`,
// `HighlightSink`); the session knows nothing about meshes, materials,
// or synthesis internals.

use crate::region::{RegionChange, RegionState, RegionTracker};
use crate::voice::{ChordSink, VoiceSet};
use tonnetz_lattice::lattice::Lattice;
use tonnetz_lattice::types::RegionKey;

/// The interface the rendering collaborator implements: which region to
/// highlight, `None` when the agent is off the lattice.
pub trait HighlightSink {
    fn set_active_region(&mut self, key: Option<RegionKey>);
}

/// Highlight sink for hosts without a renderer (headless runs, tests).
#[derive(Debug, Default)]
pub struct NullHighlight;

impl HighlightSink for NullHighlight {
    fn set_active_region(&mut self, _key: Option<RegionKey>) {}
}

/// Per-session state: the tracker plus both collaborator endpoints.
#[derive(Debug)]
pub struct Session<S: ChordSink, H: HighlightSink> {
    tracker: RegionTracker,
    voices: VoiceSet<S>,
    highlight: H,
}

impl<S: ChordSink, H: HighlightSink> Session<S, H> {
    pub fn new(chord_sink: S, highlight: H) -> Self {
        Self {
            tracker: RegionTracker::new(),
            voices: VoiceSet::new(chord_sink),
            highlight,
        }
    }

    /// Process one position update, driving both collaborators on a
    /// transition. Returns the change for logging/capture.
    pub fn tick(&mut self, lattice: &Lattice, x: f64, z: f64) -> Option<RegionChange> {
        let change = self.tracker.update(lattice, x, z)?;
        match &change {
            RegionChange::Entered(snapshot) => {
                self.voices.play(&snapshot.chord);
                self.highlight.set_active_region(Some(snapshot.key));
            }
            RegionChange::Exited => {
                self.voices.release_all();
                self.highlight.set_active_region(None);
            }
        }
        Some(change)
    }

    /// Explicit stop: silence the voices and clear the highlight without
    /// touching the tracker's position state.
    pub fn stop(&mut self) {
        self.voices.release_all();
        self.highlight.set_active_region(None);
    }

    pub fn state(&self) -> RegionState {
        self.tracker.state()
    }

    pub fn voices(&self) -> &VoiceSet<S> {
        &self.voices
    }
}
