// tonnetz_session — the consuming loop's side of the lattice contract.
//
// The lattice engine (`tonnetz_lattice`) is pure and stateless per query;
// this crate holds the one piece of mutable state the system has: which
// region the agent is currently in, and which chord is currently
// sounding. It talks to the audio and rendering collaborators only
// through the narrow sink traits, so it carries no synthesis or
// rendering dependency.
//
// Module overview:
// - `region.rs`:  RegionTracker state machine + RegionChange/RegionSnapshot events.
// - `voice.rs`:   VoiceSet — the sounding chord as a scoped resource, ChordSink trait.
// - `session.rs`: Session — per-tick glue from tracker to sinks, HighlightSink trait.
// - `midi.rs`:    Capture a beat-stamped change sequence as a MIDI file.
//
// The `walk` binary (`main.rs`) runs a headless straight-line walk across
// the lattice and writes what it heard to MIDI and JSON.

pub mod midi;
pub mod region;
pub mod session;
pub mod voice;
