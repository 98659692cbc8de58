// MIDI capture of a session's region changes.
//
// Turns a beat-stamped sequence of `RegionChange`s into a Standard MIDI
// File: each entered region sounds its triad until the next change, an
// exit is a rest. One track, SMF format 0, written with the `midly`
// crate. This is event serialization for listening back to a walk — not
// audio synthesis, which stays outside this workspace entirely.

use crate::region::RegionChange;
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// How long the final chord rings after the last change, in beats.
const TAIL_BEATS: u32 = 4;

/// A region change stamped with the beat (quarter note) it occurred on.
#[derive(Clone, Debug)]
pub struct TimedChange {
    pub beat: u32,
    pub change: RegionChange,
}

/// Write a change sequence to a MIDI file. Changes must be in ascending
/// beat order.
pub fn write_midi(
    changes: &[TimedChange],
    tempo_bpm: u16,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let smf = changes_to_smf(changes, tempo_bpm);
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a change sequence to an in-memory SMF.
fn changes_to_smf(changes: &[TimedChange], tempo_bpm: u16) -> Smf<'static> {
    debug_assert!(
        changes.windows(2).all(|w| w[0].beat <= w[1].beat),
        "changes must be in ascending beat order"
    );

    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let channel = u4::new(0);
    let mut track: Track<'static> = Vec::new();

    let tempo_microseconds = 60_000_000 / tempo_bpm as u32;
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });

    let mut last_event_tick: u32 = 0;
    let mut sounding: Option<[u8; 3]> = None;

    for timed in changes {
        let tick = timed.beat * TICKS_PER_QUARTER as u32;

        // End the previous chord, if any. The first off carries the delta;
        // the rest are simultaneous.
        if let Some(chord) = sounding.take() {
            for (i, &note) in chord.iter().enumerate() {
                track.push(TrackEvent {
                    delta: u28::new(if i == 0 { tick - last_event_tick } else { 0 }),
                    kind: TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOff {
                            key: u7::new(note),
                            vel: u7::new(0),
                        },
                    },
                });
            }
            last_event_tick = tick;
        }

        if let RegionChange::Entered(snapshot) = &timed.change {
            for (i, &note) in snapshot.chord.iter().enumerate() {
                track.push(TrackEvent {
                    delta: u28::new(if i == 0 { tick - last_event_tick } else { 0 }),
                    kind: TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOn {
                            key: u7::new(note),
                            vel: u7::new(80),
                        },
                    },
                });
            }
            last_event_tick = tick;
            sounding = Some(snapshot.chord);
        }
    }

    // Let the final chord ring, then close it.
    if let Some(chord) = sounding.take() {
        let end_tick = last_event_tick + TAIL_BEATS * TICKS_PER_QUARTER as u32;
        for (i, &note) in chord.iter().enumerate() {
            track.push(TrackEvent {
                delta: u28::new(if i == 0 { end_tick - last_event_tick } else { 0 }),
                kind: TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff {
                        key: u7::new(note),
                        vel: u7::new(0),
                    },
                },
            });
        }
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{RegionChange, RegionSnapshot};
    use tonnetz_lattice::types::{RegionKey, TriadKind};

    fn snapshot(chord: [u8; 3], name: &str) -> RegionSnapshot {
        RegionSnapshot {
            key: RegionKey { row: 0, col: 0, kind: TriadKind::Major },
            chord,
            chord_name: name.to_string(),
            vertex_notes: ["C".into(), "G".into(), "E".into()],
        }
    }

    fn count_midi<F: Fn(&MidiMessage) -> bool>(smf: &Smf<'_>, pred: F) -> usize {
        smf.tracks[0]
            .iter()
            .filter(|e| matches!(&e.kind, TrackEventKind::Midi { message, .. } if pred(message)))
            .count()
    }

    #[test]
    fn single_chord_produces_three_ons_and_offs() {
        let changes = [TimedChange {
            beat: 0,
            change: RegionChange::Entered(snapshot([60, 64, 67], "C")),
        }];
        let smf = changes_to_smf(&changes, 120);
        assert_eq!(smf.tracks.len(), 1);
        assert_eq!(count_midi(&smf, |m| matches!(m, MidiMessage::NoteOn { .. })), 3);
        assert_eq!(count_midi(&smf, |m| matches!(m, MidiMessage::NoteOff { .. })), 3);
    }

    #[test]
    fn chord_change_closes_the_previous_chord() {
        let changes = [
            TimedChange {
                beat: 0,
                change: RegionChange::Entered(snapshot([60, 64, 67], "C")),
            },
            TimedChange {
                beat: 2,
                change: RegionChange::Entered(snapshot([64, 67, 71], "Em")),
            },
        ];
        let smf = changes_to_smf(&changes, 120);
        assert_eq!(count_midi(&smf, |m| matches!(m, MidiMessage::NoteOn { .. })), 6);
        assert_eq!(count_midi(&smf, |m| matches!(m, MidiMessage::NoteOff { .. })), 6);

        // The first off lands on beat 2: delta from the last on equals
        // two quarter notes.
        let events = &smf.tracks[0];
        let first_off = events
            .iter()
            .find(|e| matches!(&e.kind, TrackEventKind::Midi { message: MidiMessage::NoteOff { .. }, .. }))
            .unwrap();
        assert_eq!(first_off.delta.as_int(), 2 * TICKS_PER_QUARTER as u32);
    }

    #[test]
    fn exit_leaves_a_rest() {
        let changes = [
            TimedChange {
                beat: 0,
                change: RegionChange::Entered(snapshot([60, 64, 67], "C")),
            },
            TimedChange { beat: 1, change: RegionChange::Exited },
        ];
        let smf = changes_to_smf(&changes, 120);
        // Offs at the exit, nothing after.
        assert_eq!(count_midi(&smf, |m| matches!(m, MidiMessage::NoteOn { .. })), 3);
        assert_eq!(count_midi(&smf, |m| matches!(m, MidiMessage::NoteOff { .. })), 3);
    }

    #[test]
    fn empty_walk_is_a_valid_file() {
        let smf = changes_to_smf(&[], 120);
        assert_eq!(smf.tracks.len(), 1);
        // Just tempo + end of track.
        assert_eq!(smf.tracks[0].len(), 2);
    }
}
