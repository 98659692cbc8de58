// Scoped chord voices.
//
// Earlier variants of this system kept an ad hoc "currently playing"
// list that grew until someone remembered to cancel it. `VoiceSet` makes
// the sounding chord a scoped resource instead: playing a new chord
// releases the old one first, `release_all` covers the explicit-stop
// path, and `Drop` covers every other exit. No path leaks a sounding
// note.
//
// The audio backend is behind the narrow `ChordSink` trait — note on,
// note off, nothing else. This crate never touches oscillators,
// envelopes, or device handles; those belong to the synthesis
// collaborator.

use smallvec::SmallVec;

/// The interface the audio collaborator implements.
pub trait ChordSink {
    fn note_on(&mut self, note: u8);
    fn note_off(&mut self, note: u8);
}

/// The currently sounding triad, released on every exit path.
#[derive(Debug)]
pub struct VoiceSet<S: ChordSink> {
    sink: S,
    /// Triads are 3 notes; inline storage avoids an allocation per chord.
    sounding: SmallVec<[u8; 3]>,
}

impl<S: ChordSink> VoiceSet<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            sounding: SmallVec::new(),
        }
    }

    /// Release whatever is sounding, then start the new chord.
    pub fn play(&mut self, chord: &[u8]) {
        self.release_all();
        for &note in chord {
            self.sink.note_on(note);
            self.sounding.push(note);
        }
    }

    /// Stop every sounding note. Idempotent.
    pub fn release_all(&mut self) {
        for note in self.sounding.drain(..) {
            self.sink.note_off(note);
        }
    }

    /// Notes currently sounding, in the order they were started.
    pub fn sounding(&self) -> &[u8] {
        &self.sounding
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ChordSink> Drop for VoiceSet<S> {
    fn drop(&mut self) {
        self.release_all();
    }
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------

/// What happened on the sink, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceEvent {
    On(u8),
    Off(u8),
}

/// Records the on/off stream for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<VoiceEvent>,
}

impl ChordSink for RecordingSink {
    fn note_on(&mut self, note: u8) {
        self.events.push(VoiceEvent::On(note));
    }

    fn note_off(&mut self, note: u8) {
        self.events.push(VoiceEvent::Off(note));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VoiceEvent::{Off, On};

    #[test]
    fn play_starts_all_three_notes() {
        let mut voices = VoiceSet::new(RecordingSink::default());
        voices.play(&[60, 64, 67]);
        assert_eq!(voices.sounding(), &[60, 64, 67]);
        assert_eq!(voices.sink().events, vec![On(60), On(64), On(67)]);
    }

    #[test]
    fn new_chord_releases_the_old_one_first() {
        let mut voices = VoiceSet::new(RecordingSink::default());
        voices.play(&[60, 64, 67]);
        voices.play(&[64, 67, 71]);
        assert_eq!(
            voices.sink().events,
            vec![On(60), On(64), On(67), Off(60), Off(64), Off(67), On(64), On(67), On(71)]
        );
        assert_eq!(voices.sounding(), &[64, 67, 71]);
    }

    #[test]
    fn release_all_is_idempotent() {
        let mut voices = VoiceSet::new(RecordingSink::default());
        voices.play(&[60, 64, 67]);
        voices.release_all();
        voices.release_all();
        assert_eq!(
            voices.sink().events,
            vec![On(60), On(64), On(67), Off(60), Off(64), Off(67)]
        );
        assert!(voices.sounding().is_empty());
    }

    #[test]
    fn drop_releases_sounding_notes() {
        // Count note_offs through a shared cell, since the sink is consumed
        // by the drop.
        use std::cell::RefCell;
        use std::rc::Rc;

        struct CountingSink(Rc<RefCell<i32>>);
        impl ChordSink for CountingSink {
            fn note_on(&mut self, _note: u8) {
                *self.0.borrow_mut() += 1;
            }
            fn note_off(&mut self, _note: u8) {
                *self.0.borrow_mut() -= 1;
            }
        }

        let balance = Rc::new(RefCell::new(0));
        {
            let mut voices = VoiceSet::new(CountingSink(Rc::clone(&balance)));
            voices.play(&[60, 64, 67]);
            assert_eq!(*balance.borrow(), 3);
        }
        // Every on was matched by an off.
        assert_eq!(*balance.borrow(), 0);
    }
}
