#![doc = r#"
Non-fatal findings of a decode

Nothing in here changes the decoded events. It records what the decoder
skipped, tolerated, or read without acting on, so callers can report it.
"#]

use alloc::{string::String, vec::Vec};

use crate::channel::UnmatchedNoteOff;

/// The seven text meta event kinds (`FF 01` to `FF 07`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TextKind {
    Text,
    Copyright,
    TrackName,
    InstrumentName,
    Lyric,
    Marker,
    CuePoint,
}

/// A text meta event
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    /// The zero based index of the track chunk
    pub track: usize,
    /// Seconds from the start of the track
    pub timestamp: f64,
    /// What the text labels
    pub kind: TextKind,
    /// The text, with invalid UTF-8 replaced
    pub text: String,
}

/// A time signature meta event (`FF 58 04`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSignature {
    /// Seconds from the start of the track
    pub timestamp: f64,
    /// Beats per bar
    pub numerator: u8,
    /// The note value of a beat, already raised from its power of two
    pub denominator: u32,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Notated 32nd notes per quarter note
    pub thirty_seconds_per_quarter: u8,
}

#[doc = r#"
Everything a decode noticed but did not fail on.
"#]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub(crate) unclosed_notes: usize,
    pub(crate) unmatched_note_offs: Vec<UnmatchedNoteOff>,
    pub(crate) texts: Vec<TextEvent>,
    pub(crate) time_signatures: Vec<TimeSignature>,
    pub(crate) unknown_chunks: Vec<[u8; 4]>,
    pub(crate) skipped_events: usize,
    pub(crate) irregular_tempos: usize,
    pub(crate) trailing_bytes: usize,
    pub(crate) tracks_without_end: Vec<usize>,
    pub(crate) declared_tracks: u16,
    pub(crate) decoded_tracks: usize,
}

impl Diagnostics {
    /// Notes that were switched on but never off. They are not part of the output.
    pub fn unclosed_notes(&self) -> usize {
        self.unclosed_notes
    }
    /// Note offs (zero velocity note ons, or note offs in lenient mode)
    /// that had nothing to close
    pub fn unmatched_note_offs(&self) -> &[UnmatchedNoteOff] {
        &self.unmatched_note_offs
    }
    /// Text meta events in file order
    pub fn texts(&self) -> &[TextEvent] {
        &self.texts
    }
    /// Time signature meta events in file order
    pub fn time_signatures(&self) -> &[TimeSignature] {
        &self.time_signatures
    }
    /// Tags of top level chunks that were skipped
    pub fn unknown_chunks(&self) -> &[[u8; 4]] {
        &self.unknown_chunks
    }
    /// System exclusive, time code, song position and unrecognized meta events
    pub fn skipped_events(&self) -> usize {
        self.skipped_events
    }
    /// Set tempo events whose payload was not three bytes long
    pub fn irregular_tempos(&self) -> usize {
        self.irregular_tempos
    }
    /// Bytes after the last chunk, too few to hold a chunk header
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }
    /// Indexes of track chunks that ran out without an end of track event
    pub fn tracks_without_end(&self) -> &[usize] {
        &self.tracks_without_end
    }
    /// The track count written in the header
    pub fn declared_tracks(&self) -> u16 {
        self.declared_tracks
    }
    /// The number of `MTrk` chunks decoded
    pub fn decoded_tracks(&self) -> usize {
        self.decoded_tracks
    }
    /// True if the header's track count disagrees with the chunks found
    pub fn track_count_mismatch(&self) -> bool {
        self.declared_tracks as usize != self.decoded_tracks
    }
    /// True if nothing was noticed
    pub fn is_clean(&self) -> bool {
        self.unclosed_notes == 0
            && self.unmatched_note_offs.is_empty()
            && self.unknown_chunks.is_empty()
            && self.skipped_events == 0
            && self.irregular_tempos == 0
            && self.trailing_bytes == 0
            && self.tracks_without_end.is_empty()
            && !self.track_count_mismatch()
    }
}
