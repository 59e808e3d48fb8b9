#![doc = r#"
Decode Standard MIDI Files into timestamped note events.

A MIDI file describes music as a stream of stateful instructions: a note is
switched on, some ticks later it is switched off, a controller changes the
volume in between, and the length of a tick depends on whatever tempo was
last set. `smf-notes` walks that stream once and hands back each note as a
self-contained [`Event`]: when it started (in seconds), how long it lasted,
its pitch, instrument, velocity and volume.

# Example
```rust
use smf_notes::prelude::*;

// A format 0 file, 480 ticks per quarter note, one middle C lasting a
// quarter note at the default tempo of 120 BPM.
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 13,
    0x00, 0x90, 60, 100,
    0x83, 0x60, 0x80, 60, 0,
    0x00, 0xFF, 0x2F, 0x00,
];

let decoded = DecodedMidi::parse(&bytes).unwrap();
let note = &decoded.events()[0];

assert_eq!(note.pitch(), 60);
assert_eq!(note.timestamp(), 0.);
assert_eq!(note.duration(), 0.5);
```

# Scope

Only tick based (`ticks per quarter note`) files of format 0 and 1 are
decoded. SMPTE timing and format 2 files are rejected with
[`ReaderErrorKind::UnsupportedFormat`].
"#]
#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod channel;
pub mod diagnostics;
mod event;
pub mod file;
mod options;
pub mod reader;

pub use event::*;
pub use options::*;
pub use reader::{MalformedError, ReadResult, ReaderError, ReaderErrorKind, UnsupportedError};

#[doc = r#"
Common re-exports for decoding files
"#]
pub mod prelude {
    pub use crate::{
        DecodeOptions, Event,
        channel::{Channel, UnmatchedNoteOff},
        diagnostics::*,
        file::{DecodedMidi, Format, MidiDecoder, MidiFileHeader, Tempo},
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
    };
}
