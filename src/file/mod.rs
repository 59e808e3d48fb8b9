#![doc = r#"
Decoding a whole midi file

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII
type identifier followed by a 32-bit big-endian length and then the chunk
data.

```text
[Header Chunk: "MThd"]   format, track count, ticks per quarter note
[Track Chunk 1: "MTrk"]  delta time + event, delta time + event, ...
...
[Track Chunk N: "MTrk"]
[Optional Unknown Chunks]
```

The header must come first. Track chunks are decoded in file order by a
[`MidiDecoder`]; any chunk with another tag is skipped. All tracks share the
sixteen channels and the [`TempoClock`], so a tempo change written in the
first track of a format 1 file applies to every track.
"#]

mod collector;
pub use collector::*;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod status;

mod tempo;
pub use tempo::*;

mod track;
pub use track::TrackEnd;
use track::TrackDecoder;

use crate::{
    DecodeOptions, Event,
    channel::Channels,
    diagnostics::Diagnostics,
    reader::{ReadResult, Reader},
};
use alloc::vec::Vec;

#[doc = r#"
The decoded notes of a midi file.

# Example
```rust
use smf_notes::prelude::*;

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let decoded = DecodedMidi::parse(&bytes).unwrap();

assert_eq!(decoded.header().format(), Format::Simultaneous);
assert!(decoded.events().is_empty());
assert!(decoded.diagnostics().is_clean());
```
"#]
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMidi {
    header: MidiFileHeader,
    events: Vec<Event>,
    diagnostics: Diagnostics,
}

impl DecodedMidi {
    /// Decode a set of bytes with the default [`DecodeOptions`]
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        MidiDecoder::default().decode(bytes)
    }

    /// The header of the file
    pub fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// Every closed note, sorted by timestamp
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Non-fatal findings, including the count of notes never closed
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Take the events, dropping everything else
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Decodes midi files with a fixed set of [`DecodeOptions`].
///
/// A decoder holds no state between files, so one decoder can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct MidiDecoder {
    options: DecodeOptions,
}

impl MidiDecoder {
    /// Create a decoder
    pub const fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// The options in use
    pub const fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a complete file. Either every note is returned, or an error.
    pub fn decode(&self, bytes: &[u8]) -> ReadResult<DecodedMidi> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = MidiFileHeader::read(&mut reader)?;

        let mut clock = TempoClock::new(header.division());
        let mut channels = Channels::default();
        let mut diagnostics = Diagnostics {
            declared_tracks: header.num_tracks(),
            ..Default::default()
        };

        while !reader.is_at_end() {
            // a chunk header is a tag and a length
            if reader.remaining() < 8 {
                #[cfg(feature = "tracing")]
                tracing::debug!("ignoring {} trailing bytes", reader.remaining());
                diagnostics.trailing_bytes = reader.remaining();
                break;
            }
            let tag = reader.read_exact_size::<4>()?;
            let length = reader.read_u32()? as usize;
            if &tag != b"MTrk" {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "skipping unknown chunk {:?} of {length} bytes",
                    alloc::string::String::from_utf8_lossy(&tag)
                );
                reader.skip(length)?;
                diagnostics.unknown_chunks.push(tag);
                continue;
            }

            let track = reader.sub_reader(length)?;
            let index = diagnostics.decoded_tracks;
            let _end = TrackDecoder::new(
                track,
                index,
                &mut clock,
                &mut channels,
                &mut diagnostics,
                &self.options,
            )
            .run()?;
            #[cfg(feature = "tracing")]
            if let TrackEnd::EndOfTrack { unread: unread @ 1.. } = _end {
                tracing::debug!("track {index} ended with {unread} bytes left in its chunk");
            }
            diagnostics.decoded_tracks += 1;
        }

        #[cfg(feature = "tracing")]
        if diagnostics.track_count_mismatch() {
            tracing::warn!(
                "header declares {} tracks but {} were found",
                diagnostics.declared_tracks,
                diagnostics.decoded_tracks
            );
        }

        let (events, unclosed) = EventCollector::collect(channels);
        #[cfg(feature = "tracing")]
        if unclosed > 0 {
            tracing::warn!("{unclosed} notes were never closed and are left out");
        }
        diagnostics.unclosed_notes = unclosed;

        Ok(DecodedMidi {
            header,
            events,
            diagnostics,
        })
    }
}
