use alloc::string::String;

use super::{
    TempoClock, Tempo,
    status::{MetaKind, Status, SystemKind, VoiceKind},
};
use crate::{
    DecodeOptions, MalformedError, UnsupportedError,
    channel::{Channel, Channels},
    diagnostics::{Diagnostics, TextEvent, TextKind, TimeSignature},
    reader::{ReadResult, Reader, ReaderErrorKind, inv_data},
};

/// How a track chunk finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEnd {
    /// An end of track meta event was read. `unread` bytes of the chunk followed it.
    EndOfTrack {
        /// Bytes left in the chunk after the event
        unread: usize,
    },
    /// Every byte of the chunk was read without finding an end of track event
    Exhausted,
}

/// The event state machine for one `MTrk` chunk.
///
/// The reader covers exactly the chunk's bytes, so an early end of track
/// leaves the file reader already positioned at the next chunk.
pub(crate) struct TrackDecoder<'slc, 'a> {
    reader: Reader<'slc>,
    index: usize,
    clock: &'a mut TempoClock,
    channels: &'a mut Channels,
    diagnostics: &'a mut Diagnostics,
    options: &'a DecodeOptions,
    timestamp: f64,
    running_status: Option<u8>,
}

impl<'slc, 'a> TrackDecoder<'slc, 'a> {
    pub(crate) fn new(
        reader: Reader<'slc>,
        index: usize,
        clock: &'a mut TempoClock,
        channels: &'a mut Channels,
        diagnostics: &'a mut Diagnostics,
        options: &'a DecodeOptions,
    ) -> Self {
        clock.rewind();
        Self {
            reader,
            index,
            clock,
            channels,
            diagnostics,
            options,
            timestamp: 0.,
            running_status: None,
        }
    }

    /// Decode events until the end of track event or the end of the chunk.
    pub(crate) fn run(mut self) -> ReadResult<TrackEnd> {
        while !self.reader.is_at_end() {
            let delta = self.reader.read_varlen()?;
            self.timestamp += self.clock.advance(delta);

            let status = self.read_status()?;
            let parsed = Status::parse(status).map_err(|k| inv_data(&self.reader, k))?;
            if parsed.is_running() {
                self.running_status = Some(status);
            }

            match parsed {
                Status::Voice { kind, channel } => self.voice_event(kind, channel)?,
                Status::System(SystemKind::Meta) => {
                    if self.meta_event()?.is_break() {
                        return Ok(TrackEnd::EndOfTrack {
                            unread: self.reader.remaining(),
                        });
                    }
                }
                Status::System(kind) => self.system_event(kind)?,
            }
        }

        #[cfg(feature = "tracing")]
        tracing::warn!("track {} has no end of track event", self.index);
        self.diagnostics.tracks_without_end.push(self.index);
        Ok(TrackEnd::Exhausted)
    }

    /// Consumes an explicit status byte, or falls back to running status
    /// without consuming the data byte that was peeked.
    fn read_status(&mut self) -> ReadResult<u8> {
        let next = self.reader.peek_u8()?;
        if next & 0x80 != 0 {
            return self.reader.read_u8();
        }
        self.running_status
            .ok_or_else(|| inv_data(&self.reader, MalformedError::InvalidRunningStatus(next)))
    }

    fn voice_event(&mut self, kind: VoiceKind, channel: Channel) -> ReadResult<()> {
        let now = self.timestamp;
        match kind {
            VoiceKind::NoteOff => {
                let [pitch, _velocity] = self.reader.read_exact_size::<2>()?;
                if let Err(unmatched) = self.channels.get_mut(channel).note_off(now, pitch) {
                    if self.options.strict_note_off() {
                        return Err(inv_data(&self.reader, unmatched));
                    }
                    #[cfg(feature = "tracing")]
                    tracing::warn!("{unmatched}");
                    self.diagnostics.unmatched_note_offs.push(unmatched);
                }
            }
            VoiceKind::NoteOn => {
                let [pitch, velocity] = self.reader.read_exact_size::<2>()?;
                let state = self.channels.get_mut(channel);
                if velocity != 0 {
                    state.note_on(now, pitch, velocity);
                } else if let Err(unmatched) = state.note_off(now, pitch) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("{unmatched} (zero velocity note on)");
                    self.diagnostics.unmatched_note_offs.push(unmatched);
                }
            }
            VoiceKind::ControlChange => {
                let [controller, value] = self.reader.read_exact_size::<2>()?;
                let state = self.channels.get_mut(channel);
                match controller {
                    7 => state.set_volume(now, value, self.options.volume_split_epsilon()),
                    100 | 101 => state.select_rpn(controller, value),
                    _ => {}
                }
            }
            VoiceKind::ProgramChange => {
                let program = self.reader.read_u8()?;
                self.channels.get_mut(channel).program_change(program);
            }
            VoiceKind::PolyPressure | VoiceKind::PitchBend => self.reader.skip(2)?,
            VoiceKind::ChannelPressure => self.reader.skip(1)?,
        }
        Ok(())
    }

    fn system_event(&mut self, kind: SystemKind) -> ReadResult<()> {
        match kind {
            SystemKind::SysEx | SystemKind::SysExContinuation => {
                let len = self.reader.read_varlen()?;
                self.reader.skip(len as usize)?;
                #[cfg(feature = "tracing")]
                tracing::debug!("skipping {len} bytes of system exclusive data");
                self.diagnostics.skipped_events += 1;
            }
            SystemKind::TimeCode => {
                self.reader.skip(1)?;
                #[cfg(feature = "tracing")]
                tracing::debug!("skipping unimplemented MIDI time code quarter frame");
                self.diagnostics.skipped_events += 1;
            }
            SystemKind::SongPosition => {
                self.reader.skip(2)?;
                self.diagnostics.skipped_events += 1;
            }
            SystemKind::SongSelect => {
                let song = self.reader.read_u8()?;
                return Err(inv_data(&self.reader, UnsupportedError::SongSelect(song)));
            }
            SystemKind::TuneRequest => {}
            // meta events are handled by the caller
            SystemKind::Meta => {}
        }
        Ok(())
    }

    fn meta_event(&mut self) -> ReadResult<MetaFlow> {
        let kind = MetaKind::from(self.reader.read_u8()?);
        let len = self.reader.read_varlen()?;

        match kind {
            MetaKind::Text => self.text_event(TextKind::Text, len)?,
            MetaKind::Copyright => self.text_event(TextKind::Copyright, len)?,
            MetaKind::TrackName => self.text_event(TextKind::TrackName, len)?,
            MetaKind::InstrumentName => self.text_event(TextKind::InstrumentName, len)?,
            MetaKind::Lyric => self.text_event(TextKind::Lyric, len)?,
            MetaKind::Marker => self.text_event(TextKind::Marker, len)?,
            MetaKind::CuePoint => self.text_event(TextKind::CuePoint, len)?,
            MetaKind::EndOfTrack => return Ok(MetaFlow::Break),
            MetaKind::SetTempo => self.tempo_event(len)?,
            MetaKind::TimeSignature => {
                let [numerator, log2_denominator, clocks_per_click, thirty_seconds_per_quarter] =
                    self.meta_payload::<4>(0x58, len)?;
                self.diagnostics.time_signatures.push(TimeSignature {
                    timestamp: self.timestamp,
                    numerator,
                    denominator: 1u32.checked_shl(log2_denominator as u32).unwrap_or(u32::MAX),
                    clocks_per_click,
                    thirty_seconds_per_quarter,
                });
            }
            MetaKind::SequenceNumber | MetaKind::ChannelPrefix | MetaKind::SmpteOffset => {
                self.reader.skip(len as usize)?;
            }
            MetaKind::Other(_kind) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("skipping unrecognized meta event {_kind:#04X}");
                self.reader.skip(len as usize)?;
                self.diagnostics.skipped_events += 1;
            }
        }
        Ok(MetaFlow::Continue)
    }

    /// The payload is read as one big-endian number whatever its declared
    /// length. Lengths other than 3 are counted as irregular, and an empty
    /// payload leaves the tempo unchanged.
    fn tempo_event(&mut self, len: u32) -> ReadResult<()> {
        let bytes = self.reader.read(len as usize)?;
        if bytes.len() != 3 {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "track {} has a set tempo event of {len} bytes instead of 3",
                self.index
            );
            self.diagnostics.irregular_tempos += 1;
        }
        if bytes.is_empty() {
            return Ok(());
        }

        let tempo = Tempo::new_from_bytes(bytes);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            "tempo {} us/quarter ({:.2} bpm) at tick {}",
            tempo.micros_per_quarter_note(),
            tempo.bpm(),
            self.clock.tick()
        );
        self.clock.set_tempo(tempo);
        Ok(())
    }

    fn text_event(&mut self, kind: TextKind, len: u32) -> ReadResult<()> {
        let bytes = self.reader.read(len as usize)?;
        let text = String::from_utf8_lossy(bytes).into_owned();
        #[cfg(feature = "tracing")]
        tracing::trace!("track {} {:?}: {text}", self.index, kind);
        self.diagnostics.texts.push(TextEvent {
            track: self.index,
            timestamp: self.timestamp,
            kind,
            text,
        });
        Ok(())
    }

    fn meta_payload<const SIZE: usize>(&mut self, kind: u8, len: u32) -> ReadResult<[u8; SIZE]> {
        if len as usize != SIZE {
            return Err(inv_data(
                &self.reader,
                ReaderErrorKind::MalformedStream(MalformedError::MetaLength {
                    kind,
                    expected: SIZE as u32,
                    found: len,
                }),
            ));
        }
        self.reader.read_exact_size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaFlow {
    Continue,
    Break,
}

impl MetaFlow {
    const fn is_break(&self) -> bool {
        matches!(self, Self::Break)
    }
}
