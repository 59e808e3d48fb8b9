use num_enum::{FromPrimitive, TryFromPrimitive};

use crate::{MalformedError, channel::Channel, reader::ReaderErrorKind};

/// The high nibble of a channel voice status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub(crate) enum VoiceKind {
    NoteOff = 0x8,
    NoteOn = 0x9,
    PolyPressure = 0xA,
    ControlChange = 0xB,
    ProgramChange = 0xC,
    ChannelPressure = 0xD,
    PitchBend = 0xE,
}

/// The low nibble of a `0xF_` status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub(crate) enum SystemKind {
    SysEx = 0x0,
    TimeCode = 0x1,
    SongPosition = 0x2,
    SongSelect = 0x3,
    TuneRequest = 0x6,
    SysExContinuation = 0x7,
    Meta = 0xF,
}

/// The type byte following `0xFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub(crate) enum MetaKind {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ChannelPrefix = 0x20,
    EndOfTrack = 0x2F,
    SetTempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    #[num_enum(catch_all)]
    Other(u8),
}

/// A decoded status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Voice { kind: VoiceKind, channel: Channel },
    System(SystemKind),
}

impl Status {
    /// Classify a status byte.
    ///
    /// The track decoder only passes bytes with the high bit set, so the
    /// `UnexpectedEventType` error is only reachable by calling this directly
    /// with a data byte.
    pub(crate) fn parse(status: u8) -> Result<Self, ReaderErrorKind> {
        let event_type = status >> 4;
        if event_type == 0xF {
            return SystemKind::try_from(status & 0x0F)
                .map(Self::System)
                .map_err(|_| MalformedError::UndefinedEvent(status).into());
        }
        let kind = VoiceKind::try_from(event_type)
            .map_err(|_| MalformedError::UnexpectedEventType(event_type))?;
        Ok(Self::Voice {
            kind,
            channel: Channel::from_status(status),
        })
    }

    /// Only channel voice messages may be repeated by running status
    pub(crate) const fn is_running(&self) -> bool {
        matches!(self, Self::Voice { .. })
    }
}
