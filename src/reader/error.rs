use super::Reader;
use crate::channel::UnmatchedNoteOff;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a midi file.

Every error is fatal: the decode is abandoned and no events are returned.
"#]
#[derive(Debug, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The file asks for something this decoder does not do
    #[error("Unsupported {0}")]
    UnsupportedFormat(#[from] UnsupportedError),
    /// The bytes do not form a valid midi stream
    #[error("Malformed stream: {0}")]
    MalformedStream(#[from] MalformedError),
    /// Reading out of bounds.
    #[error("Read out of bounds!")]
    TruncatedStream,
    /// An explicit note off had no open note to close
    #[error("{0}")]
    UnmatchedNoteOff(#[from] UnmatchedNoteOff),
}

/// Features of the file format that are recognized but rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedError {
    /// The header division uses SMPTE frames instead of ticks per quarter note
    #[error("SMPTE timing (division {0:#06X})")]
    Smpte(u16),
    /// Format 2 files hold several independent songs
    #[error("multiple song file format")]
    MultiSong,
    /// A format number outside of 0-2
    #[error("file format {0}")]
    UnknownFormat(u16),
    /// The song select system message
    #[error("song select (song {0})")]
    SongSelect(u8),
}

/// Ways a byte stream can fail to be a midi file
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedError {
    /// The file did not start with `MThd`
    #[error("expected MThd header, found {0:?}")]
    MissingHeader([u8; 4]),
    /// The header chunk is shorter than the six bytes it must hold
    #[error("header length {0} is less than 6")]
    HeaderLength(u32),
    /// Zero ticks per quarter note
    #[error("division of zero ticks per quarter note")]
    ZeroDivision,
    /// A data byte appeared where a status byte was expected and no running status exists
    #[error("data byte {0:#04X} with no running status")]
    InvalidRunningStatus(u8),
    /// A channel voice status nibble outside of 0x8-0xE
    ///
    /// Decoding a file never produces this: every byte read as a status has
    /// its high bit set, and running status only holds channel voice statuses.
    #[error("unexpected event type {0:#03X}")]
    UnexpectedEventType(u8),
    /// A system status byte with no defined meaning
    #[error("undefined event {0:#04X}")]
    UndefinedEvent(u8),
    /// A meta event whose payload length is wrong for its type
    #[error("meta event {kind:#04X} expects {expected} bytes, found {found}")]
    MetaLength {
        /// The meta event type byte
        kind: u8,
        /// The length the type requires
        expected: u32,
        /// The declared length
        found: u32,
    },
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if out of bounds or unexpected end of file
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::TruncatedStream)
    }
    /// True if the file uses a feature this decoder rejects
    pub const fn is_unsupported(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::UnsupportedFormat(_))
    }
    /// True if the stream is not valid midi
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::MalformedStream(_))
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the absolute file offset where the error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::TruncatedStream,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

pub(crate) fn inv_data(reader: &Reader<'_>, v: impl Into<ReaderErrorKind>) -> ReaderError {
    ReaderError::new(reader.buffer_position(), v.into())
}
