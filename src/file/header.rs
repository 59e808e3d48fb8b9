use core::num::NonZeroU16;

use super::Format;
use crate::{
    MalformedError, UnsupportedError,
    reader::{ReadResult, Reader, inv_data},
};

#[doc = r#"
The contents of the `MThd` chunk
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiFileHeader {
    format: Format,
    num_tracks: u16,
    division: NonZeroU16,
}

impl MidiFileHeader {
    /// Create a new header
    pub const fn new(format: Format, num_tracks: u16, division: NonZeroU16) -> Self {
        Self {
            format,
            num_tracks,
            division,
        }
    }

    /// Reads the header chunk, rejecting anything that is not tick based
    /// format 0 or 1.
    ///
    /// Header chunks longer than six bytes are accepted; the extra bytes are skipped.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let id = reader.read_exact_size::<4>()?;
        if &id != b"MThd" {
            return Err(inv_data(reader, MalformedError::MissingHeader(id)));
        }
        let length = reader.read_u32()?;
        if length < 6 {
            return Err(inv_data(reader, MalformedError::HeaderLength(length)));
        }
        let format = reader.read_u16()?;
        let num_tracks = reader.read_u16()?;
        let division = reader.read_u16()?;
        reader.skip(length as usize - 6)?;

        let format = match Format::try_from(format) {
            Ok(format) if format.is_supported() => format,
            Ok(_) => return Err(inv_data(reader, UnsupportedError::MultiSong)),
            Err(_) => return Err(inv_data(reader, UnsupportedError::UnknownFormat(format))),
        };
        if division & 0x8000 != 0 {
            return Err(inv_data(reader, UnsupportedError::Smpte(division)));
        }
        let Some(division) = NonZeroU16::new(division) else {
            return Err(inv_data(reader, MalformedError::ZeroDivision));
        };

        Ok(Self {
            format,
            num_tracks,
            division,
        })
    }

    /// The track layout
    pub const fn format(&self) -> Format {
        self.format
    }
    /// The number of tracks the header promises
    pub const fn num_tracks(&self) -> u16 {
        self.num_tracks
    }
    /// Ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.division.get()
    }
    pub(crate) const fn division(&self) -> NonZeroU16 {
        self.division
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReaderErrorKind;
    use pretty_assertions::assert_eq;

    fn header(length: u32, format: u16, division: u16) -> alloc::vec::Vec<u8> {
        let mut bytes = b"MThd".to_vec();
        bytes.extend(length.to_be_bytes());
        bytes.extend(format.to_be_bytes());
        bytes.extend(2u16.to_be_bytes());
        bytes.extend(division.to_be_bytes());
        bytes.resize(8 + length.max(6) as usize, 0);
        bytes
    }

    fn read(bytes: &[u8]) -> ReadResult<MidiFileHeader> {
        MidiFileHeader::read(&mut Reader::from_byte_slice(bytes))
    }

    #[test]
    fn reads_tick_based_header() {
        let header = read(&header(6, 1, 480)).unwrap();
        assert_eq!(header.format(), Format::Simultaneous);
        assert_eq!(header.num_tracks(), 2);
        assert_eq!(header.ticks_per_quarter_note(), 480);
    }

    #[test]
    fn skips_extended_header() {
        let bytes = header(10, 0, 96);
        let mut reader = Reader::from_byte_slice(&bytes);
        MidiFileHeader::read(&mut reader).unwrap();
        assert_eq!(reader.buffer_position(), 18);
    }

    #[test]
    fn rejects_smpte_division() {
        // -25 fps, 40 ticks per frame
        let err = read(&header(6, 0, 0xE728)).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::UnsupportedFormat(UnsupportedError::Smpte(0xE728))
        ));
    }

    #[test]
    fn rejects_multi_song_format() {
        let err = read(&header(6, 2, 480)).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::UnsupportedFormat(UnsupportedError::MultiSong)
        ));
        let err = read(&header(6, 7, 480)).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::UnsupportedFormat(UnsupportedError::UnknownFormat(7))
        ));
    }

    #[test]
    fn rejects_bad_chunk() {
        let err = read(b"RIFF\0\0\0\x06\0\0\0\x01\x01\xE0").unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::MalformedStream(MalformedError::MissingHeader(id)) if id == b"RIFF"
        ));
        assert!(read(&header(4, 0, 480)[..12]).unwrap_err().is_malformed());
        assert!(read(&header(6, 0, 0)).unwrap_err().is_malformed());
        assert!(read(&header(6, 0, 480)[..11]).unwrap_err().is_out_of_bounds());
    }
}
