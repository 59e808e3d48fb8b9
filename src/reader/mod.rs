#![doc = r#"
Byte level access to a midi file

[`Reader`] is a forward cursor over a borrowed byte buffer. Everything else in
the crate reads through it, so every failure can name the absolute offset in
the file where it happened, even while decoding a single track chunk.
"#]

mod error;
pub use error::*;

mod varlen;
pub use varlen::*;

/// A forward reader over a byte buffer.
///
/// Reads past the end of the buffer fail with
/// [`ReaderErrorKind::TruncatedStream`].
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
    /// Absolute offset of `data[0]` within the file
    offset: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader at the start of a byte slice
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self {
            data,
            position: 0,
            offset: 0,
        }
    }

    /// Absolute position of the reader within the file
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.offset + self.position
    }

    /// Number of unread bytes
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True if every byte has been read
    #[inline]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Move to an absolute position within the file.
    ///
    /// Seeking to the very end is allowed, anything further is out of bounds.
    pub fn seek(&mut self, to: usize) -> ReadResult<()> {
        match to.checked_sub(self.offset) {
            Some(local) if local <= self.data.len() => {
                self.position = local;
                Ok(())
            }
            _ => Err(ReaderError::oob(to)),
        }
    }

    /// Returns the next `n` bytes and advances past them.
    pub fn read(&mut self, n: usize) -> ReadResult<&'slc [u8]> {
        if n > self.remaining() {
            return Err(ReaderError::oob(self.buffer_position()));
        }
        let start = self.position;
        self.position += n;
        Ok(&self.data[start..self.position])
    }

    /// Advances past `n` bytes without looking at them
    #[inline]
    pub fn skip(&mut self, n: usize) -> ReadResult<()> {
        self.read(n).map(|_| ())
    }

    /// Reads exactly `SIZE` bytes into an array
    pub fn read_exact_size<const SIZE: usize>(&mut self) -> ReadResult<[u8; SIZE]> {
        let mut bytes = [0; SIZE];
        bytes.copy_from_slice(self.read(SIZE)?);
        Ok(bytes)
    }

    /// Reads one byte
    #[inline]
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size::<1>()?;
        Ok(byte)
    }

    /// Reads a big-endian u16
    #[inline]
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Reads a big-endian u32
    #[inline]
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Returns the next byte without advancing
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or_else(|| ReaderError::oob(self.buffer_position()))
    }

    /// Consumes the next `n` bytes and returns a reader over only those bytes.
    ///
    /// Positions reported by the returned reader remain absolute.
    pub fn sub_reader(&mut self, n: usize) -> ReadResult<Reader<'slc>> {
        let offset = self.buffer_position();
        let data = self.read(n)?;
        Ok(Reader {
            data,
            position: 0,
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_advance_the_position() {
        let mut reader = Reader::from_byte_slice(&[1, 2, 3, 4, 5, 6, 7]);

        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_u16().unwrap(), 0x0203);
        assert_eq!(reader.read_u32().unwrap(), 0x0405_0607);
        assert_eq!(reader.buffer_position(), 7);
        assert!(reader.is_at_end());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut reader = Reader::from_byte_slice(&[0x90, 0x3C]);

        assert_eq!(reader.peek_u8().unwrap(), 0x90);
        assert_eq!(reader.peek_u8().unwrap(), 0x90);
        assert_eq!(reader.read_u8().unwrap(), 0x90);
        assert_eq!(reader.peek_u8().unwrap(), 0x3C);
    }

    #[test]
    fn short_read_is_out_of_bounds() {
        let mut reader = Reader::from_byte_slice(&[0, 0, 0]);

        let err = reader.read_u32().unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.position(), 0);
        // a failed read leaves the cursor where it was
        assert_eq!(reader.remaining(), 3);

        reader.skip(3).unwrap();
        assert!(reader.peek_u8().unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn seek_within_bounds() {
        let mut reader = Reader::from_byte_slice(&[0; 8]);

        reader.seek(8).unwrap();
        assert!(reader.is_at_end());
        reader.seek(2).unwrap();
        assert_eq!(reader.remaining(), 6);
        assert!(reader.seek(9).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn sub_reader_reports_absolute_positions() {
        let bytes = [0xAA, 0xBB, 1, 2, 3, 0xCC];
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.skip(2).unwrap();

        let mut track = reader.sub_reader(3).unwrap();
        assert_eq!(reader.buffer_position(), 5);
        assert_eq!(track.buffer_position(), 2);

        assert_eq!(track.read(3).unwrap(), &[1, 2, 3]);
        let err = track.read_u8().unwrap_err();
        assert_eq!(err.position(), 5);

        track.seek(3).unwrap();
        assert_eq!(track.read_u8().unwrap(), 2);
        assert!(track.seek(1).is_err());
    }
}
