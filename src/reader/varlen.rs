use super::{ReadResult, Reader};
use alloc::vec::Vec;

impl Reader<'_> {
    /// Decodes a variable length quantity.
    ///
    /// Each byte carries seven bits, most significant group first. A set high
    /// bit means another byte follows. The number of bytes is not capped;
    /// groups beyond the 32nd bit are shifted out.
    pub fn read_varlen(&mut self) -> ReadResult<u32> {
        let mut result: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            result = (result << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
    }
}

/// Encodes a value as the shortest variable length quantity.
///
/// Values up to `0x0FFF_FFFF` fit in the four bytes midi files allow.
pub fn encode_varlen(mut value: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(5);
    bytes.push((value & 0x7F) as u8);
    value >>= 7;
    while value > 0 {
        bytes.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes.reverse();
    bytes
}
