use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The layout of the tracks in a file, from the header's format field.

Only [`Format::SingleMultiChannel`] and [`Format::Simultaneous`] files can be
decoded. A [`Format::SequentiallyIndependent`] file holds several unrelated
songs and is rejected.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum Format {
    /// Format 0: one track carrying every channel
    SingleMultiChannel = 0,
    /// Format 1: several tracks played together, tempo map in the first
    Simultaneous = 1,
    /// Format 2: independent single-track patterns
    SequentiallyIndependent = 2,
}

impl Format {
    /// True for the formats this crate decodes
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::SequentiallyIndependent)
    }
}
