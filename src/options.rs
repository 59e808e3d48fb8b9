/// Settings for a [`MidiDecoder`](crate::file::MidiDecoder).
///
/// # Example
/// ```rust
/// use smf_notes::prelude::*;
///
/// let options = DecodeOptions::new()
///     .with_volume_split_epsilon(0.)
///     .with_strict_note_off(false);
/// let decoder = MidiDecoder::new(options);
/// # let _ = decoder;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeOptions {
    volume_split_epsilon: f64,
    strict_note_off: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    /// One millisecond
    pub const DEFAULT_VOLUME_SPLIT_EPSILON: f64 = 0.001;

    /// The default options
    pub const fn new() -> Self {
        Self {
            volume_split_epsilon: Self::DEFAULT_VOLUME_SPLIT_EPSILON,
            strict_note_off: true,
        }
    }

    /// Seconds added to a note that is cut short by a volume change, so the
    /// segment before the change never has zero length.
    pub const fn with_volume_split_epsilon(mut self, seconds: f64) -> Self {
        self.volume_split_epsilon = seconds;
        self
    }

    /// When true (the default) an explicit note off with no matching open
    /// note fails the decode. When false it is only reported in the
    /// diagnostics. Note ons with velocity zero are always tolerated.
    pub const fn with_strict_note_off(mut self, strict: bool) -> Self {
        self.strict_note_off = strict;
        self
    }

    /// See [`DecodeOptions::with_volume_split_epsilon`]
    pub const fn volume_split_epsilon(&self) -> f64 {
        self.volume_split_epsilon
    }

    /// See [`DecodeOptions::with_strict_note_off`]
    pub const fn strict_note_off(&self) -> bool {
        self.strict_note_off
    }
}
