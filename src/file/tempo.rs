use alloc::vec::Vec;
use core::num::NonZeroU16;

/// Microseconds per quarter note, as carried by the set tempo meta event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Tempo {
    /// 120 beats per minute, used until a file sets its own tempo
    pub const DEFAULT: Self = Self(500_000);

    /// Create a tempo from microseconds per quarter note
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Create a tempo from the big-endian payload of a set tempo meta event.
    ///
    /// The payload is normally three bytes. Longer payloads keep their low
    /// 32 bits.
    pub fn new_from_bytes(bytes: &[u8]) -> Self {
        Self(
            bytes
                .iter()
                .fold(0u32, |acc, &byte| acc.wrapping_shl(8) | byte as u32),
        )
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Quarter notes per minute
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

/// A tempo change at an absolute tick
#[derive(Debug, Clone, Copy, PartialEq)]
struct TempoChange {
    tick: u64,
    tempo: Tempo,
}

#[doc = r#"
Converts delta ticks into seconds.

The division (ticks per quarter note) is fixed by the file header. The tempo
starts unset, which means [`Tempo::DEFAULT`], and changes whenever a set
tempo meta event is decoded.

Every change is remembered at the tick it happened. After
[`TempoClock::rewind`] a later track replays those changes at the same tick
positions, so the tempo map written into the first track of a format 1 file
governs every track.

# Example
```rust
use core::num::NonZeroU16;
use smf_notes::file::{Tempo, TempoClock};

let mut clock = TempoClock::new(NonZeroU16::new(480).unwrap());
assert_eq!(clock.advance(480), 0.5);

clock.set_tempo(Tempo::new(250_000));
assert_eq!(clock.advance(480), 0.25);
```
"#]
#[derive(Debug, Clone, PartialEq)]
pub struct TempoClock {
    division: NonZeroU16,
    tick: u64,
    /// Sorted by tick. Later changes at an equal tick sort after earlier ones.
    changes: Vec<TempoChange>,
}

impl TempoClock {
    /// A clock at tick zero with no tempo set
    pub const fn new(division: NonZeroU16) -> Self {
        Self {
            division,
            tick: 0,
            changes: Vec::new(),
        }
    }

    /// Ticks per quarter note
    pub const fn division(&self) -> u16 {
        self.division.get()
    }

    /// The tempo in effect at the current tick, if any was set
    pub fn current_tempo(&self) -> Option<Tempo> {
        self.tempo_at(self.tick)
    }

    /// The tempo in effect at the current tick, defaulting to 120 bpm
    pub fn tempo(&self) -> Tempo {
        self.current_tempo().unwrap_or_default()
    }

    /// Beats per minute at the current tick
    pub fn bpm(&self) -> f64 {
        self.tempo().bpm()
    }

    /// Absolute ticks since the last rewind
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Move `delta_ticks` forward, returning the seconds that passed.
    pub fn advance(&mut self, delta_ticks: u32) -> f64 {
        let start = self.tick;
        let end = start + delta_ticks as u64;

        let mut tempo = self.tempo();
        let mut from = start;
        let mut seconds = 0.;
        for change in self
            .changes
            .iter()
            .filter(|change| change.tick > start && change.tick < end)
        {
            seconds += self.seconds(change.tick - from, tempo);
            from = change.tick;
            tempo = change.tempo;
        }
        seconds += self.seconds(end - from, tempo);

        self.tick = end;
        seconds
    }

    /// Change the tempo from the current tick onwards.
    pub fn set_tempo(&mut self, tempo: Tempo) {
        let index = self.changes.partition_point(|c| c.tick <= self.tick);
        self.changes.insert(
            index,
            TempoChange {
                tick: self.tick,
                tempo,
            },
        );
    }

    /// Return to tick zero for the next track, keeping every recorded change.
    pub fn rewind(&mut self) {
        self.tick = 0;
    }

    fn tempo_at(&self, tick: u64) -> Option<Tempo> {
        let index = self.changes.partition_point(|c| c.tick <= tick);
        index.checked_sub(1).map(|i| self.changes[i].tempo)
    }

    fn seconds(&self, ticks: u64, tempo: Tempo) -> f64 {
        ticks as f64 * tempo.micros_per_quarter_note() as f64
            / 1_000_000.
            / self.division.get() as f64
    }
}
