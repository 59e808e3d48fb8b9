use core::fmt;

use crate::channel::Channel;

#[doc = r#"
A single decoded note.

An event is created when its note is closed, either by a note off or by a
volume change splitting the note in two. It never changes afterwards.

All times are in seconds from the start of the track the note was played on.
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    timestamp: f64,
    duration: f64,
    channel: Channel,
    pitch: u8,
    instrument: u8,
    velocity: u8,
    volume: u8,
}

impl Event {
    /// Create a closed event
    pub const fn new(
        timestamp: f64,
        duration: f64,
        channel: Channel,
        pitch: u8,
        instrument: u8,
        velocity: u8,
        volume: u8,
    ) -> Self {
        Self {
            timestamp,
            duration,
            channel,
            pitch,
            instrument,
            velocity,
            volume,
        }
    }
    /// When the note started, in seconds
    #[inline]
    pub const fn timestamp(&self) -> f64 {
        self.timestamp
    }
    /// How long the note sounded, in seconds
    #[inline]
    pub const fn duration(&self) -> f64 {
        self.duration
    }
    /// When the note stopped, in seconds
    #[inline]
    pub fn end(&self) -> f64 {
        self.timestamp + self.duration
    }
    /// The channel the note was played on
    #[inline]
    pub const fn channel(&self) -> Channel {
        self.channel
    }
    /// The key, 0-127. 60 is middle C.
    #[inline]
    pub const fn pitch(&self) -> u8 {
        self.pitch
    }
    /// The program number selected on the channel when the note started
    #[inline]
    pub const fn instrument(&self) -> u8 {
        self.instrument
    }
    /// The note on velocity
    #[inline]
    pub const fn velocity(&self) -> u8 {
        self.velocity
    }
    /// The channel volume (controller 7) while this note sounded
    #[inline]
    pub const fn volume(&self) -> u8 {
        self.volume
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3}s +{:.3}s {} pitch {} program {} vel {} vol {}",
            self.timestamp,
            self.duration,
            self.channel,
            self.pitch,
            self.instrument,
            self.velocity,
            self.volume
        )
    }
}

/// A note that has started but not yet stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenNote {
    timestamp: f64,
    pitch: u8,
    instrument: u8,
    velocity: u8,
    volume: u8,
}

impl OpenNote {
    pub(crate) const fn new(
        timestamp: f64,
        pitch: u8,
        instrument: u8,
        velocity: u8,
        volume: u8,
    ) -> Self {
        Self {
            timestamp,
            pitch,
            instrument,
            velocity,
            volume,
        }
    }
    /// When the note started, in seconds
    pub const fn timestamp(&self) -> f64 {
        self.timestamp
    }
    /// The key of the note
    pub const fn pitch(&self) -> u8 {
        self.pitch
    }
    /// The velocity the note started with
    pub const fn velocity(&self) -> u8 {
        self.velocity
    }

    /// Finish the note at `now`, lengthened by `padding` seconds.
    /// Durations never go negative.
    pub(crate) fn close(self, channel: Channel, now: f64, padding: f64) -> Event {
        let duration = ((now - self.timestamp) + padding).max(0.);
        Event::new(
            self.timestamp,
            duration,
            channel,
            self.pitch,
            self.instrument,
            self.velocity,
            self.volume,
        )
    }

    /// Same note, continuing from `now` at a different volume
    pub(crate) const fn retrigger(&self, now: f64, volume: u8) -> Self {
        Self {
            timestamp: now,
            volume,
            ..*self
        }
    }
}
