use alloc::vec::Vec;
use thiserror::Error;

use super::Channel;
use crate::{Event, OpenNote};

/// A note off arrived for a key that the channel was not holding.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("note off for pitch {pitch} on {channel} at {at:.3}s matches no open note")]
pub struct UnmatchedNoteOff {
    /// The channel of the note off
    pub channel: Channel,
    /// The key released
    pub pitch: u8,
    /// When the note off happened, in seconds
    pub at: f64,
}

/// The registered parameter selected by controllers 101 and 100.
///
/// Only recorded; data entry is not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RpnSelector {
    /// Controller 101
    pub msb: Option<u8>,
    /// Controller 100
    pub lsb: Option<u8>,
}

/// Instrument, volume and held notes of one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelState {
    channel: Channel,
    instrument: u8,
    volume: u8,
    rpn: RpnSelector,
    ongoing: Vec<OpenNote>,
    closed: Vec<Event>,
}

impl ChannelState {
    /// Channel volume before any controller 7 message
    pub const DEFAULT_VOLUME: u8 = 100;

    /// A channel with program 0 and volume 100
    pub const fn new(channel: Channel) -> Self {
        Self {
            channel,
            instrument: 0,
            volume: Self::DEFAULT_VOLUME,
            rpn: RpnSelector {
                msb: None,
                lsb: None,
            },
            ongoing: Vec::new(),
            closed: Vec::new(),
        }
    }

    /// Start holding `pitch` at `now`.
    pub fn note_on(&mut self, now: f64, pitch: u8, velocity: u8) {
        self.ongoing.push(OpenNote::new(
            now,
            pitch,
            self.instrument,
            velocity,
            self.volume,
        ));
    }

    /// Release the earliest held note with this pitch.
    pub fn note_off(&mut self, now: f64, pitch: u8) -> Result<(), UnmatchedNoteOff> {
        let Some(index) = self.ongoing.iter().position(|note| note.pitch() == pitch) else {
            return Err(UnmatchedNoteOff {
                channel: self.channel,
                pitch,
                at: now,
            });
        };
        let note = self.ongoing.remove(index);
        self.closed.push(note.close(self.channel, now, 0.));
        Ok(())
    }

    /// Select the instrument for notes started from now on.
    pub fn program_change(&mut self, program: u8) {
        self.instrument = program;
    }

    /// Change the channel volume.
    ///
    /// Every held note is closed at `now` (lengthened by `epsilon`) and
    /// continues as a new note at the new volume, in the same order.
    pub fn set_volume(&mut self, now: f64, volume: u8, epsilon: f64) {
        for note in self.ongoing.iter_mut() {
            self.closed.push(note.close(self.channel, now, epsilon));
            *note = note.retrigger(now, volume);
        }
        self.volume = volume;
    }

    /// Record a registered parameter number selector (controller 101 or 100).
    pub fn select_rpn(&mut self, controller: u8, value: u8) {
        match controller {
            101 => self.rpn.msb = Some(value),
            100 => self.rpn.lsb = Some(value),
            _ => {}
        }
    }

    /// The channel this state belongs to
    pub const fn channel(&self) -> Channel {
        self.channel
    }
    /// The current program
    pub const fn instrument(&self) -> u8 {
        self.instrument
    }
    /// The current volume
    pub const fn volume(&self) -> u8 {
        self.volume
    }
    /// The pending registered parameter selector
    pub const fn rpn(&self) -> RpnSelector {
        self.rpn
    }
    /// Notes started but not yet released
    pub fn ongoing(&self) -> &[OpenNote] {
        &self.ongoing
    }
    /// Finished notes, in the order they were closed
    pub fn closed(&self) -> &[Event] {
        &self.closed
    }
    /// The number of notes still held
    pub fn unclosed(&self) -> usize {
        self.ongoing.len()
    }
    /// Take the finished notes
    pub fn into_closed(self) -> Vec<Event> {
        self.closed
    }
}

/// The sixteen channel states of a decode
#[derive(Debug, Clone, PartialEq)]
pub struct Channels([ChannelState; 16]);

impl Default for Channels {
    fn default() -> Self {
        Self(Channel::ALL.map(ChannelState::new))
    }
}

impl Channels {
    /// The state of `channel`
    pub fn get(&self, channel: Channel) -> &ChannelState {
        &self.0[channel.index()]
    }
    /// The mutable state of `channel`
    pub fn get_mut(&mut self, channel: Channel) -> &mut ChannelState {
        &mut self.0[channel.index()]
    }
    /// All states, in channel order
    pub fn iter(&self) -> impl Iterator<Item = &ChannelState> {
        self.0.iter()
    }
    /// Notes still held across every channel
    pub fn unclosed(&self) -> usize {
        self.0.iter().map(ChannelState::unclosed).sum()
    }
    /// Consume the states in channel order
    pub fn into_states(self) -> [ChannelState; 16] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPSILON: f64 = 0.001;

    fn state() -> ChannelState {
        ChannelState::new(Channel::One)
    }

    #[test]
    fn note_on_then_off_pairs() {
        let mut ch = state();
        ch.note_on(1.0, 60, 90);
        ch.note_off(1.75, 60).unwrap();

        assert_eq!(ch.unclosed(), 0);
        assert_eq!(
            ch.closed(),
            &[Event::new(1.0, 0.75, Channel::One, 60, 0, 90, 100)]
        );
    }

    #[test]
    fn overlapping_same_pitch_closes_first_in_first_out() {
        let mut ch = state();
        ch.note_on(0.0, 64, 10);
        ch.note_on(1.0, 64, 20);
        ch.note_off(2.0, 64).unwrap();
        ch.note_off(4.0, 64).unwrap();

        let closed = ch.closed();
        assert_eq!(closed.len(), 2);
        assert_eq!((closed[0].timestamp(), closed[0].velocity()), (0.0, 10));
        assert_eq!(closed[0].duration(), 2.0);
        assert_eq!((closed[1].timestamp(), closed[1].velocity()), (1.0, 20));
        assert_eq!(closed[1].duration(), 3.0);
    }

    #[test]
    fn note_off_only_matches_its_pitch() {
        let mut ch = state();
        ch.note_on(0.0, 60, 100);
        ch.note_on(0.0, 67, 100);
        ch.note_off(1.0, 67).unwrap();

        assert_eq!(ch.ongoing().len(), 1);
        assert_eq!(ch.ongoing()[0].pitch(), 60);
        assert_eq!(ch.closed()[0].pitch(), 67);
    }

    #[test]
    fn unmatched_note_off_is_reported() {
        let mut ch = ChannelState::new(Channel::Three);
        ch.note_on(0.0, 60, 100);

        let err = ch.note_off(0.5, 61).unwrap_err();
        assert_eq!(
            err,
            UnmatchedNoteOff {
                channel: Channel::Three,
                pitch: 61,
                at: 0.5
            }
        );
        assert_eq!(ch.unclosed(), 1);
        assert!(ch.closed().is_empty());
    }

    #[test]
    fn program_change_only_affects_later_notes() {
        let mut ch = state();
        ch.note_on(0.0, 60, 100);
        ch.program_change(41);
        ch.note_on(0.5, 62, 100);
        ch.note_off(1.0, 60).unwrap();
        ch.note_off(1.0, 62).unwrap();

        assert_eq!(ch.closed()[0].instrument(), 0);
        assert_eq!(ch.closed()[1].instrument(), 41);
    }

    #[test]
    fn volume_change_splits_held_notes() {
        let mut ch = state();
        ch.note_on(1.0, 60, 80);
        ch.set_volume(2.0, 50, EPSILON);
        ch.note_off(3.5, 60).unwrap();

        assert_eq!(
            ch.closed(),
            &[
                Event::new(1.0, 1.0 + EPSILON, Channel::One, 60, 0, 80, 100),
                Event::new(2.0, 1.5, Channel::One, 60, 0, 80, 50),
            ]
        );
    }

    #[test]
    fn volume_change_keeps_held_order() {
        let mut ch = state();
        ch.note_on(0.0, 60, 1);
        ch.note_on(0.0, 60, 2);
        ch.set_volume(1.0, 30, EPSILON);

        let velocities: Vec<u8> = ch.ongoing().iter().map(|n| n.velocity()).collect();
        assert_eq!(velocities, [1, 2]);
        assert_eq!(ch.volume(), 30);

        ch.note_off(2.0, 60).unwrap();
        assert_eq!(ch.closed().last().unwrap().velocity(), 1);
    }

    #[test]
    fn volume_change_with_nothing_held() {
        let mut ch = state();
        ch.set_volume(1.0, 20, EPSILON);
        ch.note_on(2.0, 60, 100);
        ch.note_off(3.0, 60).unwrap();

        assert_eq!(ch.closed().len(), 1);
        assert_eq!(ch.closed()[0].volume(), 20);
    }

    #[test]
    fn duration_never_negative() {
        let mut ch = state();
        ch.note_on(2.0, 60, 100);
        ch.note_off(1.0, 60).unwrap();

        assert_eq!(ch.closed()[0].duration(), 0.0);
    }

    #[test]
    fn rpn_selector_is_recorded() {
        let mut ch = state();
        ch.select_rpn(101, 0);
        ch.select_rpn(100, 2);

        assert_eq!(
            ch.rpn(),
            RpnSelector {
                msb: Some(0),
                lsb: Some(2)
            }
        );
    }

    #[test]
    fn channels_start_with_defaults() {
        let channels = Channels::default();

        for (state, channel) in channels.iter().zip(Channel::ALL) {
            assert_eq!(state.channel(), channel);
            assert_eq!(state.instrument(), 0);
            assert_eq!(state.volume(), 100);
        }
        assert_eq!(channels.unclosed(), 0);
    }
}
