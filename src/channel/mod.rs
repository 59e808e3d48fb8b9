#![doc = r#"
Per-channel note tracking

# Overview

A midi stream multiplexes sixteen channels. Each channel remembers the
program (instrument) and volume it was last given, and which notes it is
currently holding. Note offs do not say which note on they end, only the key,
so a [`ChannelState`] pairs them up first in, first out.

```text
  note on C4 ──┐                 ┌── note off C4
               │  ongoing: [C4]  │
               └────────────────►└──► closed: [Event C4]
```
"#]

mod state;
pub use state::*;

use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
One of the sixteen midi channels.

Channels are numbered from one when shown to people, but stored from zero
in status bytes: `Channel::One` is the low nibble `0x0`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// All channels in order
    pub const ALL: [Channel; 16] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Eleven,
        Self::Twelve,
        Self::Thirteen,
        Self::Fourteen,
        Self::Fifteen,
        Self::Sixteen,
    ];

    /// The channel addressed by the low nibble of a status byte
    #[inline]
    pub const fn from_status(status: u8) -> Self {
        Self::ALL[(status & 0x0F) as usize]
    }

    /// Zero based index, 0-15
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.index() + 1)
    }
}

#[test]
fn channel_from_status_nibble() {
    assert_eq!(Channel::from_status(0x90), Channel::One);
    assert_eq!(Channel::from_status(0x99), Channel::Ten);
    assert_eq!(Channel::from_status(0xCF), Channel::Sixteen);
    assert_eq!(u8::from(Channel::Sixteen), 15);
    assert_eq!(Channel::try_from(3u8).unwrap(), Channel::Four);
    assert!(Channel::try_from(16u8).is_err());
}
