use alloc::vec::Vec;

use crate::{Event, channel::Channels};

/// Merges the closed notes of every channel into one timeline.
pub struct EventCollector;

impl EventCollector {
    /// Returns every closed event sorted by timestamp, and the number of notes
    /// that were never closed.
    ///
    /// The sort is stable: equal timestamps keep channel order, then the order
    /// the notes were closed in.
    pub fn collect(channels: Channels) -> (Vec<Event>, usize) {
        let unclosed = channels.unclosed();
        let mut events: Vec<Event> = channels
            .into_states()
            .into_iter()
            .flat_map(|state| state.into_closed())
            .collect();
        events.sort_by(|a, b| a.timestamp().total_cmp(&b.timestamp()));
        (events, unclosed)
    }
}
