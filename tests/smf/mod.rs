//! Builds Standard MIDI File byte streams for tests.
#![allow(dead_code)]

use smf_notes::reader::encode_varlen;

pub struct Smf {
    bytes: Vec<u8>,
}

impl Smf {
    pub fn new(format: u16, num_tracks: u16, division: u16) -> Self {
        let mut bytes = b"MThd".to_vec();
        bytes.extend(6u32.to_be_bytes());
        bytes.extend(format.to_be_bytes());
        bytes.extend(num_tracks.to_be_bytes());
        bytes.extend(division.to_be_bytes());
        Self { bytes }
    }

    pub fn track(self, track: Track) -> Self {
        self.chunk(*b"MTrk", &track.bytes)
    }

    /// A track chunk whose declared length is `padding` bytes longer than its events
    pub fn padded_track(self, track: Track, padding: usize) -> Self {
        let mut data = track.bytes;
        data.resize(data.len() + padding, 0);
        self.chunk(*b"MTrk", &data)
    }

    pub fn chunk(mut self, tag: [u8; 4], data: &[u8]) -> Self {
        self.bytes.extend(tag);
        self.bytes.extend((data.len() as u32).to_be_bytes());
        self.bytes.extend(data);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Default)]
pub struct Track {
    bytes: Vec<u8>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes after a delta time
    pub fn raw(mut self, delta: u32, event: &[u8]) -> Self {
        self.bytes.extend(encode_varlen(delta));
        self.bytes.extend(event);
        self
    }

    pub fn note_on(self, delta: u32, channel: u8, pitch: u8, velocity: u8) -> Self {
        self.raw(delta, &[0x90 | channel, pitch, velocity])
    }

    pub fn note_off(self, delta: u32, channel: u8, pitch: u8) -> Self {
        self.raw(delta, &[0x80 | channel, pitch, 0x40])
    }

    pub fn volume(self, delta: u32, channel: u8, volume: u8) -> Self {
        self.raw(delta, &[0xB0 | channel, 7, volume])
    }

    pub fn program(self, delta: u32, channel: u8, program: u8) -> Self {
        self.raw(delta, &[0xC0 | channel, program])
    }

    pub fn tempo(self, delta: u32, micros_per_quarter: u32) -> Self {
        let [_, a, b, c] = micros_per_quarter.to_be_bytes();
        self.raw(delta, &[0xFF, 0x51, 0x03, a, b, c])
    }

    pub fn meta(self, delta: u32, kind: u8, data: &[u8]) -> Self {
        let mut event = vec![0xFF, kind];
        event.extend(encode_varlen(data.len() as u32));
        event.extend(data);
        self.raw(delta, &event)
    }

    pub fn end(self, delta: u32) -> Self {
        self.raw(delta, &[0xFF, 0x2F, 0x00])
    }
}
