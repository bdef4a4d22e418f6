//! Edge-driven capture state machine.
//!
//! One [`EdgeCapture::edge`] call per GPIO transition on the receive pin.
//! The call is allocation-free and bounded, so it is safe to make from
//! interrupt-priority code; everything variable-length (listener dispatch)
//! happens later, outside that context, on the [`ReceivedCode`] snapshot
//! this returns.
//!
//! Frames are delimited by long idle gaps. Rather than attempting a full
//! protocol match on every frame, capture waits for two consecutive gaps of
//! the same length: remotes repeat their frame while a button is held, so a
//! repeated sync gap is a cheap beacon that a complete, stable frame sits in
//! the buffer, and single-shot noise never reaches the decoder.

use crate::decode;
use crate::message::ReceivedCode;
use crate::protocol::PROTOCOL_COUNT;

/// Maximum number of edges in one captured frame. Longer frames are
/// discarded and capture restarts.
pub const MAX_CHANGES: usize = 67;

/// Default decode tolerance, in percent of the derived base pulse length.
pub const DEFAULT_TOLERANCE: u32 = 80;

/// An edge interval longer than this marks a frame boundary, in
/// microseconds.
const SYNC_GAP_MIN_US: u32 = 5000;

/// Two frame gaps within this many microseconds of each other count as the
/// same sync beacon.
const SYNC_MATCH_US: u32 = 200;

/// Consecutive matching sync gaps required before decode is attempted.
const REPEATS_FOR_DECODE: u8 = 2;

/// Capture state for one receive pin.
///
/// Owned by whatever context services the pin's edges; nothing here is
/// shared or locked. On a platform where edges arrive on a different core
/// than the consumer runs on, hand the returned [`ReceivedCode`] values off
/// through an explicit single-producer channel instead of sharing this
/// struct.
pub struct EdgeCapture {
    timings: [u32; MAX_CHANGES + 1],
    last_edge_us: u64,
    change_count: usize,
    repeat_count: u8,
    tolerance: u32,
}

impl EdgeCapture {
    /// New capture state with the default tolerance.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// New capture state with an explicit tolerance percentage.
    #[must_use]
    pub const fn with_tolerance(tolerance: u32) -> Self {
        Self {
            timings: [0; MAX_CHANGES + 1],
            last_edge_us: 0,
            change_count: 0,
            repeat_count: 0,
            tolerance,
        }
    }

    /// Record one edge at monotonic time `now_us` and return a decoded
    /// message if this edge completed one.
    ///
    /// Durations are measured between successive calls; the timestamp
    /// source may wrap, wrapping subtraction keeps the deltas correct.
    pub fn edge(&mut self, now_us: u64) -> Option<ReceivedCode> {
        let duration = now_us.wrapping_sub(self.last_edge_us);
        self.last_edge_us = now_us;
        let duration = duration.min(u64::from(u32::MAX)) as u32;

        let mut decoded = None;
        if duration > SYNC_GAP_MIN_US {
            if duration.abs_diff(self.timings[0]) < SYNC_MATCH_US {
                self.repeat_count += 1;
                // The edge before this gap was the sync waveform's high
                // phase, not a data edge; un-count it so the frame under
                // test ends on the last data pair.
                self.change_count = self.change_count.saturating_sub(1);
                if self.repeat_count == REPEATS_FOR_DECODE {
                    decoded = self.try_protocols(now_us);
                    self.repeat_count = 0;
                }
            }
            // This gap becomes the new frame's candidate sync at index 0.
            self.change_count = 0;
        }

        if self.change_count >= MAX_CHANGES {
            self.change_count = 0;
            self.repeat_count = 0;
        }
        self.timings[self.change_count] = duration;
        self.change_count += 1;

        decoded
    }

    fn try_protocols(&self, now_us: u64) -> Option<ReceivedCode> {
        for id in 1..=PROTOCOL_COUNT as u8 {
            if let Some(decoded) =
                decode::try_decode(id, &self.timings, self.change_count, self.tolerance)
            {
                return Some(ReceivedCode {
                    code: decoded.code,
                    timestamp_us: now_us,
                    bit_length: decoded.bit_length,
                    pulse_len_us: decoded.pulse_len_us,
                    protocol_id: id,
                });
            }
        }
        None
    }
}

impl Default for EdgeCapture {
    fn default() -> Self {
        Self::new()
    }
}
