//! Protocol-matching waveform decoder.
//!
//! Given a captured timing frame and a candidate protocol, validate the
//! frame against the protocol's ratios and extract the code. The decoder is
//! a pure function over the frame; the capture state machine decides *when*
//! to call it and with which protocols.

use crate::protocol::Protocol;

/// Result of a successful decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decoded {
    /// The extracted code, most significant bit first.
    pub code: u64,
    /// Number of data bits in the frame.
    pub bit_length: u8,
    /// Base pulse length derived from the sync gap, in microseconds.
    pub pulse_len_us: u32,
}

/// Try to decode a captured frame as the given protocol.
///
/// `timings[0]` must hold the sync-gap duration and `timings[1..change_count]`
/// the (high, low) pairs of the data bits, all in microseconds. The base
/// pulse length is derived from the observed sync gap, so a remote running
/// faster or slower than the catalog default still decodes; `tolerance_percent`
/// scales the acceptance window around each expected segment duration.
///
/// Returns `None` when the frame does not match this protocol: any timing
/// pair outside both the `0` and `1` windows fails the whole frame
/// immediately. Frames shorter than 3 data bits and frames decoding to an
/// all-zero code are rejected as noise. The caller is expected to iterate
/// candidate protocols; a mismatch here carries no information about the
/// other protocols.
#[must_use]
pub fn try_decode(
    protocol_id: u8,
    timings: &[u32],
    change_count: usize,
    tolerance_percent: u32,
) -> Option<Decoded> {
    let protocol = Protocol::by_id(protocol_id)?;
    if change_count == 0 {
        return None;
    }

    let unit = timings.first()? / protocol.sync_low;
    let window = unit * tolerance_percent / 100;

    let zero_high = protocol.zero_high * unit;
    let zero_low = protocol.zero_low * unit;
    let one_high = protocol.one_high * unit;
    let one_low = protocol.one_low * unit;

    let mut code: u64 = 0;
    let mut i = 1;
    while i < change_count {
        let high = *timings.get(i)?;
        let low = *timings.get(i + 1)?;

        if high.abs_diff(zero_high) < window && low.abs_diff(zero_low) < window {
            code <<= 1;
        } else if high.abs_diff(one_high) < window && low.abs_diff(one_low) < window {
            code = (code << 1) | 1;
        } else {
            return None;
        }
        i += 2;
    }

    // Anything shorter than 3 data bits or decoding to all zeros is noise.
    if change_count > 6 && code != 0 {
        Some(Decoded {
            code,
            bit_length: (change_count / 2) as u8,
            pulse_len_us: unit,
        })
    } else {
        None
    }
}
