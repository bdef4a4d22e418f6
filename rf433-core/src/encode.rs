//! Pulse-train rendering for transmission.
//!
//! [`Waveform`] turns a code into the exact sequence of (high, low)
//! microsecond pairs a transmit driver has to put on the output pin,
//! including frame repetition and the per-pass sync waveforms. Rendering is
//! allocation-free; the driver pulls one [`Pulse`] at a time and owns all
//! actual timing.

use crate::protocol::{Protocol, NEXA_PROTOCOL_ID};

/// Upper bound on wire bits in one pass (the bit accumulator is a `u64`).
pub const MAX_TX_BITS: u8 = 64;

/// Codes above this need more than 24 bits on the wire.
const MAX_24_BIT_CODE: u64 = 16_777_216;

/// One transmitted segment: carrier on for `high_us`, then off for
/// `low_us`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    /// High-phase duration in microseconds.
    pub high_us: u32,
    /// Low-phase duration in microseconds.
    pub low_us: u32,
}

/// Error type for waveform rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The requested protocol id is outside the catalog.
    UnknownProtocol,
}

/// Number of wire bits used for `code` when the caller did not force one.
///
/// The default frame is 24 bits. Protocol 6 always uses a 32-bit source
/// frame, and any code too large for 24 bits widens to 32 automatically.
/// An explicit length always wins, even when the code does not fit it.
#[must_use]
pub fn resolve_bit_length(code: u64, protocol_id: u8, explicit: Option<u8>) -> u8 {
    match explicit {
        Some(length) => length,
        None if protocol_id == NEXA_PROTOCOL_ID => 32,
        None if code > MAX_24_BIT_CODE => 32,
        None => 24,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    LeadSync,
    Bit(u8),
    TailSync,
    Done,
}

/// Iterator over the pulse train for one complete transmission.
///
/// Each pass renders the code most-significant-bit first, one pulse per
/// wire bit, followed by a trailing sync pulse whose long low phase is the
/// inter-frame gap the receive side locks onto. Protocol 6 additionally
/// starts every pass with a sync pulse and line-codes the source bits
/// (`0` -> `01`, `1` -> `10`), doubling the wire bit count.
#[derive(Debug)]
pub struct Waveform {
    protocol: &'static Protocol,
    pulse_len_us: u32,
    /// Wire bits, MSB-first in the low `bit_length` bits.
    bits: u64,
    bit_length: u8,
    passes_left: u8,
    lead_sync: bool,
    stage: Stage,
}

impl Waveform {
    /// Render `code` for transmission.
    ///
    /// `pulse_len_us` and `bit_length` default per the protocol and
    /// [`resolve_bit_length`] when `None`. `repeat` is the number of
    /// complete passes; remotes send several so receivers can use the
    /// repeated sync gap as a beacon.
    pub fn new(
        code: u64,
        protocol_id: u8,
        pulse_len_us: Option<u32>,
        bit_length: Option<u8>,
        repeat: u8,
    ) -> Result<Self, EncodeError> {
        let protocol = Protocol::by_id(protocol_id).ok_or(EncodeError::UnknownProtocol)?;

        let mut bit_length = resolve_bit_length(code, protocol_id, bit_length);
        let mut bits = code;
        let lead_sync = protocol_id == NEXA_PROTOCOL_ID;
        if lead_sync {
            // Line coding: each source bit becomes two wire bits.
            bit_length = bit_length.min(MAX_TX_BITS / 2);
            let mut doubled = 0u64;
            for i in (0..bit_length).rev() {
                let symbol = if (code >> i) & 1 == 1 { 0b10 } else { 0b01 };
                doubled = (doubled << 2) | symbol;
            }
            bits = doubled;
            bit_length *= 2;
        } else {
            bit_length = bit_length.min(MAX_TX_BITS);
        }

        let stage = match (repeat, lead_sync) {
            (0, _) => Stage::Done,
            (_, true) => Stage::LeadSync,
            (_, false) => Stage::Bit(0),
        };

        Ok(Self {
            protocol,
            pulse_len_us: pulse_len_us.unwrap_or(protocol.pulse_len_us),
            bits,
            bit_length,
            passes_left: repeat,
            lead_sync,
            stage,
        })
    }

    /// Number of wire bits per pass (after any line coding).
    #[inline]
    #[must_use]
    pub const fn bit_length(&self) -> u8 {
        self.bit_length
    }

    /// Effective base pulse length in microseconds.
    #[inline]
    #[must_use]
    pub const fn pulse_len_us(&self) -> u32 {
        self.pulse_len_us
    }

    fn pulse(&self, (high, low): (u32, u32)) -> Pulse {
        Pulse {
            high_us: high * self.pulse_len_us,
            low_us: low * self.pulse_len_us,
        }
    }
}

impl Iterator for Waveform {
    type Item = Pulse;

    fn next(&mut self) -> Option<Pulse> {
        loop {
            match self.stage {
                Stage::Done => return None,
                Stage::LeadSync => {
                    self.stage = Stage::Bit(0);
                    return Some(self.pulse(self.protocol.sync()));
                }
                Stage::Bit(i) if i < self.bit_length => {
                    self.stage = Stage::Bit(i + 1);
                    let one = (self.bits >> (self.bit_length - 1 - i)) & 1 == 1;
                    let ratios = if one {
                        self.protocol.one()
                    } else {
                        self.protocol.zero()
                    };
                    return Some(self.pulse(ratios));
                }
                Stage::Bit(_) => self.stage = Stage::TailSync,
                Stage::TailSync => {
                    self.passes_left -= 1;
                    self.stage = if self.passes_left == 0 {
                        Stage::Done
                    } else if self.lead_sync {
                        Stage::LeadSync
                    } else {
                        Stage::Bit(0)
                    };
                    return Some(self.pulse(self.protocol.sync()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;

    fn symbol(protocol: &Protocol, pulse_len_us: u32, bit: u8) -> Pulse {
        let (high, low) = if bit == 0 {
            protocol.zero()
        } else {
            protocol.one()
        };
        Pulse {
            high_us: high * pulse_len_us,
            low_us: low * pulse_len_us,
        }
    }

    fn sync(protocol: &Protocol, pulse_len_us: u32) -> Pulse {
        let (high, low) = protocol.sync();
        Pulse {
            high_us: high * pulse_len_us,
            low_us: low * pulse_len_us,
        }
    }

    #[test]
    fn test_default_bit_lengths() {
        assert_eq!(resolve_bit_length(0x1, 1, None), 24);
        assert_eq!(resolve_bit_length(0x00FF_FFFF, 1, None), 24);
        // Widening kicks in strictly above 2^24.
        assert_eq!(resolve_bit_length(16_777_216, 1, None), 24);
        assert_eq!(resolve_bit_length(16_777_217, 1, None), 32);
        // Protocol 6 always takes a 32-bit source frame.
        assert_eq!(resolve_bit_length(0x1, 6, None), 32);
        // An explicit length beats all of the above.
        assert_eq!(resolve_bit_length(0x0102_0304, 1, Some(24)), 24);
        assert_eq!(resolve_bit_length(0x1, 1, Some(8)), 8);
    }

    #[test]
    fn test_single_pass_pulse_sequence() {
        let protocol = Protocol::by_id(1).unwrap();
        let pulses: Vec<Pulse> = Waveform::new(0b101, 1, None, Some(3), 1)
            .unwrap()
            .collect();
        assert_eq!(
            pulses,
            std::vec![
                symbol(protocol, 350, 1),
                symbol(protocol, 350, 0),
                symbol(protocol, 350, 1),
                sync(protocol, 350),
            ]
        );
    }

    #[test]
    fn test_repeat_pass_count() {
        let wave = Waveform::new(0x00A5_A5A5, 1, None, None, 10).unwrap();
        // 24 bit pulses plus one trailing sync, per pass.
        assert_eq!(wave.count(), 10 * 25);

        let wave = Waveform::new(0x0102_0304, 6, None, None, 2).unwrap();
        // Leading sync, 64 wire bits, trailing sync, per pass.
        assert_eq!(wave.count(), 2 * 66);
    }

    #[test]
    fn test_msb_first_rendering() {
        let protocol = Protocol::by_id(1).unwrap();
        let pulses: Vec<Pulse> = Waveform::new(0b1000, 1, None, Some(4), 1)
            .unwrap()
            .collect();
        assert_eq!(pulses[0], symbol(protocol, 350, 1));
        assert_eq!(pulses[1], symbol(protocol, 350, 0));
        assert_eq!(pulses[2], symbol(protocol, 350, 0));
        assert_eq!(pulses[3], symbol(protocol, 350, 0));
    }

    #[test]
    fn test_line_coding_doubles_bits() {
        // Source 0110 goes on the wire as 01 10 10 01.
        let protocol = Protocol::by_id(6).unwrap();
        let wave = Waveform::new(0b0110, 6, None, Some(4), 1).unwrap();
        assert_eq!(wave.bit_length(), 8);

        let pulses: Vec<Pulse> = wave.collect();
        let expected_bits = [0, 1, 1, 0, 1, 0, 0, 1];
        assert_eq!(pulses.len(), 1 + expected_bits.len() + 1);
        assert_eq!(pulses[0], sync(protocol, 200));
        for (pulse, &bit) in pulses[1..9].iter().zip(expected_bits.iter()) {
            assert_eq!(*pulse, symbol(protocol, 200, bit));
        }
        assert_eq!(pulses[9], sync(protocol, 200));
    }

    #[test]
    fn test_line_coding_full_width() {
        let wave = Waveform::new(0x0102_0304, 6, None, None, 1).unwrap();
        assert_eq!(wave.bit_length(), 64);

        // The expansion maps every source bit to a distinct wire pair, so
        // reading wire bits back in pairs must reproduce the source.
        let protocol = Protocol::by_id(6).unwrap();
        let wire: Vec<u8> = wave
            .collect::<Vec<_>>()[1..65]
            .iter()
            .map(|p| u8::from(*p == symbol(protocol, 200, 1)))
            .collect();
        let mut source = 0u64;
        for pair in wire.chunks(2) {
            assert!(pair == [0, 1] || pair == [1, 0]);
            source = (source << 1) | u64::from(pair[0]);
        }
        assert_eq!(source, 0x0102_0304);
    }

    #[test]
    fn test_pulse_length_override() {
        let protocol = Protocol::by_id(2).unwrap();
        let pulses: Vec<Pulse> = Waveform::new(0b111, 2, Some(1000), Some(3), 1)
            .unwrap()
            .collect();
        assert_eq!(pulses[0], symbol(protocol, 1000, 1));
        assert_eq!(pulses[3], sync(protocol, 1000));
    }

    #[test]
    fn test_unknown_protocol() {
        assert_eq!(
            Waveform::new(0x1, 0, None, None, 1).unwrap_err(),
            EncodeError::UnknownProtocol
        );
        assert_eq!(
            Waveform::new(0x1, 7, None, None, 1).unwrap_err(),
            EncodeError::UnknownProtocol
        );
    }

    #[test]
    fn test_zero_repeat_is_empty() {
        assert_eq!(Waveform::new(0x1, 1, None, None, 0).unwrap().count(), 0);
    }
}
