//! 433 MHz transmitter driver: busy-wait pulse emission on a GPIO output.
//!
//! Pulse widths are a few hundred microseconds, well under any practical
//! scheduling granularity, so emission spins on the monotonic clock rather
//! than yielding to the executor. A [`send_code`](RfTransmitter::send_code)
//! call therefore blocks its task for the whole transmission (tens to
//! hundreds of milliseconds, plus the quiet tail) and cannot be cancelled.
//! Callers that need other work to keep running should give the
//! transmitter its own task, or its own core.
//!
//! # Pins
//!
//! Any GPIO works; the demo wiring drives a common FS1000A-style
//! transmitter module from GPIO 27.

use defmt::{info, Format};
use embassy_rp::gpio::{AnyPin, Level, Output, Pin};
use embassy_rp::Peri;
use embassy_time::{Duration, Instant};
use rf433_core::{EncodeError, Waveform};

/// Default number of passes per transmission.
pub const DEFAULT_REPEAT: u8 = 10;

/// Enforced quiet time after each transmission, so a back-to-back send
/// cannot corrupt the tail of the previous one.
const QUIET_TAIL_US: u64 = 500_000;

/// Error type for transmit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum TxError {
    /// The transmitter is disabled.
    Disabled,
    /// The selected protocol id is outside the catalog.
    UnknownProtocol,
}

impl From<EncodeError> for TxError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::UnknownProtocol => TxError::UnknownProtocol,
        }
    }
}

/// Per-call overrides for [`RfTransmitter::send_code_with`].
///
/// Protocol and pulse-length overrides persist as the transmitter's new
/// defaults; a bit-length override applies to this call only (the next
/// call resolves the length from its code again).
#[derive(Clone, Copy, Debug, Default)]
pub struct SendOptions {
    /// Switch to this protocol id.
    pub protocol_id: Option<u8>,
    /// Use this base pulse length instead of the protocol default.
    pub pulse_len_us: Option<u32>,
    /// Force the number of source bits for this call.
    pub bit_length: Option<u8>,
}

/// Driver for one transmitter module.
pub struct RfTransmitter<'d> {
    pin: Output<'d>,
    protocol_id: u8,
    pulse_len_us: Option<u32>,
    repeat: u8,
    enabled: bool,
    /// Timing cursor: the moment the current segment started, and how long
    /// it still has to run. The low phase of each pulse is consumed at the
    /// start of the *next* segment, keeping segments back to back without
    /// a dead wait after the final one.
    segment_start: Instant,
    pending_us: u64,
}

impl<'d> RfTransmitter<'d> {
    /// Claim the pin (driven low) and set up protocol 1 defaults.
    pub fn new<P: Pin>(pin: Peri<'d, P>) -> Self {
        let any: Peri<'d, AnyPin> = pin.into();
        Self {
            pin: Output::new(any, Level::Low),
            protocol_id: 1,
            pulse_len_us: None,
            repeat: DEFAULT_REPEAT,
            enabled: true,
            segment_start: Instant::now(),
            pending_us: 0,
        }
    }

    /// Select the protocol used by subsequent sends. Unknown ids are
    /// reported by the send itself.
    pub fn set_protocol(&mut self, protocol_id: u8) {
        self.protocol_id = protocol_id;
        self.pulse_len_us = None;
    }

    /// Override the base pulse length; `None` returns to the protocol
    /// default.
    pub fn set_pulse_length(&mut self, pulse_len_us: Option<u32>) {
        self.pulse_len_us = pulse_len_us;
    }

    /// Set the number of passes per transmission.
    pub fn set_repeat(&mut self, repeat: u8) {
        self.repeat = repeat;
    }

    /// Allow transmissions.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Refuse transmissions and park the pin low.
    pub fn disable(&mut self) {
        self.pin.set_low();
        self.enabled = false;
    }

    /// Whether transmissions are allowed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Transmit `code` with the stored defaults.
    ///
    /// Blocks for the whole transmission; see the module docs.
    pub fn send_code(&mut self, code: u64) -> Result<(), TxError> {
        self.send_code_with(code, SendOptions::default())
    }

    /// Transmit `code`, applying `options` first.
    pub fn send_code_with(&mut self, code: u64, options: SendOptions) -> Result<(), TxError> {
        if !self.enabled {
            return Err(TxError::Disabled);
        }
        if let Some(protocol_id) = options.protocol_id {
            self.protocol_id = protocol_id;
        }
        if let Some(pulse_len_us) = options.pulse_len_us {
            self.pulse_len_us = Some(pulse_len_us);
        }

        let wave = Waveform::new(
            code,
            self.protocol_id,
            self.pulse_len_us,
            options.bit_length,
            self.repeat,
        )?;
        info!(
            "transmitting code {=u64:#x} ({=u8} wire bits, protocol {=u8}, pulse {=u32} µs)",
            code,
            wave.bit_length(),
            self.protocol_id,
            wave.pulse_len_us()
        );

        // Nothing is pending on entry; the previous send consumed its own
        // tail. The loop raises the pin, spins out the high phase, drops
        // the pin and leaves the low phase pending for the next iteration.
        for pulse in wave {
            self.wait_pending();
            self.pin.set_high();
            self.start_segment(u64::from(pulse.high_us));
            self.wait_pending();
            self.pin.set_low();
            self.start_segment(u64::from(pulse.low_us));
        }

        // Finish the last low phase plus the inter-message quiet period.
        self.pending_us += QUIET_TAIL_US;
        self.wait_pending();
        Ok(())
    }

    fn start_segment(&mut self, duration_us: u64) {
        self.segment_start = Instant::now();
        self.pending_us = duration_us;
    }

    /// Spin until the current segment has fully elapsed.
    fn wait_pending(&mut self) {
        let deadline = self.segment_start + Duration::from_micros(self.pending_us);
        while Instant::now() < deadline {
            core::hint::spin_loop();
        }
        self.pending_us = 0;
    }
}
