//! 433 MHz OOK remote receiver/transmitter for the Raspberry Pi Pico.
//!
//! This crate drives the cheap 433 MHz receiver/transmitter module pairs
//! (MX-05V, FS1000A and friends) used by garage openers, wireless sockets
//! and weather sensors, on an RP2040:
//!
//! 1. Captures edge timings from the receiver module's data pin
//! 2. Decodes repeated frames against the built-in protocol catalog
//! 3. Hands decoded codes to registered listeners
//! 4. Re-encodes codes into timed pulse trains on the transmitter pin
//!
//! # Hardware Configuration
//!
//! | Function         | GPIO | Description                        |
//! |------------------|------|------------------------------------|
//! | Receiver data    | 22   | Edge input from receiver module    |
//! | Transmitter data | 27   | Drives the transmitter module      |
//!
//! The pin assignments above are what the demo binary uses; both drivers
//! take any GPIO.
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two concurrent pieces:
//!
//! - **Capture task**: wakes on every receive-pin edge, feeds the capture
//!   state machine, and signals decoded codes. Per-edge work is bounded
//!   and allocation-free.
//! - **Consumer side**: whatever task awaits [`RfReceiver::next_code`] or
//!   runs [`RfReceiver::dispatch_forever`] with a listener registry.
//!
//! The two communicate through an [`embassy_sync::signal::Signal`] with
//! "latest value wins" semantics: a burst of decodes faster than the
//! consumer drains them keeps only the newest code. Guaranteed delivery of
//! every repeat of a held button is explicitly not a goal.
//!
//! Transmission ([`RfTransmitter::send_code`]) busy-waits its microsecond
//! pulse timing and blocks the calling task for the whole transmission.
//!
//! # Modules
//!
//! - [`receiver`]: edge capture driver ([`RfReceiver`])
//! - [`transmitter`]: pulse emission driver ([`RfTransmitter`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): `panic-probe` for development (prints
//!   panic info via RTT)
//! - **`prod-panic`**: `panic-reset` for production (silent reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`rf433_core`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

// Re-export core types for convenience
pub use rf433_core::{
    try_decode, Decoded, EdgeCapture, EncodeError, Listener, ListenerError, ListenerHandle,
    ListenerRegistry, Protocol, Pulse, ReceivedCode, RegistryError, Waveform, DEFAULT_TOLERANCE,
    MAX_CHANGES, MAX_LISTENERS, MAX_TX_BITS, NEXA_PROTOCOL_ID, PROTOCOL_COUNT,
};

pub mod receiver;
pub mod transmitter;

pub use receiver::{ReceiverError, ReceiverNotifier, RfReceiver};
pub use transmitter::{RfTransmitter, SendOptions, TxError, DEFAULT_REPEAT};
