//! 433 MHz receiver driver: edge capture on a GPIO input pin.
//!
//! A dedicated task owns the pin and the capture state machine. It wakes on
//! every edge, timestamps it, and feeds the elapsed duration to
//! [`EdgeCapture`]; per-edge work is bounded and allocation-free. Decoded
//! codes cross into normal context through a [`Signal`] with latest-value
//! semantics: if a second decode lands before the consumer runs, it
//! replaces the pending one. Listener dispatch, which walks a
//! variable-length registry, happens entirely on the consumer side.
//!
//! # Pins
//!
//! Any GPIO works; the data pin of common receiver modules (MX-05V and
//! friends) idles low, so `Pull::Down` is the usual choice. The demo wiring
//! uses GPIO 22.

use defmt::{info, warn, Format};
use embassy_executor::{SpawnError, Spawner};
use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use portable_atomic::{AtomicBool, Ordering};
use rf433_core::{EdgeCapture, ListenerRegistry, ReceivedCode};

/// Error type for receiver construction.
#[derive(Debug, Format)]
pub enum ReceiverError {
    /// The capture task could not be spawned.
    TaskSpawn(SpawnError),
}

/// Shared state between the capture task and the [`RfReceiver`] handle.
///
/// Create one in a static (e.g. via `StaticCell`) and pass it to
/// [`RfReceiver::new`].
pub struct ReceiverNotifier {
    decoded: Signal<CriticalSectionRawMutex, ReceivedCode>,
    enabled: AtomicBool,
}

impl ReceiverNotifier {
    /// New notifier; the receiver starts enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decoded: Signal::new(),
            enabled: AtomicBool::new(true),
        }
    }
}

impl Default for ReceiverNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running receiver.
pub struct RfReceiver<'a> {
    notifier: &'a ReceiverNotifier,
}

impl RfReceiver<'_> {
    /// Claim the pin and spawn the capture task, using the default decode
    /// tolerance.
    pub fn new<P: Pin>(
        pin: Peri<'static, P>,
        pull: Pull,
        notifier: &'static ReceiverNotifier,
        spawner: Spawner,
    ) -> Result<Self, ReceiverError> {
        Self::with_capture(pin, pull, EdgeCapture::new(), notifier, spawner)
    }

    /// Like [`RfReceiver::new`] with an explicit decode tolerance, in
    /// percent of the derived base pulse length.
    pub fn with_tolerance<P: Pin>(
        pin: Peri<'static, P>,
        pull: Pull,
        tolerance: u32,
        notifier: &'static ReceiverNotifier,
        spawner: Spawner,
    ) -> Result<Self, ReceiverError> {
        Self::with_capture(
            pin,
            pull,
            EdgeCapture::with_tolerance(tolerance),
            notifier,
            spawner,
        )
    }

    fn with_capture<P: Pin>(
        pin: Peri<'static, P>,
        pull: Pull,
        capture: EdgeCapture,
        notifier: &'static ReceiverNotifier,
        spawner: Spawner,
    ) -> Result<Self, ReceiverError> {
        // Type erase to Peri<'static, AnyPin> so the task stays non-generic.
        let any: Peri<'static, AnyPin> = pin.into();
        let device = ReceiverDevice {
            pin: Input::new(any, pull),
            capture,
        };
        spawner
            .spawn(capture_task(device, notifier))
            .map_err(ReceiverError::TaskSpawn)?;
        Ok(Self { notifier })
    }

    /// Wait for the next decoded code.
    pub async fn next_code(&self) -> ReceivedCode {
        self.notifier.decoded.wait().await
    }

    /// Forget a decoded code that has not been consumed yet.
    pub fn clear(&self) {
        self.notifier.decoded.reset();
    }

    /// Resume feeding edges into the capture state machine.
    pub fn enable(&self) {
        self.notifier.enabled.store(true, Ordering::Relaxed);
    }

    /// Stop processing edges. Capture state goes stale while disabled; the
    /// first edge after re-enabling reads as a frame boundary, so no
    /// partial frame survives the gap.
    pub fn disable(&self) {
        self.notifier.enabled.store(false, Ordering::Relaxed);
    }

    /// Whether edges are currently being processed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.notifier.enabled.load(Ordering::Relaxed)
    }

    /// Drain decoded codes forever, handing each to every listener in
    /// `registry` in registration order.
    ///
    /// Run this from a normal-priority task; it is the deferred half of the
    /// receive pipeline. Listener failures are logged and do not stop
    /// dispatch.
    pub async fn dispatch_forever(&self, registry: &mut ListenerRegistry) -> ! {
        loop {
            let message = self.notifier.decoded.wait().await;
            info!(
                "dispatching code {=u64:#x} to {=usize} listener(s)",
                message.code,
                registry.len()
            );
            let failed = registry.dispatch(&message);
            if failed > 0 {
                warn!("{=usize} listener(s) failed", failed);
            }
        }
    }
}

/// Concrete device owned by the capture task.
struct ReceiverDevice {
    pin: Input<'static>,
    capture: EdgeCapture,
}

#[embassy_executor::task]
async fn capture_task(mut device: ReceiverDevice, notifier: &'static ReceiverNotifier) -> ! {
    info!("433 MHz receiver task started");
    loop {
        device.pin.wait_for_any_edge().await;
        if !notifier.enabled.load(Ordering::Relaxed) {
            continue;
        }
        let now_us = Instant::now().as_micros();
        if let Some(message) = device.capture.edge(now_us) {
            info!(
                "decoded code {=u64:#x} ({=u8} bits, protocol {=u8})",
                message.code, message.bit_length, message.protocol_id
            );
            notifier.decoded.signal(message);
        }
    }
}
