#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::Pull;
use embassy_time::{Duration, Timer};
use rf433_pico::{
    ListenerError, ListenerRegistry, ReceivedCode, ReceiverNotifier, RfReceiver, RfTransmitter,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

/// Handoff slot between the capture task and the dispatch task.
static NOTIFIER: StaticCell<ReceiverNotifier> = StaticCell::new();

/// Demo listener: log every decoded code.
fn log_code(message: &ReceivedCode) -> Result<(), ListenerError> {
    info!(
        "received code {=u64:#x} ({=u8} bits, protocol {=u8}, pulse {=u32} µs, at {=u64} µs)",
        message.code, message.bit_length, message.protocol_id, message.pulse_len_us,
        message.timestamp_us
    );
    Ok(())
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("rf433-pico starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Receiver on GPIO 22 ---
    let notifier = NOTIFIER.init(ReceiverNotifier::new());
    let receiver = RfReceiver::new(p.PIN_22, Pull::Down, notifier, spawner).unwrap();

    let mut registry = ListenerRegistry::new();
    registry.add(log_code).unwrap();
    spawner.spawn(dispatch_task(receiver, registry)).unwrap();

    // --- Transmitter on GPIO 27 ---
    let transmitter = RfTransmitter::new(p.PIN_27);
    spawner.spawn(beacon_task(transmitter)).unwrap();

    info!("rf433-pico initialized, listening...");
}

/// Dispatch task - drains decoded codes and notifies the listeners.
#[embassy_executor::task]
async fn dispatch_task(receiver: RfReceiver<'static>, mut registry: ListenerRegistry) -> ! {
    receiver.dispatch_forever(&mut registry).await
}

/// Beacon task - periodically transmits a test code, like a wireless
/// socket remote with its button taped down.
#[embassy_executor::task]
async fn beacon_task(mut transmitter: RfTransmitter<'static>) -> ! {
    loop {
        Timer::after(Duration::from_secs(10)).await;
        // Busy-waits for the full transmission (plus the 500 ms quiet
        // tail), stalling this executor; fine for the demo.
        if let Err(err) = transmitter.send_code(0x00A5_A5A5) {
            warn!("transmit failed: {}", err);
        }
    }
}
