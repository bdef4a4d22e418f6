//! The decoded-message value type.

/// A successfully decoded transmission.
///
/// Created once per decoded frame and handed to listeners as a read-only
/// snapshot; the capture state it was derived from keeps mutating
/// underneath, so nothing here borrows from the receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceivedCode {
    /// The decoded code, most significant bit first, up to 64 bits.
    pub code: u64,
    /// Monotonic microsecond timestamp of the edge that completed the
    /// decode.
    pub timestamp_us: u64,
    /// Number of data bits in the frame.
    pub bit_length: u8,
    /// Base pulse length derived from the observed sync gap, in
    /// microseconds.
    pub pulse_len_us: u32,
    /// 1-based id of the protocol that matched.
    pub protocol_id: u8,
}
