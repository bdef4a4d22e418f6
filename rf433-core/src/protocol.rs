//! The fixed catalog of known pulse-timing protocols.
//!
//! Each protocol is a base pulse length in microseconds plus six ratios.
//! A transmitted segment lasts `ratio * pulse_len_us`; the receive side
//! re-derives the base pulse length from the observed sync gap, so the
//! ratios are what actually identify a protocol on the wire.
//!
//! Protocol ids are 1-based and travel with decoded messages as metadata;
//! id 0 is reserved and never matches.

/// Number of protocols in the built-in catalog. Valid ids are
/// `1..=PROTOCOL_COUNT`.
pub const PROTOCOL_COUNT: usize = 6;

/// Protocol 6 carries Nexa-style line coding: every source bit is doubled
/// on the wire (`0` -> `01`, `1` -> `10`) and each pass starts with an
/// extra sync waveform.
pub const NEXA_PROTOCOL_ID: u8 = 6;

/// Timing description of one on-off-keying protocol.
///
/// All ratio fields are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Protocol {
    /// Base pulse length in microseconds.
    pub pulse_len_us: u32,
    /// Sync segment high-phase ratio.
    pub sync_high: u32,
    /// Sync segment low-phase ratio (the long inter-frame gap).
    pub sync_low: u32,
    /// `0` symbol high-phase ratio.
    pub zero_high: u32,
    /// `0` symbol low-phase ratio.
    pub zero_low: u32,
    /// `1` symbol high-phase ratio.
    pub one_high: u32,
    /// `1` symbol low-phase ratio.
    pub one_low: u32,
}

/// The built-in catalog, indexed by `id - 1`.
static PROTOCOLS: [Protocol; PROTOCOL_COUNT] = [
    Protocol::new(350, 1, 31, 1, 3, 3, 1),
    Protocol::new(650, 1, 10, 1, 2, 2, 1),
    Protocol::new(100, 30, 71, 4, 11, 9, 6),
    Protocol::new(380, 1, 6, 1, 3, 3, 1),
    Protocol::new(500, 6, 14, 1, 2, 2, 1),
    Protocol::new(200, 1, 10, 1, 5, 1, 1),
];

impl Protocol {
    const fn new(
        pulse_len_us: u32,
        sync_high: u32,
        sync_low: u32,
        zero_high: u32,
        zero_low: u32,
        one_high: u32,
        one_low: u32,
    ) -> Self {
        Self {
            pulse_len_us,
            sync_high,
            sync_low,
            zero_high,
            zero_low,
            one_high,
            one_low,
        }
    }

    /// Look up a protocol by its 1-based id.
    ///
    /// Returns `None` for id 0 (reserved) and for ids past the end of the
    /// catalog.
    #[must_use]
    pub fn by_id(id: u8) -> Option<&'static Protocol> {
        if id == 0 || id as usize > PROTOCOL_COUNT {
            return None;
        }
        Some(&PROTOCOLS[id as usize - 1])
    }

    /// Sync segment ratios as a `(high, low)` pair.
    #[inline]
    #[must_use]
    pub const fn sync(&self) -> (u32, u32) {
        (self.sync_high, self.sync_low)
    }

    /// `0` symbol ratios as a `(high, low)` pair.
    #[inline]
    #[must_use]
    pub const fn zero(&self) -> (u32, u32) {
        (self.zero_high, self.zero_low)
    }

    /// `1` symbol ratios as a `(high, low)` pair.
    #[inline]
    #[must_use]
    pub const fn one(&self) -> (u32, u32) {
        (self.one_high, self.one_low)
    }

    /// Duration of the inter-frame sync gap at this protocol's default
    /// pulse length, in microseconds.
    #[inline]
    #[must_use]
    pub const fn sync_gap_us(&self) -> u32 {
        self.sync_low * self.pulse_len_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_one_based() {
        assert!(Protocol::by_id(0).is_none());
        assert!(Protocol::by_id(1).is_some());
        assert!(Protocol::by_id(PROTOCOL_COUNT as u8).is_some());
        assert!(Protocol::by_id(PROTOCOL_COUNT as u8 + 1).is_none());
        assert!(Protocol::by_id(u8::MAX).is_none());
    }

    #[test]
    fn test_catalog_values() {
        let p1 = Protocol::by_id(1).unwrap();
        assert_eq!(p1.pulse_len_us, 350);
        assert_eq!(p1.sync(), (1, 31));
        assert_eq!(p1.zero(), (1, 3));
        assert_eq!(p1.one(), (3, 1));

        let p6 = Protocol::by_id(NEXA_PROTOCOL_ID).unwrap();
        assert_eq!(p6.pulse_len_us, 200);
        assert_eq!(p6.one(), (1, 1));
    }

    #[test]
    fn test_all_ratios_positive() {
        for id in 1..=PROTOCOL_COUNT as u8 {
            let p = Protocol::by_id(id).unwrap();
            assert!(p.pulse_len_us > 0);
            for ratio in [
                p.sync_high, p.sync_low, p.zero_high, p.zero_low, p.one_high, p.one_low,
            ] {
                assert!(ratio > 0, "protocol {id} has a zero ratio");
            }
        }
    }

    #[test]
    fn test_sync_gap_us() {
        assert_eq!(Protocol::by_id(1).unwrap().sync_gap_us(), 10_850);
        assert_eq!(Protocol::by_id(6).unwrap().sync_gap_us(), 2_000);
    }
}
