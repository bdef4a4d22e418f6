//! Ordered listener registry for decoded messages.
//!
//! The registry is plain data and never touched from interrupt-priority
//! code: decode results cross over as [`ReceivedCode`] snapshots first, and
//! whatever normal-context loop drains them calls [`ListenerRegistry::dispatch`].

use heapless::Vec;

use crate::message::ReceivedCode;

/// Maximum number of registered listeners.
pub const MAX_LISTENERS: usize = 8;

/// A listener callback. Returning an error marks this listener's delivery
/// as failed without affecting the others.
pub type Listener = fn(&ReceivedCode) -> Result<(), ListenerError>;

/// Failure reported by a listener, carried back to the dispatch loop for
/// logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ListenerError(pub &'static str);

/// Error type for registry mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// The registry already holds [`MAX_LISTENERS`] entries.
    Full,
}

/// Identity of one registration, returned by [`ListenerRegistry::add`].
///
/// Handles are what distinguish two registrations of the same function;
/// removing one leaves the other in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ListenerHandle(u16);

/// An ordered collection of listener callbacks.
///
/// Notification order is registration order.
pub struct ListenerRegistry {
    entries: Vec<(ListenerHandle, Listener), MAX_LISTENERS>,
    next_handle: u16,
}

impl ListenerRegistry {
    /// New, empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Append a listener; it will be notified after all currently
    /// registered ones.
    pub fn add(&mut self, listener: Listener) -> Result<ListenerHandle, RegistryError> {
        let handle = ListenerHandle(self.next_handle);
        self.entries
            .push((handle, listener))
            .map_err(|_| RegistryError::Full)?;
        self.next_handle = self.next_handle.wrapping_add(1);
        Ok(handle)
    }

    /// Remove the registration identified by `handle`. Returns whether it
    /// was present.
    pub fn remove(&mut self, handle: ListenerHandle) -> bool {
        match self.entries.iter().position(|(h, _)| *h == handle) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke every listener, in registration order, with the same message.
    ///
    /// A failing listener never prevents the remaining ones from running;
    /// the number of failures is returned so the caller can log it.
    pub fn dispatch(&self, message: &ReceivedCode) -> usize {
        self.entries
            .iter()
            .filter(|(_, listener)| listener(message).is_err())
            .count()
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::sync::Mutex;
    use std::vec::Vec;

    use super::*;

    // Listeners are plain function pointers, so test listeners record their
    // invocations through a process-global log.
    static CALLS: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

    fn message() -> ReceivedCode {
        ReceivedCode {
            code: 0x00A5_A5A5,
            timestamp_us: 42,
            bit_length: 24,
            pulse_len_us: 350,
            protocol_id: 1,
        }
    }

    fn first(_: &ReceivedCode) -> Result<(), ListenerError> {
        CALLS.lock().unwrap().push("first");
        Ok(())
    }

    fn second(_: &ReceivedCode) -> Result<(), ListenerError> {
        CALLS.lock().unwrap().push("second");
        Ok(())
    }

    fn failing(_: &ReceivedCode) -> Result<(), ListenerError> {
        CALLS.lock().unwrap().push("failing");
        Err(ListenerError("boom"))
    }

    fn checks_payload(message: &ReceivedCode) -> Result<(), ListenerError> {
        assert_eq!(message.code, 0x00A5_A5A5);
        CALLS.lock().unwrap().push("payload");
        Ok(())
    }

    /// Run `body` with exclusive access to the call log.
    fn with_log(body: impl FnOnce() -> Vec<&'static str>) -> Vec<&'static str> {
        // Tests run in parallel; the log guard keeps them from interleaving.
        static SERIAL: Mutex<()> = Mutex::new(());
        let _guard = SERIAL.lock().unwrap();
        CALLS.lock().unwrap().clear();
        body()
    }

    fn drain() -> Vec<&'static str> {
        core::mem::take(&mut *CALLS.lock().unwrap())
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let calls = with_log(|| {
            let mut registry = ListenerRegistry::new();
            registry.add(second).unwrap();
            registry.add(first).unwrap();
            assert_eq!(registry.dispatch(&message()), 0);
            drain()
        });
        assert_eq!(calls, ["second", "first"]);
    }

    #[test]
    fn test_failing_listener_is_isolated() {
        let calls = with_log(|| {
            let mut registry = ListenerRegistry::new();
            registry.add(failing).unwrap();
            registry.add(checks_payload).unwrap();
            assert_eq!(registry.dispatch(&message()), 1);
            drain()
        });
        // The second listener still ran, with the same message.
        assert_eq!(calls, ["failing", "payload"]);
    }

    #[test]
    fn test_remove_by_handle() {
        let calls = with_log(|| {
            let mut registry = ListenerRegistry::new();
            let a = registry.add(first).unwrap();
            let b = registry.add(first).unwrap();
            assert_ne!(a, b);

            // Removing one registration of a twice-added function leaves
            // the other in place.
            assert!(registry.remove(a));
            assert!(!registry.remove(a));
            assert_eq!(registry.len(), 1);
            assert_eq!(registry.dispatch(&message()), 0);

            assert!(registry.remove(b));
            assert!(registry.is_empty());
            drain()
        });
        assert_eq!(calls, ["first"]);
    }

    #[test]
    fn test_clear() {
        let mut registry = ListenerRegistry::new();
        registry.add(first).unwrap();
        registry.add(second).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.dispatch(&message()), 0);
    }

    #[test]
    fn test_registry_full() {
        let mut registry = ListenerRegistry::new();
        for _ in 0..MAX_LISTENERS {
            registry.add(first).unwrap();
        }
        assert_eq!(registry.add(second).unwrap_err(), RegistryError::Full);
        assert_eq!(registry.len(), MAX_LISTENERS);
    }
}
