use airwatch_common::{BoxError, NetworkLink};
use embedded_hal::delay::DelayNs;

/// The host is already on a network, so there is nothing to associate with.
pub struct HostLink;

impl NetworkLink for HostLink {
    fn connect(&mut self) -> Result<(), BoxError> {
        log::debug!("Using the host network");
        Ok(())
    }

    fn is_connected(&self) -> Result<bool, BoxError> {
        Ok(true)
    }
}

/// Sleeps the current thread.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}
