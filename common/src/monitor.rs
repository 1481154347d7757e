use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::network;
use crate::{bring_up, Error, NetworkLink, SensorRecord, SensorSuite, Uplink};

/// The acquisition loop: bring the link up once, then read, log, send and sleep
/// forever.
///
/// The loop has no error handling of its own. The first failure of a sensor, the
/// link or the uplink ends [`Monitor::run`] with that error.
pub struct Monitor<N, U, D> {
    link: N,
    sensors: SensorSuite,
    uplink: U,
    delay: D,
    interval: Duration,
    max_cycles: Option<u64>,
}

impl<N, U, D> Monitor<N, U, D>
where
    N: NetworkLink,
    U: Uplink,
    D: DelayNs,
{
    /// How often the link state is checked while connecting.
    pub const CONNECT_POLL: Duration = Duration::from_secs(1);

    pub fn new(link: N, sensors: SensorSuite, uplink: U, delay: D, interval: Duration) -> Self {
        Self {
            link,
            sensors,
            uplink,
            delay,
            interval,
            max_cycles: None,
        }
    }

    /// Stops [`Monitor::run`] after `cycles` cycles instead of looping forever.
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    /// Runs the loop and returns the number of completed cycles.
    ///
    /// Only returns `Ok` when a cycle limit is set.
    pub fn run(&mut self) -> crate::Result<u64> {
        bring_up(&mut self.link, &mut self.delay, Self::CONNECT_POLL)?;

        let mut cycles = 0;
        loop {
            if self.max_cycles.is_some_and(|max| cycles >= max) {
                return Ok(cycles);
            }

            self.cycle()?;
            cycles += 1;

            log::debug!("Cycle {} done, sleeping {:?}", cycles, self.interval);
            network::sleep(&mut self.delay, self.interval);
        }
    }

    /// Reads every sensor once, logs the readings and sends them.
    pub fn cycle(&mut self) -> crate::Result<SensorRecord> {
        let record = self.sensors.read()?;
        record.log();

        let delivery = self.uplink.send(&record).map_err(Error::Uplink)?;
        if !delivery.is_success() {
            log::warn!("Endpoint answered with status {}", delivery.status);
        }
        log::info!("Data sent to cloud: {}", delivery.body);

        Ok(record)
    }

    /// Gives the parts back, e.g. to inspect them after a bounded run.
    pub fn into_parts(self) -> (N, SensorSuite, U, D) {
        (self.link, self.sensors, self.uplink, self.delay)
    }
}
