use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::{BoxError, Error};

/// The link the monitor sends its records over, e.g. a Wi-Fi station.
pub trait NetworkLink {
    /// Starts associating with the network. May return before the link is usable.
    fn connect(&mut self) -> Result<(), BoxError>;

    fn is_connected(&self) -> Result<bool, BoxError>;
}

/// Connects `link` and blocks until it reports being up, checking every `poll`.
///
/// There is no timeout: a link that never comes up keeps this waiting.
pub fn bring_up<N, D>(link: &mut N, delay: &mut D, poll: Duration) -> crate::Result<()>
where
    N: NetworkLink + ?Sized,
    D: DelayNs + ?Sized,
{
    link.connect().map_err(Error::Network)?;

    while !link.is_connected().map_err(Error::Network)? {
        sleep(delay, poll);
    }

    log::info!("Connected to Wi-Fi");
    Ok(())
}

/// Sleeps for all of `duration`, in `u32::MAX` ms steps when it does not fit one call.
pub(crate) fn sleep<D: DelayNs + ?Sized>(delay: &mut D, duration: Duration) {
    let mut remaining = duration.as_millis();
    while remaining > 0 {
        let step = remaining.min(u32::MAX as u128) as u32;
        delay.delay_ms(step);
        remaining -= step as u128;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports being connected after `polls_needed` checks.
    struct SlowLink {
        connects: u32,
        polls_needed: u32,
        polls: std::cell::Cell<u32>,
    }

    impl NetworkLink for SlowLink {
        fn connect(&mut self) -> Result<(), BoxError> {
            self.connects += 1;
            Ok(())
        }

        fn is_connected(&self) -> Result<bool, BoxError> {
            let polls = self.polls.get() + 1;
            self.polls.set(polls);
            Ok(polls > self.polls_needed)
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ms: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns as u64 / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms as u64;
        }
    }

    #[test]
    fn polls_until_connected() {
        let mut link = SlowLink {
            connects: 0,
            polls_needed: 3,
            polls: Default::default(),
        };
        let mut delay = CountingDelay::default();

        bring_up(&mut link, &mut delay, Duration::from_secs(1)).unwrap();

        assert_eq!(link.connects, 1);
        assert_eq!(link.polls.get(), 4);
        assert_eq!(delay.total_ms, 3_000);
    }

    #[test]
    fn long_sleep_is_split_into_whole_steps() {
        let mut delay = CountingDelay::default();
        let fifty_days = Duration::from_secs(50 * 24 * 3600);

        sleep(&mut delay, fifty_days);
        assert_eq!(delay.total_ms, 4_320_000_000);
    }

    #[test]
    fn does_not_wait_when_already_up() {
        let mut link = SlowLink {
            connects: 0,
            polls_needed: 0,
            polls: Default::default(),
        };
        let mut delay = CountingDelay::default();

        bring_up(&mut link, &mut delay, Duration::from_secs(1)).unwrap();
        assert_eq!(delay.total_ms, 0);
    }
}
