use airwatch_common::{BoxError, Climate, ClimateSensor, DhtError, DhtModel, Frame};
use esp_idf_svc::hal::gpio::{AnyIOPin, Pin};

/// DHT11/DHT22 on a single GPIO, bit-banged with busy waits.
pub struct Dht {
    pin: AnyIOPin,
    model: DhtModel,
}

impl Dht {
    pub fn new(pin: AnyIOPin, model: DhtModel) -> Self {
        Self { pin, model }
    }

    /// Busy-waits while the line stays at `state`, returning how long that took in
    /// microseconds.
    fn signal_level(&self, max_wait: u32, state: i32, phase: &'static str) -> Result<u32, DhtError> {
        use esp_idf_svc::sys::*;

        let mut u_sec: u32 = 0;
        unsafe {
            while gpio_get_level(self.pin.pin()) == state {
                u_sec += 1;
                if u_sec > max_wait {
                    return Err(DhtError::Timeout { phase });
                }
                ets_delay_us(1);
            }
        }

        Ok(u_sec)
    }

    /// How long the host pulls the line low to wake the sensor.
    fn start_signal_us(&self) -> u32 {
        match self.model {
            DhtModel::Dht11 => 20_000,
            DhtModel::Dht22 => 3_000,
        }
    }

    pub fn read(&self) -> Result<Climate, DhtError> {
        use esp_idf_svc::sys::*;

        let pin = self.pin.pin();
        let mut widths = [0u32; Frame::BITS];

        unsafe {
            gpio_set_direction(pin, GPIO_MODE_DEF_OUTPUT);

            // wake up
            gpio_set_level(pin, 0);
            ets_delay_us(self.start_signal_us());

            gpio_set_level(pin, 1);
            ets_delay_us(25);

            gpio_set_direction(pin, GPIO_MODE_DEF_INPUT);
        }

        // The sensor answers with 80 us low, then 80 us high.
        self.signal_level(85, 0, "response low")?;
        self.signal_level(85, 1, "response high")?;

        for width in widths.iter_mut() {
            // Each bit starts with ~50 us low; the high pulse that follows encodes it.
            self.signal_level(56, 0, "bit start")?;
            *width = self.signal_level(75, 1, "bit value")?;
        }

        Frame::from_pulse_widths(&widths).decode(self.model)
    }
}

impl ClimateSensor for Dht {
    fn measure(&mut self) -> Result<Climate, BoxError> {
        Ok(self.read()?)
    }
}
