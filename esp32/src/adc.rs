use std::rc::Rc;

use airwatch_common::{AnalogSensor, BoxError};
use esp_idf_svc::hal::adc::attenuation::DB_11;
use esp_idf_svc::hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_svc::hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_svc::hal::adc::ADC1;
use esp_idf_svc::hal::gpio::ADCPin;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::sys::EspError;

/// ADC1 is shared by all analog sensors.
pub type SharedAdc = Rc<AdcDriver<'static, ADC1>>;

/// An analog sensor on one ADC1 channel, read one-shot at 11 dB attenuation
/// (full 0 to ~3.3 V range).
pub struct AdcSensor<T: ADCPin<Adc = ADC1>> {
    channel: AdcChannelDriver<'static, T, SharedAdc>,
}

impl<T: ADCPin<Adc = ADC1>> AdcSensor<T> {
    pub fn new(adc: SharedAdc, pin: impl Peripheral<P = T> + 'static) -> Result<Self, EspError> {
        let config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };

        Ok(Self {
            channel: AdcChannelDriver::new(adc, pin, &config)?,
        })
    }
}

impl<T: ADCPin<Adc = ADC1>> AnalogSensor for AdcSensor<T> {
    fn read_raw(&mut self) -> Result<u16, BoxError> {
        Ok(self.channel.read_raw()?)
    }
}
