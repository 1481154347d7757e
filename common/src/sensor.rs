use crate::{BoxError, Error, SensorRecord};

/// Largest count a 12-bit ADC conversion can produce.
pub const ADC_MAX: u16 = 4095;

/// Temperature and humidity as reported by a climate sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Climate {
    pub temperature: f32,
    pub humidity: f32,
}

/// A sensor reporting temperature and humidity, e.g. a DHT11.
pub trait ClimateSensor {
    /// Triggers a measurement and returns its result.
    fn measure(&mut self) -> Result<Climate, BoxError>;
}

/// A sensor read through an ADC channel, reporting the raw conversion count.
pub trait AnalogSensor {
    fn read_raw(&mut self) -> Result<u16, BoxError>;
}

pub type ClimateSensorPointer = Box<dyn ClimateSensor>;
pub type AnalogSensorPointer = Box<dyn AnalogSensor>;

/// All sensors of the monitor, read together into one [`SensorRecord`].
pub struct SensorSuite {
    climate: ClimateSensorPointer,
    air_quality: AnalogSensorPointer,
    sound: AnalogSensorPointer,
    co2: AnalogSensorPointer,
}

impl SensorSuite {
    pub fn new(
        climate: ClimateSensorPointer,
        air_quality: AnalogSensorPointer,
        sound: AnalogSensorPointer,
        co2: AnalogSensorPointer,
    ) -> Self {
        Self {
            climate,
            air_quality,
            sound,
            co2,
        }
    }

    /// Reads the climate sensor, then the air quality, sound and CO2 channels.
    ///
    /// The first failing sensor aborts the read.
    pub fn read(&mut self) -> crate::Result<SensorRecord> {
        let climate = self
            .climate
            .measure()
            .map_err(|e| Error::sensor("climate", e))?;

        Ok(SensorRecord {
            temperature: climate.temperature,
            humidity: climate.humidity,
            air_quality: read_clamped(self.air_quality.as_mut(), "air_quality")?,
            sound_level: read_clamped(self.sound.as_mut(), "sound_level")?,
            co2_level: read_clamped(self.co2.as_mut(), "co2_level")?,
        })
    }
}

fn read_clamped(sensor: &mut dyn AnalogSensor, name: &'static str) -> crate::Result<u16> {
    let raw = sensor.read_raw().map_err(|e| Error::sensor(name, e))?;
    if raw > ADC_MAX {
        log::warn!("{} reported {} above ADC range, clamping", name, raw);
    }
    Ok(raw.min(ADC_MAX))
}
