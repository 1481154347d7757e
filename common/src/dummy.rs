use serde::Deserialize;

use crate::{AnalogSensor, BoxError, Climate, ClimateSensor, ADC_MAX};

/// A sine wave sampled once per read.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Wave {
    pub base: f32,
    pub amplitude: f32,
    /// Reads per full period.
    pub period: u32,
}

impl Wave {
    fn sample(&self, step: u32) -> f32 {
        if self.period == 0 {
            return self.base;
        }
        let phase = (step % self.period) as f32 / self.period as f32;
        self.base + self.amplitude * (phase * std::f32::consts::TAU).sin()
    }
}

/// Signals produced by the dummy sensors, one wave per reading.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct DummySensorProfile {
    pub temperature: Wave,
    pub humidity: Wave,
    pub air_quality: Wave,
    pub sound_level: Wave,
    pub co2_level: Wave,
}

impl DummySensorProfile {
    /// The profile shipped with the crate.
    pub fn new() -> Result<Self, serde_json::Error> {
        let json_data = std::include_str!("./dummysensors.json");

        serde_json::from_str::<Self>(json_data)
    }
}

/// Stands in for a DHT sensor where there is none.
pub struct DummyClimateSensor {
    temperature: Wave,
    humidity: Wave,
    step: u32,
}

impl DummyClimateSensor {
    pub fn new(profile: &DummySensorProfile) -> Self {
        Self {
            temperature: profile.temperature,
            humidity: profile.humidity,
            step: 0,
        }
    }
}

impl ClimateSensor for DummyClimateSensor {
    fn measure(&mut self) -> Result<Climate, BoxError> {
        let climate = Climate {
            temperature: self.temperature.sample(self.step),
            humidity: self.humidity.sample(self.step).clamp(0.0, 100.0),
        };
        self.step = self.step.wrapping_add(1);
        Ok(climate)
    }
}

/// Stands in for an ADC channel.
pub struct DummyAnalogSensor {
    wave: Wave,
    step: u32,
}

impl DummyAnalogSensor {
    pub fn new(wave: Wave) -> Self {
        Self { wave, step: 0 }
    }
}

impl AnalogSensor for DummyAnalogSensor {
    fn read_raw(&mut self) -> Result<u16, BoxError> {
        let value = self.wave.sample(self.step).round().clamp(0.0, ADC_MAX as f32);
        self.step = self.step.wrapping_add(1);
        Ok(value as u16)
    }
}

#[test]
fn test_dummy_sensor_profile() {
    let profile = DummySensorProfile::new().unwrap();
    let mut climate = DummyClimateSensor::new(&profile);
    let mut sound = DummyAnalogSensor::new(profile.sound_level);

    // Every wave starts at its base value.
    let first = climate.measure().unwrap();
    assert_eq!(first.temperature, 24.0);
    assert_eq!(first.humidity, 55.0);
    assert_eq!(sound.read_raw().unwrap(), 1500);

    for _ in 0..100 {
        let raw = sound.read_raw().unwrap();
        assert!((300..=2700).contains(&raw));
    }
}
