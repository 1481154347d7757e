use serde::{Deserialize, Serialize};

/// One reading of every sensor, taken in a single cycle.
///
/// Lives for one loop iteration: it is logged, serialized and sent, then dropped.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorRecord {
    /// Degrees Celsius.
    pub temperature: f32,

    /// Relative humidity in percent.
    pub humidity: f32,

    /// MQ135 raw ADC count.
    pub air_quality: u16,

    /// LM393 raw ADC count.
    pub sound_level: u16,

    /// MQ-6 raw ADC count.
    pub co2_level: u16,
}

impl SensorRecord {
    /// Serializes the record as the flat JSON object the endpoint expects.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Logs every reading on its own line.
    pub fn log(&self) {
        log::info!("Temperature: {:.1}°C", self.temperature);
        log::info!("Humidity: {:.1}%", self.humidity);
        log::info!("Air Quality (MQ135): {}", self.air_quality);
        log::info!("Sound Level (LM393): {}", self.sound_level);
        log::info!("CO2 Level (MQ-6): {}", self.co2_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_flat_with_original_keys() {
        let record = SensorRecord {
            temperature: 21.5,
            humidity: 40.0,
            air_quality: 812,
            sound_level: 1024,
            co2_level: 300,
        };

        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert_eq!(object["temperature"], 21.5);
        assert_eq!(object["humidity"], 40.0);
        assert_eq!(object["air_quality"], 812);
        assert_eq!(object["sound_level"], 1024);
        assert_eq!(object["co2_level"], 300);
    }

    #[test]
    fn negative_temperature_survives_serialization() {
        let record = SensorRecord {
            temperature: -7.25,
            ..Default::default()
        };

        let parsed: SensorRecord = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed.temperature, -7.25);
    }
}
