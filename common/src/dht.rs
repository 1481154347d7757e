use serde::Deserialize;
use std::time::Duration;

use crate::Climate;

/// Which member of the DHT family sits on the bus. They share the wire protocol
/// but scale their data bytes differently.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DhtModel {
    #[default]
    Dht11,
    Dht22,
}

impl DhtModel {
    /// Shortest time the sensor needs between two measurements.
    pub fn min_interval(self) -> Duration {
        match self {
            DhtModel::Dht11 => Duration::from_secs(1),
            DhtModel::Dht22 => Duration::from_secs(2),
        }
    }
}

impl std::str::FromStr for DhtModel {
    type Err = DhtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dht11" => Ok(DhtModel::Dht11),
            "dht22" | "am2302" => Ok(DhtModel::Dht22),
            _ => Err(DhtError::UnknownModel(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DhtError {
    #[error("timed out waiting for the sensor during {phase}")]
    Timeout { phase: &'static str },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    Checksum { expected: u8, actual: u8 },

    #[error("unknown DHT model `{0}`")]
    UnknownModel(String),
}

/// The five bytes a DHT sensor sends: humidity high/low, temperature high/low
/// and a checksum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame(pub [u8; Frame::LEN]);

impl Frame {
    pub const LEN: usize = 5;
    pub const BITS: usize = Self::LEN * 8;

    /// High pulses longer than this (in microseconds) carry a `1`.
    pub const ONE_THRESHOLD_US: u32 = 40;

    /// Assembles a frame from the widths of the 40 data high pulses, MSB first.
    pub fn from_pulse_widths(widths: &[u32; Self::BITS]) -> Self {
        let mut data = [0u8; Self::LEN];

        for (i, &width) in widths.iter().enumerate() {
            if width > Self::ONE_THRESHOLD_US {
                data[i / 8] |= 1 << (7 - i % 8);
            }
        }

        Self(data)
    }

    /// Low 8 bits of the sum of the four data bytes.
    pub fn expected_checksum(&self) -> u8 {
        self.0[..4].iter().fold(0u8, |sum, b| sum.wrapping_add(*b))
    }

    pub fn checksum_ok(&self) -> bool {
        self.expected_checksum() == self.0[4]
    }

    pub fn decode(&self, model: DhtModel) -> Result<Climate, DhtError> {
        if !self.checksum_ok() {
            return Err(DhtError::Checksum {
                expected: self.expected_checksum(),
                actual: self.0[4],
            });
        }

        let [h_hi, h_lo, t_hi, t_lo, _] = self.0;

        let (humidity, mut temperature) = match model {
            DhtModel::Dht11 => (
                h_hi as f32 + h_lo as f32 / 10.0,
                (t_hi & 0x7F) as f32 + t_lo as f32 / 10.0,
            ),
            DhtModel::Dht22 => (
                u16::from_be_bytes([h_hi, h_lo]) as f32 / 10.0,
                u16::from_be_bytes([t_hi & 0x7F, t_lo]) as f32 / 10.0,
            ),
        };

        // sign bit
        if t_hi & 0x80 != 0 {
            temperature = -temperature;
        }

        Ok(Climate {
            temperature,
            humidity,
        })
    }
}
