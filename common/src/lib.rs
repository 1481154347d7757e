//! Platform-agnostic parts of the air & sound pollution monitor.
//!
//! The firmware and the host binary both build the same [`Monitor`] loop out of
//! the traits in here and only differ in what sits behind them.

mod config;
mod dht;
mod dummy;
mod error;
mod monitor;
mod network;
mod record;
mod sensor;
mod uplink;

pub use config::{MonitorConfig, WifiConfig};
pub use dht::{DhtError, DhtModel, Frame};
pub use dummy::{DummyAnalogSensor, DummyClimateSensor, DummySensorProfile, Wave};
pub use error::{BoxError, Error, Result};
pub use monitor::Monitor;
pub use network::{bring_up, NetworkLink};
pub use record::SensorRecord;
pub use sensor::{
    AnalogSensor, AnalogSensorPointer, Climate, ClimateSensor, ClimateSensorPointer, SensorSuite,
    ADC_MAX,
};
pub use uplink::{Delivery, Uplink};
