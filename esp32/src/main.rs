mod adc;
mod config;
mod dht;
mod http;
mod wifi;

use std::rc::Rc;

use airwatch_common::{Monitor, SensorSuite};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::adc::oneshot::AdcDriver;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::IOPin;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::info;

use adc::AdcSensor;
use dht::Dht;
use http::EspUplink;
use wifi::WifiLink;

fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = config::load()?;
    info!("Posting to {} every {}s", config.endpoint, config.interval_secs);

    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sys_loop.clone(), Some(nvs))?,
        sys_loop,
    )?;

    // DHT on GPIO14; MQ135, LM393 and MQ-6 on ADC1 channels of GPIO32, 34 and 33.
    let adc = Rc::new(AdcDriver::new(peripherals.adc1)?);
    let sensors = SensorSuite::new(
        Box::new(Dht::new(peripherals.pins.gpio14.downgrade(), config.dht_model)),
        Box::new(AdcSensor::new(adc.clone(), peripherals.pins.gpio32)?),
        Box::new(AdcSensor::new(adc.clone(), peripherals.pins.gpio34)?),
        Box::new(AdcSensor::new(adc, peripherals.pins.gpio33)?),
    );

    let mut monitor = Monitor::new(
        WifiLink::new(wifi, config.wifi.clone()),
        sensors,
        EspUplink::new(config.endpoint.clone())?,
        FreeRtos,
        config.interval(),
    );

    // Only returns on failure.
    monitor.run()?;

    Ok(())
}
