mod http;
mod platform;

use airwatch_common::{
    DummyAnalogSensor, DummyClimateSensor, DummySensorProfile, Monitor, MonitorConfig, SensorSuite,
};

use http::HttpUplink;
use platform::{HostLink, StdDelay};

/// Runs the monitor on a desktop machine: dummy sensors, real HTTP.
struct App {
    monitor: Monitor<HostLink, HttpUplink, StdDelay>,
}

impl App {
    /// Create a new App struct.
    ///
    /// Reads the config (first argument or `AIRWATCH_CONFIG`), applies env
    /// overrides and wires the dummy sensors to the HTTP uplink.
    fn new() -> anyhow::Result<Self> {
        let config_path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("AIRWATCH_CONFIG").ok());

        let config = match config_path {
            Some(path) => MonitorConfig::load(path)?,
            None => MonitorConfig::default(),
        }
        .apply_env(|key| std::env::var(key).ok())?;

        config.validate()?;
        log::info!("Posting to {} every {}s", config.endpoint, config.interval_secs);

        let profile = DummySensorProfile::new()?;
        let sensors = SensorSuite::new(
            Box::new(DummyClimateSensor::new(&profile)),
            Box::new(DummyAnalogSensor::new(profile.air_quality)),
            Box::new(DummyAnalogSensor::new(profile.sound_level)),
            Box::new(DummyAnalogSensor::new(profile.co2_level)),
        );

        let mut monitor = Monitor::new(
            HostLink,
            sensors,
            HttpUplink::new(config.endpoint.clone())?,
            StdDelay,
            config.interval(),
        );

        if let Ok(cycles) = std::env::var("AIRWATCH_MAX_CYCLES") {
            monitor = monitor.with_max_cycles(cycles.trim().parse()?);
        }

        Ok(Self { monitor })
    }

    /// Run the App until a cycle fails or the cycle limit is reached.
    fn run(&mut self) -> anyhow::Result<()> {
        let cycles = self.monitor.run()?;
        log::info!("Stopped after {} cycles", cycles);
        Ok(())
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = App::new()?;

    app.run()
}
