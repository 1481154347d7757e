use airwatch_common::MonitorConfig;

/// Values baked in at compile time, keyed like the host's environment overrides.
fn baked(key: &str) -> Option<String> {
    match key {
        "AIRWATCH_WIFI_SSID" => Some(env!("WIFI_SSID")),
        "AIRWATCH_WIFI_PASSWORD" => Some(env!("WIFI_PASS")),
        "AIRWATCH_ENDPOINT" => option_env!("CLOUD_ENDPOINT"),
        "AIRWATCH_INTERVAL_SECS" => option_env!("INTERVAL_SECS"),
        "AIRWATCH_DHT_MODEL" => option_env!("DHT_MODEL"),
        _ => None,
    }
    .map(str::to_string)
}

/// Builds and validates the firmware's configuration.
pub fn load() -> anyhow::Result<MonitorConfig> {
    let config = MonitorConfig::default().apply_env(baked)?;
    config.validate()?;
    Ok(config)
}
