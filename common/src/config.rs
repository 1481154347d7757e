use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::{DhtModel, Error};

/// Credentials of the Wi-Fi network to join.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct WifiConfig {
    pub ssid: String,
    pub password: String,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: "your_ssid".into(),
            password: "your_password".into(),
        }
    }
}

/// Everything the monitor needs to know at start-up.
///
/// Missing fields fall back to the defaults, so a config file only has to name
/// what differs.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct MonitorConfig {
    pub wifi: WifiConfig,

    /// URL the records are POSTed to.
    pub endpoint: String,

    /// Seconds to sleep between two cycles.
    pub interval_secs: u64,

    pub dht_model: DhtModel,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            wifi: WifiConfig::default(),
            endpoint: "http://your_cloud_endpoint.com/data".into(),
            interval_secs: 10,
            dht_model: DhtModel::Dht11,
        }
    }
}

impl MonitorConfig {
    const MAX_SSID_LEN: usize = 32;
    const MAX_PASSWORD_LEN: usize = 64;
    const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading config from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Overrides fields with `AIRWATCH_*` variables found through `lookup`.
    ///
    /// Takes the lookup as a function so callers can pass `std::env::var(..).ok()`
    /// or a fixed table.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        if let Some(endpoint) = lookup("AIRWATCH_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(secs) = lookup("AIRWATCH_INTERVAL_SECS") {
            self.interval_secs = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("AIRWATCH_INTERVAL_SECS is not a number: {secs}")))?;
        }
        if let Some(ssid) = lookup("AIRWATCH_WIFI_SSID") {
            self.wifi.ssid = ssid;
        }
        if let Some(password) = lookup("AIRWATCH_WIFI_PASSWORD") {
            self.wifi.password = password;
        }
        if let Some(model) = lookup("AIRWATCH_DHT_MODEL") {
            self.dht_model = model.parse().map_err(|e| Error::Config(format!("{e}")))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }

        if self.interval() < self.dht_model.min_interval().max(Duration::from_secs(1)) {
            return Err(Error::Config(format!(
                "interval of {}s is too short for {:?}",
                self.interval_secs, self.dht_model
            )));
        }

        if self.interval_secs > Self::MAX_INTERVAL_SECS {
            return Err(Error::Config(format!(
                "interval must be at most {}s",
                Self::MAX_INTERVAL_SECS
            )));
        }

        if self.wifi.ssid.is_empty() || self.wifi.ssid.len() > Self::MAX_SSID_LEN {
            return Err(Error::Config(format!(
                "ssid must be 1 to {} bytes long",
                Self::MAX_SSID_LEN
            )));
        }

        if self.wifi.password.len() > Self::MAX_PASSWORD_LEN {
            return Err(Error::Config(format!(
                "password must be at most {} bytes long",
                Self::MAX_PASSWORD_LEN
            )));
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let config = MonitorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.interval(), Duration::from_secs(10));
        assert_eq!(config.dht_model, DhtModel::Dht11);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MonitorConfig::from_json(
            r#"{ "endpoint": "https://example.org/ingest", "wifi": { "ssid": "lab" }, "dht_model": "dht22" }"#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://example.org/ingest");
        assert_eq!(config.wifi.ssid, "lab");
        assert_eq!(config.wifi.password, "your_password");
        assert_eq!(config.interval_secs, 10);
        assert_eq!(config.dht_model, DhtModel::Dht22);
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("AIRWATCH_ENDPOINT", "http://10.0.0.2:8080/data"),
            ("AIRWATCH_INTERVAL_SECS", " 30 "),
            ("AIRWATCH_DHT_MODEL", "DHT22"),
        ]
        .into_iter()
        .collect();

        let config = MonitorConfig::default()
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.endpoint, "http://10.0.0.2:8080/data");
        assert_eq!(config.interval_secs, 30);
        assert_eq!(config.dht_model, DhtModel::Dht22);
        assert_eq!(config.wifi, WifiConfig::default());
    }

    #[test]
    fn bad_interval_in_env_is_a_config_error() {
        let result = MonitorConfig::default().apply_env(|key| {
            (key == "AIRWATCH_INTERVAL_SECS").then(|| "often".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = MonitorConfig {
            endpoint: "mqtt://broker/data".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_interval_below_sensor_minimum() {
        let config = MonitorConfig {
            interval_secs: 1,
            dht_model: DhtModel::Dht22,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MonitorConfig {
            interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MonitorConfig {
            interval_secs: 2 * 24 * 60 * 60,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_ssid() {
        let mut config = MonitorConfig::default();
        config.wifi.ssid = "x".repeat(33);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_ssid() {
        let mut config = MonitorConfig::default();
        config.wifi.ssid.clear();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_oversized_password() {
        let mut config = MonitorConfig::default();
        config.wifi.password = "p".repeat(64);
        config.validate().unwrap();

        config.wifi.password.push('p');
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let result = MonitorConfig::from_json(r#"{ "interval_secs": "ten" "#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn unknown_dht_model_in_env_is_a_config_error() {
        let result = MonitorConfig::default()
            .apply_env(|key| (key == "AIRWATCH_DHT_MODEL").then(|| "bme280".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn loads_config_file() {
        let path = std::env::temp_dir().join(format!("airwatch-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "interval_secs": 60, "wifi": { "ssid": "greenhouse" } }"#).unwrap();

        let config = MonitorConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.interval_secs, 60);
        assert_eq!(config.wifi.ssid, "greenhouse");
        assert_eq!(config.endpoint, MonitorConfig::default().endpoint);
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let path = std::env::temp_dir().join("airwatch-config-does-not-exist.json");
        assert!(matches!(MonitorConfig::load(path), Err(Error::Io(_))));
    }
}
