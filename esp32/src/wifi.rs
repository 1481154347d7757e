use airwatch_common::{BoxError, NetworkLink, WifiConfig};
use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::info;

type Wifi = BlockingWifi<EspWifi<'static>>;

/// Wi-Fi station joining the configured network.
pub struct WifiLink {
    wifi: Wifi,
    config: WifiConfig,
}

impl WifiLink {
    pub fn new(wifi: Wifi, config: WifiConfig) -> Self {
        Self { wifi, config }
    }
}

impl NetworkLink for WifiLink {
    fn connect(&mut self) -> Result<(), BoxError> {
        let auth_method = if self.config.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        let wifi_configuration: Configuration = Configuration::Client(ClientConfiguration {
            ssid: self
                .config
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| "SSID does not fit the driver's buffer")?,
            bssid: None,
            auth_method,
            password: self
                .config
                .password
                .as_str()
                .try_into()
                .map_err(|_| "password does not fit the driver's buffer")?,
            channel: None,
            ..Default::default()
        });

        self.wifi.set_configuration(&wifi_configuration)?;

        self.wifi.start()?;
        info!("Wifi started");

        // Only starts association; the caller polls `is_connected` until the link is up.
        self.wifi.wifi_mut().connect()?;
        info!("Wifi connecting to {}", self.config.ssid);

        Ok(())
    }

    /// Up means associated and holding a DHCP lease.
    fn is_connected(&self) -> Result<bool, BoxError> {
        if !self.wifi.is_up()? {
            return Ok(false);
        }

        let ip_info = self.wifi.wifi().sta_netif().get_ip_info()?;
        info!("Wifi DHCP info: {:?}", ip_info);
        Ok(true)
    }
}
