use airwatch_common::{BoxError, Delivery, SensorRecord, Uplink};
use embedded_svc::http::client::Client as HttpClient;
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
use log::info;

/// Posts records with the ESP-IDF HTTP client.
pub struct EspUplink {
    client: HttpClient<EspHttpConnection>,
    endpoint: String,
}

impl EspUplink {
    /// Longest response body kept for logging.
    const MAX_BODY: usize = 1024;

    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let connection = EspHttpConnection::new(&Configuration {
            use_global_ca_store: true,
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        })?;

        Ok(Self {
            client: HttpClient::wrap(connection),
            endpoint: endpoint.into(),
        })
    }
}

impl Uplink for EspUplink {
    fn send(&mut self, record: &SensorRecord) -> Result<Delivery, BoxError> {
        use embedded_svc::utils::io;
        use esp_idf_svc::io::Write;

        let payload = record.to_json()?;
        let content_length = payload.len().to_string();
        let headers = [
            ("content-type", "application/json"),
            ("content-length", content_length.as_str()),
        ];

        let mut request = self.client.post(&self.endpoint, &headers)?;
        request.write_all(payload.as_bytes())?;
        request.flush()?;
        info!("-> POST {}", self.endpoint);

        let mut response = request.submit()?;
        let status = response.status();
        info!("<- {}", status);

        let mut buf = [0u8; Self::MAX_BODY];
        let bytes_read = io::try_read_full(&mut response, &mut buf).map_err(|e| e.0)?;

        Ok(Delivery {
            status,
            body: String::from_utf8_lossy(&buf[..bytes_read]).into_owned(),
        })
    }
}
