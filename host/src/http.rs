use airwatch_common::{BoxError, Delivery, SensorRecord, Uplink};
use log::info;

/// Posts records to the configured endpoint with a blocking `reqwest` client.
pub struct HttpUplink {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpUplink {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("airwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Uplink for HttpUplink {
    fn send(&mut self, record: &SensorRecord) -> Result<Delivery, BoxError> {
        info!("-> POST {}", self.endpoint);

        // `json` sets `content-type: application/json`.
        let response = self.client.post(&self.endpoint).json(record).send()?;

        let status = response.status().as_u16();
        info!("<- {}", status);

        Ok(Delivery {
            status,
            body: response.text()?,
        })
    }
}
