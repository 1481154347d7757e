use crate::{BoxError, SensorRecord};

/// What the endpoint answered to a posted record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
    pub body: String,
}

impl Delivery {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends records to the remote endpoint.
///
/// Implementations POST the record's JSON (see [`SensorRecord::to_json`]) with
/// `content-type: application/json`. No authentication and no retries.
pub trait Uplink {
    fn send(&mut self, record: &SensorRecord) -> Result<Delivery, BoxError>;
}
