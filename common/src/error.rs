/// Error type the platform traits hand back. Each platform has its own error types
/// (`EspError`, `reqwest::Error`, ...), so they are boxed at the seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reading sensor `{sensor}` failed")]
    Sensor {
        sensor: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("network link failed")]
    Network(#[source] BoxError),

    #[error("sending record failed")]
    Uplink(#[source] BoxError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn sensor(sensor: &'static str, source: BoxError) -> Self {
        Self::Sensor { sensor, source }
    }
}
