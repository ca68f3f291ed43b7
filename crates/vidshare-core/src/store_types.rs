use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Store backend types
///
/// This enum defines the available media store backends.
/// It's defined in core because it's used in configuration and by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local maps; nothing survives the process.
    Memory,
    /// Objects and a JSON table snapshot under a local directory.
    Local,
    /// Hosted backend-as-a-service reached over HTTP.
    Rest,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "local" => Ok(StoreBackend::Local),
            "rest" => Ok(StoreBackend::Rest),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Local => write!(f, "local"),
            StoreBackend::Rest => write!(f, "rest"),
        }
    }
}
