// Connection status reported to the renderer
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Connected,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    pub message: String,
}

impl ConnectionStatus {
    pub fn connecting() -> Self {
        Self::new(ConnectionState::Connecting, "Fetching data...")
    }

    pub fn connected() -> Self {
        Self::new(ConnectionState::Connected, "Live Data")
    }

    pub fn error() -> Self {
        Self::new(ConnectionState::Error, "Failed to fetch data")
    }

    fn new(state: ConnectionState, message: &str) -> Self {
        Self {
            state,
            message: message.to_string(),
        }
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::connecting()
    }
}
