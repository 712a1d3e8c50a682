//! Server configuration.

use clap::ValueEnum;
use std::path::PathBuf;

/// Which member of the server family to run on the listening socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceKind {
    /// Word-guessing game with a shared leaderboard
    Hangman,
    /// Echo, arithmetic, concatenation and a per-connection cart
    Utility,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub service: ServiceKind,
    /// Directory holding word lists and hangman stages; bundled copies are
    /// used when unset.
    pub resources: Option<PathBuf>,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            service: ServiceKind::Hangman,
            resources: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        assert_eq!(ServerConfig::default().address(), "127.0.0.1:8888");
    }

    #[test]
    fn test_address_parses_as_socket_addr() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..ServerConfig::default()
        };
        assert!(config.address().parse::<std::net::SocketAddr>().is_ok());
    }
}
