//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;

const BIND_ADDR_VAR: &str = "BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read the configuration from the environment.
    ///
    /// `BIND_ADDR` overrides the default of `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the variable holds an unparseable
    /// address.
    pub fn from_env() -> std::io::Result<Self> {
        let raw = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let bind_addr = raw
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid {BIND_ADDR_VAR} '{raw}': {e}")))?;
        Ok(Self::new(bind_addr))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_addr_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().expect("default bind address");
        assert_eq!(addr.port(), 8080);
    }
}
