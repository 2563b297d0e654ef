//! Configuration for stackcmd
//!
//! Settings shared by the client facade and the reply decoder.

use serde::{Deserialize, Serialize};

use crate::protocol::{ProtocolVersion, MAX_BULK_LEN};

/// Client-side configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Reply encoding the connection negotiated; selects the parse branch
    pub protocol: ProtocolVersion,

    /// Largest bulk string the decoder accepts (in bytes)
    pub max_bulk_len: usize,

    // -------------------------------------------------------------------------
    // Key Configuration
    // -------------------------------------------------------------------------
    /// Namespace prepended to key arguments on every send
    pub key_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: ProtocolVersion::Resp2,
            max_bulk_len: MAX_BULK_LEN, // 512 MB
            key_prefix: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the reply protocol version
    pub fn protocol(mut self, protocol: ProtocolVersion) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Set the key prefix; an empty prefix disables prefixing
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.config.key_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Set the maximum bulk string length (in bytes)
    pub fn max_bulk_len(mut self, len: usize) -> Self {
        self.config.max_bulk_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
