//! Merchant configuration.
//!
//! A [`MerchantConfig`] is constructed once and never mutated afterwards, so
//! a single client instance can serve concurrent calls without locking.

use std::fmt;
use std::str::FromStr;

/// Protocol version of the checkout API.
///
/// Subscription (recurring) orders are only available on [`V2`](ProtocolVersion::V2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVersion {
    /// Protocol `1.0`, the default.
    #[default]
    V1,
    /// Protocol `2.0`, required for subscription orders.
    V2,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::V1 => write!(f, "1.0"),
            ProtocolVersion::V2 => write!(f, "2.0"),
        }
    }
}

/// Error returned when parsing an unknown protocol version string.
#[derive(Debug, thiserror::Error)]
#[error("unknown protocol version {0:?}: expected \"1.0\" or \"2.0\"")]
pub struct UnknownProtocolVersion(pub String);

impl FromStr for ProtocolVersion {
    type Err = UnknownProtocolVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1.0" => Ok(ProtocolVersion::V1),
            "2.0" => Ok(ProtocolVersion::V2),
            other => Err(UnknownProtocolVersion(other.to_owned())),
        }
    }
}

/// Merchant credentials and protocol settings for the checkout API.
#[derive(Debug, Clone)]
pub struct MerchantConfig {
    /// Merchant identifier assigned by the gateway.
    pub merchant_id: String,
    /// Secret key bytes for request signing.
    secret: Box<[u8]>,
    /// Protocol version used for every request.
    pub version: ProtocolVersion,
}

impl MerchantConfig {
    /// Create a new `MerchantConfig` on protocol `1.0`.
    pub fn new(merchant_id: impl Into<String>, secret: impl Into<Box<[u8]>>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            secret: secret.into(),
            version: ProtocolVersion::default(),
        }
    }

    /// Select the protocol version (subscription orders require `2.0`).
    pub fn with_version(mut self, version: ProtocolVersion) -> Self {
        self.version = version;
        self
    }

    /// Get the secret key bytes for request signing.
    pub fn secret_bytes(&self) -> &[u8] {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_version_roundtrip() {
        assert_eq!("1.0".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V1);
        assert_eq!("2.0".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V2);
        assert_eq!(ProtocolVersion::V2.to_string(), "2.0");
        assert!("3.0".parse::<ProtocolVersion>().is_err());
    }

    #[test]
    fn test_defaults_to_v1() {
        let config = MerchantConfig::new("1396424", b"test".to_vec());
        assert_eq!(config.version, ProtocolVersion::V1);
        assert_eq!(config.secret_bytes(), b"test");
    }
}
