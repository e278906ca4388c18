//! Convenience types for the provider protocol.

use serde::{Deserialize, Serialize};

/// Provider metadata returned by GetMetadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderMetadata {
    /// The provider's type name, used as the prefix of every data source name.
    pub type_name: String,
    /// The provider version.
    pub version: String,
    /// List of resource type names. Always empty for this provider.
    pub resources: Vec<String>,
    /// List of data source type names.
    pub data_sources: Vec<String>,
}

/// Version of the `provider.v1` gRPC protocol, written in the handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// First field of the handshake line.
pub const HANDSHAKE_PREFIX: &str = "PINGDOM_PROVIDER";

/// Environment variable the host sets before launching the plugin.
pub const MAGIC_COOKIE_KEY: &str = "PINGDOM_PROVIDER_MAGIC_COOKIE";

/// Expected value of [`MAGIC_COOKIE_KEY`].
pub const MAGIC_COOKIE_VALUE: &str = "provider.v1";

/// Format the handshake line printed on stdout once the server listens.
///
/// Format: `PINGDOM_PROVIDER|<protocol_version>|<address>`
pub fn handshake_line(addr: std::net::SocketAddr) -> String {
    format!("{}|{}|{}", HANDSHAKE_PREFIX, PROTOCOL_VERSION, addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_line() {
        let addr: std::net::SocketAddr = "127.0.0.1:50051".parse().unwrap();
        assert_eq!(handshake_line(addr), "PINGDOM_PROVIDER|1|127.0.0.1:50051");
    }

    #[test]
    fn test_metadata_default_is_empty() {
        let metadata = ProviderMetadata::default();
        assert!(metadata.resources.is_empty());
        assert!(metadata.data_sources.is_empty());
    }
}
