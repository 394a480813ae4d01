//! ISY-994 controller integration
//!
//! Talks to a Universal Devices ISY-994 hub through the hub-communication
//! library (behind [`HubConnection`]), sorts the reported device nodes and
//! programs into entity platforms, and exposes thin entity views over the
//! results. Classification is a pure single pass; the caller owns the
//! returned mappings and rebuilds them on reload.

pub mod classifier;
pub mod entity;
pub mod filters;
pub mod light;
pub mod node;
pub mod sensor;
pub mod switch;
pub mod uom;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub use classifier::{classify_nodes, classify_programs, NodeClassification, ProgramClassification};
pub use node::{CommandSink, Node, NodeStatus, ProgramFolder, ProgramNode, Protocol};

pub const DOMAIN: &str = "isy994";

pub const MANUFACTURER: &str = "Universal Devices, Inc";

pub const DEFAULT_IGNORE_STRING: &str = "{IGNORE ME}";
pub const DEFAULT_SENSOR_STRING: &str = "sensor";

/// Integration configuration, from the host's YAML config.
#[derive(Debug, Clone, Deserialize)]
pub struct IsyConfig {
    /// Hub URL, http or https
    pub host: String,
    pub username: String,
    pub password: String,
    /// TLS version override for older hub firmware
    #[serde(default)]
    pub tls: Option<f32>,
    /// Nodes whose name or path contains this token are not imported
    #[serde(default = "default_ignore_string")]
    pub ignore_string: String,
    /// Nodes whose name or path contains this token are forced to the
    /// sensor platforms
    #[serde(default = "default_sensor_string")]
    pub sensor_string: String,
}

fn default_ignore_string() -> String {
    DEFAULT_IGNORE_STRING.to_string()
}

fn default_sensor_string() -> String {
    DEFAULT_SENSOR_STRING.to_string()
}

impl IsyConfig {
    /// Parse the integration's section of the host YAML config.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }
}

/// Errors raised during integration setup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IsyError {
    /// The configured host URL is not http or https
    #[error("Invalid hub host: {0}")]
    InvalidHost(String),
    /// The hub-communication library could not reach the hub
    #[error("Hub is not connected")]
    HubUnreachable,
}

/// Where and how to reach the hub, derived from the configured URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub hostname: String,
    pub port: u16,
    pub https: bool,
}

/// Split the configured host URL into connection parameters. Only http
/// and https URLs are accepted.
pub fn parse_host(host: &str) -> Result<HostInfo, IsyError> {
    let (https, rest) = if let Some(rest) = host.strip_prefix("https://") {
        (true, rest)
    } else if let Some(rest) = host.strip_prefix("http://") {
        (false, rest)
    } else {
        return Err(IsyError::InvalidHost(host.to_string()));
    };

    let authority = rest.split('/').next().unwrap_or_default();
    if authority.is_empty() {
        return Err(IsyError::InvalidHost(host.to_string()));
    }

    let (hostname, port) = match authority.split_once(':') {
        Some((hostname, port)) => {
            let port = port
                .parse()
                .map_err(|_| IsyError::InvalidHost(host.to_string()))?;
            (hostname, port)
        }
        None => (authority, if https { 443 } else { 80 }),
    };

    Ok(HostInfo {
        hostname: hostname.to_string(),
        port,
        https,
    })
}

/// Connection to the hub, provided by the hub-communication library.
#[async_trait]
pub trait HubConnection: Send + Sync {
    /// Whether the library holds a live connection.
    async fn connected(&self) -> bool;

    /// Every device node as a (path, node) pair, in discovery order.
    async fn nodes(&self) -> Vec<(String, Arc<Node>)>;

    /// Root of the hub's program tree.
    async fn programs(&self) -> ProgramFolder;
}

/// Classified devices and programs, handed to per-platform entity setup.
#[derive(Debug)]
pub struct IsyData {
    pub nodes: NodeClassification,
    pub programs: ProgramClassification,
}

/// Set up the integration: validate the configured host, check the hub
/// connection, then run one classification pass over nodes and programs.
pub async fn setup(config: &IsyConfig, hub: &dyn HubConnection) -> Result<IsyData, IsyError> {
    parse_host(&config.host)?;

    if !hub.connected().await {
        return Err(IsyError::HubUnreachable);
    }

    let nodes = classify_nodes(
        hub.nodes().await,
        &config.ignore_string,
        &config.sensor_string,
    );
    let programs = classify_programs(&hub.programs().await);
    debug!("Classified {} nodes", nodes.len());

    Ok(IsyData { nodes, programs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ha_integration::Platform;

    #[test]
    fn test_config_defaults() {
        let config = IsyConfig::from_yaml(
            "host: https://isy.local\nusername: admin\npassword: secret\n",
        )
        .unwrap();
        assert_eq!(config.ignore_string, "{IGNORE ME}");
        assert_eq!(config.sensor_string, "sensor");
        assert_eq!(config.tls, None);
    }

    #[test]
    fn test_parse_host() {
        assert_eq!(
            parse_host("https://isy.local"),
            Ok(HostInfo {
                hostname: "isy.local".to_string(),
                port: 443,
                https: true,
            })
        );
        assert_eq!(
            parse_host("http://192.168.1.20:8080/desc"),
            Ok(HostInfo {
                hostname: "192.168.1.20".to_string(),
                port: 8080,
                https: false,
            })
        );
        assert!(matches!(
            parse_host("ftp://isy.local"),
            Err(IsyError::InvalidHost(_))
        ));
    }

    struct StaticHub {
        connected: bool,
    }

    #[async_trait]
    impl HubConnection for StaticHub {
        async fn connected(&self) -> bool {
            self.connected
        }

        async fn nodes(&self) -> Vec<(String, Arc<Node>)> {
            vec![(
                "/My Devices".to_string(),
                Arc::new(Node::new("1 2 3 1", "Outlet").with_node_def_id("RelayLampSwitch")),
            )]
        }

        async fn programs(&self) -> ProgramFolder {
            ProgramFolder::new("root")
        }
    }

    fn test_config() -> IsyConfig {
        IsyConfig {
            host: "http://isy.local".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            tls: None,
            ignore_string: DEFAULT_IGNORE_STRING.to_string(),
            sensor_string: DEFAULT_SENSOR_STRING.to_string(),
        }
    }

    #[tokio::test]
    async fn test_setup_classifies_nodes() {
        let hub = StaticHub { connected: true };
        let data = setup(&test_config(), &hub).await.unwrap();
        assert_eq!(data.nodes.nodes(Platform::Switch).len(), 1);
    }

    #[tokio::test]
    async fn test_setup_requires_connection() {
        let hub = StaticHub { connected: false };
        let err = setup(&test_config(), &hub).await.unwrap_err();
        assert_eq!(err, IsyError::HubUnreachable);
    }

    #[tokio::test]
    async fn test_setup_rejects_bad_scheme() {
        let hub = StaticHub { connected: true };
        let mut config = test_config();
        config.host = "isy.local".to_string();
        assert!(matches!(
            setup(&config, &hub).await,
            Err(IsyError::InvalidHost(_))
        ));
    }
}
