use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ======================================================
// LAUNCH SPEC
// ======================================================

/// Canonical, deduplicated launch description for one container.
/// Built once per container, merged with operator additions at most
/// once, rendered, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchSpec {
    pub name: String,
    pub image: String,
    /// None means the default bridge network; no --network flag emitted.
    pub network: Option<String>,
    pub restart_policy: Option<String>,
    pub ports: BTreeSet<PortSpec>,
    /// Inspection order preserved; binds and named volumes uniform.
    pub mounts: Vec<MountSpec>,
    pub capabilities: BTreeSet<String>,
    pub sysctls: BTreeMap<String, String>,
    pub devices: Vec<DeviceSpec>,
    pub env: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    /// Present only when command inclusion was requested.
    pub command: Option<Vec<String>>,
}

// ======================================================
// PORTS
// ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub fn parse(raw: &str) -> Option<Protocol> {
        match raw {
            "tcp" => Some(Protocol::Tcp),
            "udp" => Some(Protocol::Udp),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

/// One published port. Field order carries the derived ordering used
/// at render time: host port, then container port, then protocol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PortSpec {
    pub host_port: u16,
    pub container_port: u16,
    pub protocol: Protocol,
    /// Set only for bindings fixed to a specific address. Wildcard
    /// bindings (0.0.0.0, ::) normalize to None so a dual-stack pair
    /// collapses into one entry.
    pub host_ip: Option<String>,
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host_ip {
            Some(ip) => write!(
                f,
                "{}:{}:{}/{}",
                ip, self.host_port, self.container_port, self.protocol
            ),
            None => write!(
                f,
                "{}:{}/{}",
                self.host_port, self.container_port, self.protocol
            ),
        }
    }
}

// ======================================================
// MOUNTS
// ======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    /// Host path for bind mounts, volume name for named volumes.
    pub source: String,
    pub target: String,
    pub read_only: bool,
}

impl fmt::Display for MountSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.read_only {
            write!(f, "{}:{}:ro", self.source, self.target)
        } else {
            write!(f, "{}:{}", self.source, self.target)
        }
    }
}

// ======================================================
// DEVICES
// ======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSpec {
    pub host_path: String,
    pub container_path: String,
    /// Cgroup permission string, `rwm` when the daemon reports none.
    pub permissions: String,
}

impl fmt::Display for DeviceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.host_path, self.container_path, self.permissions
        )
    }
}
