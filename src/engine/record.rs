use std::collections::HashMap;

// ======================================================
// RAW CONTAINER RECORD
// ======================================================

/// One container's launch-relevant settings exactly as the daemon
/// reports them. Fields stay optional or loosely typed wherever the
/// daemon leaves them unset for containers started with defaults;
/// normalization turns this into a canonical LaunchSpec.
#[derive(Debug, Clone, Default)]
pub struct ContainerRecord {
    pub name: String,
    pub image: String,
    pub network_mode: Option<String>,
    pub ports: Vec<PortBindingRecord>,
    pub mounts: Vec<MountRecord>,
    pub env: Vec<String>,
    pub labels: HashMap<String, String>,
    pub capabilities: Vec<String>,
    pub sysctls: HashMap<String, String>,
    pub devices: Vec<DeviceRecord>,
    pub restart_policy: Option<RestartPolicyRecord>,
    pub command: Vec<String>,
}

/// One host binding for one exposed container port.
#[derive(Debug, Clone, Default)]
pub struct PortBindingRecord {
    /// Container port spec as reported: `"80/tcp"`, `"53/udp"`, `"9000"`.
    pub container_port: String,
    pub host_ip: Option<String>,
    pub host_port: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MountRecord {
    pub kind: MountKind,
    pub name: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub read_write: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountKind {
    Bind,
    Volume,
    /// tmpfs, npipe and friends; not expressible as -v, skipped.
    #[default]
    Other,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceRecord {
    pub host_path: Option<String>,
    pub container_path: Option<String>,
    pub cgroup_permissions: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RestartPolicyRecord {
    /// Policy name as reported; empty means none recorded.
    pub name: String,
    pub maximum_retry_count: i64,
}
