use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::engine::record::{ContainerRecord, MountKind};
use crate::engine::spec::{DeviceSpec, LaunchSpec, MountSpec, PortSpec, Protocol};
use crate::filters::{is_default_capability, is_ignored_label_key, is_system_env_key};

// ======================================================
// NORMALIZATION
// ======================================================

/// Host addresses that mean "bind everywhere". Collapsed to the
/// unprefixed -p form so a dual-stack v4+v6 pair dedupes to one flag.
const WILDCARD_HOST_IPS: [&str; 3] = ["", "0.0.0.0", "::"];

/// Network modes that mean the daemon default.
const DEFAULT_NETWORK_MODES: [&str; 3] = ["", "bridge", "default"];

/// Reduce a raw inspection record to the canonical launch description.
///
/// Malformed fields are skipped, never fatal: one unparseable port
/// binding must not cost the operator the rest of the container.
pub fn normalize(record: &ContainerRecord, include_cmd: bool) -> LaunchSpec {
    LaunchSpec {
        name: record.name.clone(),
        image: record.image.clone(),
        network: normalize_network(record.network_mode.as_deref()),
        restart_policy: normalize_restart(record),
        ports: collect_ports(record),
        mounts: collect_mounts(record),
        capabilities: collect_capabilities(record),
        sysctls: record
            .sysctls
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        devices: collect_devices(record),
        env: filter_env(&record.env),
        labels: filter_labels(&record.labels),
        command: normalize_command(record, include_cmd),
    }
}

fn normalize_network(mode: Option<&str>) -> Option<String> {
    match mode {
        Some(m) if !DEFAULT_NETWORK_MODES.contains(&m) => Some(m.to_string()),
        _ => None,
    }
}

fn normalize_restart(record: &ContainerRecord) -> Option<String> {
    let policy = record.restart_policy.as_ref()?;
    if policy.name.is_empty() {
        return None;
    }
    if policy.name == "on-failure" && policy.maximum_retry_count > 0 {
        return Some(format!("on-failure:{}", policy.maximum_retry_count));
    }
    Some(policy.name.clone())
}

fn collect_ports(record: &ContainerRecord) -> BTreeSet<PortSpec> {
    let mut ports = BTreeSet::new();

    for binding in &record.ports {
        // Exposed but unpublished ports carry no host port.
        let host_port = match binding.host_port.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => continue,
        };
        let host_port: u16 = match host_port.parse() {
            Ok(p) => p,
            Err(_) => continue,
        };

        let (container_raw, proto_raw) = match binding.container_port.split_once('/') {
            Some((port, proto)) => (port, proto),
            None => (binding.container_port.as_str(), "tcp"),
        };
        let container_port: u16 = match container_raw.parse() {
            Ok(p) => p,
            Err(_) => continue,
        };
        let protocol = match Protocol::parse(proto_raw) {
            Some(p) => p,
            None => continue,
        };

        let host_ip = binding
            .host_ip
            .as_deref()
            .filter(|ip| !WILDCARD_HOST_IPS.contains(ip))
            .map(str::to_string);

        ports.insert(PortSpec {
            host_port,
            container_port,
            protocol,
            host_ip,
        });
    }

    ports
}

fn collect_mounts(record: &ContainerRecord) -> Vec<MountSpec> {
    let mut mounts = Vec::new();

    for mount in &record.mounts {
        let target = match mount.destination.as_deref() {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => continue,
        };

        let source = match mount.kind {
            MountKind::Bind => match mount.source.as_deref() {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => continue,
            },
            MountKind::Volume => {
                let named = mount.name.as_deref().filter(|n| !n.is_empty());
                let fallback = mount.source.as_deref().filter(|s| !s.is_empty());
                match named.or(fallback) {
                    Some(s) => s.to_string(),
                    None => continue,
                }
            }
            MountKind::Other => continue,
        };

        mounts.push(MountSpec {
            source,
            target,
            read_only: mount.read_write == Some(false),
        });
    }

    mounts
}

fn collect_capabilities(record: &ContainerRecord) -> BTreeSet<String> {
    record
        .capabilities
        .iter()
        .filter(|cap| !is_default_capability(cap))
        .cloned()
        .collect()
}

fn collect_devices(record: &ContainerRecord) -> Vec<DeviceSpec> {
    let mut devices = Vec::new();

    for device in &record.devices {
        let host_path = match device.host_path.as_deref() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => continue,
        };
        let container_path = match device.container_path.as_deref() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => continue,
        };
        let permissions = device
            .cgroup_permissions
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("rwm")
            .to_string();

        devices.push(DeviceSpec {
            host_path,
            container_path,
            permissions,
        });
    }

    devices
}

fn filter_env(env: &[String]) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    for entry in env {
        let (key, value) = match entry.split_once('=') {
            Some(kv) => kv,
            None => continue,
        };
        if is_system_env_key(key) {
            continue;
        }
        // First occurrence wins for duplicate keys.
        out.entry(key.to_string())
            .or_insert_with(|| value.to_string());
    }

    out
}

fn filter_labels(labels: &HashMap<String, String>) -> BTreeMap<String, String> {
    labels
        .iter()
        .filter(|(key, _)| !is_ignored_label_key(key))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn normalize_command(record: &ContainerRecord, include_cmd: bool) -> Option<Vec<String>> {
    if include_cmd && !record.command.is_empty() {
        Some(record.command.clone())
    } else {
        None
    }
}
