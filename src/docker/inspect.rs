use bollard::models::{ContainerInspectResponse, MountPointTypeEnum};

use crate::engine::record::{
    ContainerRecord, DeviceRecord, MountKind, MountRecord, PortBindingRecord,
    RestartPolicyRecord,
};

// ======================================================
// INSPECTION MAPPING
// ======================================================

/// Flatten the daemon's inspection response into a ContainerRecord.
/// Every section of the response is optional; missing sections simply
/// leave the matching record fields empty.
pub fn record_from_inspect(container: ContainerInspectResponse) -> ContainerRecord {
    let mut record = ContainerRecord {
        name: container_name(&container),
        ..Default::default()
    };

    if let Some(config) = container.config {
        if let Some(image) = config.image {
            record.image = image;
        }
        if let Some(env) = config.env {
            record.env = env;
        }
        if let Some(labels) = config.labels {
            record.labels = labels;
        }
        if let Some(cmd) = config.cmd {
            record.command = cmd;
        }
    }

    // The config image is the human-readable reference; the top-level
    // field is a content digest and only serves as a fallback.
    if record.image.is_empty() {
        if let Some(image) = container.image {
            record.image = image;
        }
    }

    if let Some(host_config) = container.host_config {
        record.network_mode = host_config.network_mode;

        if let Some(caps) = host_config.cap_add {
            record.capabilities = caps;
        }
        if let Some(sysctls) = host_config.sysctls {
            record.sysctls = sysctls;
        }
        if let Some(devices) = host_config.devices {
            for device in devices {
                record.devices.push(DeviceRecord {
                    host_path: device.path_on_host,
                    container_path: device.path_in_container,
                    cgroup_permissions: device.cgroup_permissions,
                });
            }
        }
        if let Some(policy) = host_config.restart_policy {
            record.restart_policy = Some(RestartPolicyRecord {
                name: policy.name.map(|n| n.to_string()).unwrap_or_default(),
                maximum_retry_count: policy.maximum_retry_count.unwrap_or(0),
            });
        }
    }

    if let Some(mounts) = container.mounts {
        for mount in mounts {
            record.mounts.push(MountRecord {
                kind: mount_kind(mount.typ),
                name: mount.name,
                source: mount.source,
                destination: mount.destination,
                read_write: mount.rw,
            });
        }
    }

    if let Some(settings) = container.network_settings {
        if let Some(ports) = settings.ports {
            for (container_port, bindings) in ports {
                // Null bindings mean the port is exposed but unpublished.
                let bindings = match bindings {
                    Some(b) => b,
                    None => continue,
                };
                for binding in bindings {
                    record.ports.push(PortBindingRecord {
                        container_port: container_port.clone(),
                        host_ip: binding.host_ip,
                        host_port: binding.host_port,
                    });
                }
            }
        }
    }

    record
}

fn container_name(container: &ContainerInspectResponse) -> String {
    if let Some(name) = &container.name {
        let trimmed = name.trim_start_matches('/');
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    if let Some(id) = &container.id {
        if !id.is_empty() {
            return id.chars().take(12).collect();
        }
    }
    "container".to_string()
}

fn mount_kind(typ: Option<MountPointTypeEnum>) -> MountKind {
    match typ {
        Some(MountPointTypeEnum::BIND) => MountKind::Bind,
        Some(MountPointTypeEnum::VOLUME) => MountKind::Volume,
        _ => MountKind::Other,
    }
}
