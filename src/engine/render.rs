use crate::engine::spec::LaunchSpec;
use crate::quote::sh_quote;

// ======================================================
// SCRIPT RENDERING
// ======================================================

/// Render one container's script block: a comment naming the container
/// and a single docker run invocation, one argument per line.
pub fn render_block(spec: &LaunchSpec) -> String {
    format!("# Container: {}\n{}\n", spec.name, render_command(spec))
}

/// Argument order is fixed so regenerated scripts diff cleanly:
/// name, network, restart, ports, mounts, devices, capabilities,
/// sysctls, env, labels, image, command tokens.
fn render_command(spec: &LaunchSpec) -> String {
    let mut args: Vec<String> = Vec::new();

    args.push(format!("--name {}", sh_quote(&spec.name)));

    if let Some(network) = &spec.network {
        args.push(format!("--network {}", sh_quote(network)));
    }

    if let Some(policy) = &spec.restart_policy {
        args.push(format!("--restart {}", sh_quote(policy)));
    }

    for port in &spec.ports {
        args.push(format!("-p {}", sh_quote(&port.to_string())));
    }

    for mount in &spec.mounts {
        args.push(format!("-v {}", sh_quote(&mount.to_string())));
    }

    for device in &spec.devices {
        args.push(format!("--device {}", sh_quote(&device.to_string())));
    }

    for cap in &spec.capabilities {
        args.push(format!("--cap-add {}", sh_quote(cap)));
    }

    for (key, value) in &spec.sysctls {
        args.push(format!("--sysctl {}", sh_quote(&format!("{}={}", key, value))));
    }

    for (key, value) in &spec.env {
        args.push(format!("-e {}", sh_quote(&format!("{}={}", key, value))));
    }

    for (key, value) in &spec.labels {
        args.push(format!("--label {}", sh_quote(&format!("{}={}", key, value))));
    }

    args.push(sh_quote(&spec.image));

    if let Some(command) = &spec.command {
        for token in command {
            args.push(sh_quote(token));
        }
    }

    let mut lines = Vec::with_capacity(args.len() + 1);
    lines.push("docker run".to_string());
    for arg in args {
        lines.push(format!("  {}", arg));
    }
    lines.join(" \\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::spec::{DeviceSpec, MountSpec, PortSpec, Protocol};
    use std::collections::{BTreeMap, BTreeSet};

    fn sample_spec() -> LaunchSpec {
        let mut ports = BTreeSet::new();
        ports.insert(PortSpec {
            host_port: 8443,
            container_port: 443,
            protocol: Protocol::Tcp,
            host_ip: None,
        });
        ports.insert(PortSpec {
            host_port: 8080,
            container_port: 80,
            protocol: Protocol::Tcp,
            host_ip: None,
        });

        let mut capabilities = BTreeSet::new();
        capabilities.insert("NET_ADMIN".to_string());

        let mut sysctls = BTreeMap::new();
        sysctls.insert("net.ipv4.ip_forward".to_string(), "1".to_string());

        let mut env = BTreeMap::new();
        env.insert("TZ".to_string(), "UTC".to_string());

        let mut labels = BTreeMap::new();
        labels.insert("homepage.group".to_string(), "Tools".to_string());

        LaunchSpec {
            name: "web".to_string(),
            image: "nginx:1.25".to_string(),
            network: Some("home".to_string()),
            restart_policy: Some("unless-stopped".to_string()),
            ports,
            mounts: vec![MountSpec {
                source: "/srv/web".to_string(),
                target: "/usr/share/nginx/html".to_string(),
                read_only: true,
            }],
            capabilities,
            sysctls,
            devices: vec![DeviceSpec {
                host_path: "/dev/net/tun".to_string(),
                container_path: "/dev/net/tun".to_string(),
                permissions: "rwm".to_string(),
            }],
            env,
            labels,
            command: Some(vec![
                "nginx".to_string(),
                "-g".to_string(),
                "daemon off;".to_string(),
            ]),
        }
    }

    #[test]
    fn minimal_spec_renders_the_exact_block() {
        let spec = LaunchSpec {
            name: "web".to_string(),
            image: "nginx".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_block(&spec),
            "# Container: web\ndocker run \\\n  --name web \\\n  nginx\n"
        );
    }

    #[test]
    fn arguments_follow_the_fixed_order() {
        let block = render_block(&sample_spec());
        let needles = [
            "--name",
            "--network",
            "--restart",
            "-p ",
            "-v ",
            "--device",
            "--cap-add",
            "--sysctl",
            "-e ",
            "--label",
            "nginx:1.25",
            "daemon off;",
        ];
        let positions: Vec<usize> = needles
            .iter()
            .map(|needle| {
                block
                    .find(needle)
                    .unwrap_or_else(|| panic!("missing {:?} in:\n{}", needle, block))
            })
            .collect();
        for pair in positions.windows(2) {
            assert!(pair[0] < pair[1], "argument order broken in:\n{}", block);
        }
    }

    #[test]
    fn ports_render_sorted_by_host_port() {
        let block = render_block(&sample_spec());
        let p8080 = block.find("8080:80/tcp").unwrap();
        let p8443 = block.find("8443:443/tcp").unwrap();
        assert!(p8080 < p8443);
    }

    #[test]
    fn every_line_but_the_last_continues() {
        let block = render_block(&sample_spec());
        let command = block.strip_prefix("# Container: web\n").unwrap();
        let lines: Vec<&str> = command.trim_end().lines().collect();
        let (last, rest) = lines.split_last().unwrap();
        for line in rest {
            assert!(line.ends_with(" \\"), "unterminated line: {:?}", line);
        }
        assert!(!last.ends_with(" \\"));
    }

    #[test]
    fn backticked_values_render_as_single_quoted_words() {
        let mut spec = LaunchSpec {
            name: "vaultwarden".to_string(),
            image: "vaultwarden/server:latest".to_string(),
            ..Default::default()
        };
        spec.labels.insert(
            "traefik.http.routers.vaultwarden.rule".to_string(),
            "Host(`vaultwarden.example.com`)".to_string(),
        );

        let block = render_block(&spec);
        assert!(block.contains(
            "--label 'traefik.http.routers.vaultwarden.rule=Host(`vaultwarden.example.com`)'"
        ));
        assert!(block.contains("'vaultwarden/server:latest'"));
    }
}
