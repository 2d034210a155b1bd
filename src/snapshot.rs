use anyhow::{anyhow, Result};
use colored::*;

use crate::docker::{ContainerHandle, ContainerSource, DockerSource};
use crate::engine::{normalize, render_block, Additions};
use crate::output::{write_combined, write_per_container, OutputTarget, RenderedContainer};

// ======================================================
// SNAPSHOT OPTIONS
// ======================================================

pub struct SnapshotOptions {
    pub patterns: Vec<String>,
    pub additions: Additions,
    pub include_cmd: bool,
    pub no_overwrite: bool,
}

// ======================================================
// SNAPSHOT RUN
// ======================================================

pub async fn run(options: SnapshotOptions, target: OutputTarget) -> Result<()> {
    let source = DockerSource::connect()?;
    snapshot(&source, &options, &target).await
}

pub async fn snapshot<S: ContainerSource>(
    source: &S,
    options: &SnapshotOptions,
    target: &OutputTarget,
) -> Result<()> {
    let containers = source.list_running().await?;
    let selected = select_containers(containers, &options.patterns);

    if selected.is_empty() {
        eprintln!("No matching running containers found.");
        return Ok(());
    }

    let rendered = build_blocks(source, selected, options).await;
    if rendered.is_empty() {
        return Err(anyhow!("no containers could be inspected"));
    }

    match target {
        OutputTarget::Combined(path) => {
            if write_combined(path, &rendered, options.no_overwrite)? {
                println!(
                    "Wrote {} container definitions to {}",
                    rendered.len().to_string().green(),
                    path.display()
                );
            }
        }
        OutputTarget::PerContainer(dir) => {
            let written = write_per_container(dir, &rendered, options.no_overwrite)?;

            let counts_raw = format!("{}/{}", written, rendered.len());
            let counts = if written == rendered.len() {
                counts_raw.green()
            } else {
                counts_raw.yellow()
            };
            println!("Wrote {} container scripts to {}", counts, dir.display());
        }
    }

    Ok(())
}

/// Keep containers whose name contains any pattern, case-insensitive.
/// No patterns selects everything.
pub fn select_containers(
    containers: Vec<ContainerHandle>,
    patterns: &[String],
) -> Vec<ContainerHandle> {
    if patterns.is_empty() {
        return containers;
    }
    let needles: Vec<String> = patterns.iter().map(|p| p.to_lowercase()).collect();
    containers
        .into_iter()
        .filter(|handle| {
            let name = handle.name.to_lowercase();
            needles.iter().any(|needle| name.contains(needle))
        })
        .collect()
}

async fn build_blocks<S: ContainerSource>(
    source: &S,
    selected: Vec<ContainerHandle>,
    options: &SnapshotOptions,
) -> Vec<RenderedContainer> {
    let mut rendered = Vec::new();

    for handle in selected {
        let record = match source.inspect(&handle.id).await {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Skipping '{}': {}", handle.name, e);
                continue;
            }
        };

        let mut spec = normalize(&record, options.include_cmd);
        options.additions.apply(&mut spec);

        rendered.push(RenderedContainer {
            name: spec.name.clone(),
            block: render_block(&spec),
        });
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ContainerRecord;
    use crate::error::SnapshotError;
    use async_trait::async_trait;
    use std::fs;
    use std::path::PathBuf;

    struct StubSource {
        records: Vec<ContainerRecord>,
        fail: Vec<String>,
    }

    #[async_trait]
    impl ContainerSource for StubSource {
        async fn list_running(&self) -> Result<Vec<ContainerHandle>, SnapshotError> {
            Ok(self
                .records
                .iter()
                .enumerate()
                .map(|(i, record)| ContainerHandle {
                    id: format!("id-{}", i),
                    name: record.name.clone(),
                })
                .collect())
        }

        async fn inspect(&self, id: &str) -> Result<ContainerRecord, SnapshotError> {
            if self.fail.iter().any(|f| f == id) {
                return Err(SnapshotError::Inspect {
                    id: id.to_string(),
                    source: bollard::errors::Error::DockerResponseServerError {
                        status_code: 404,
                        message: "no such container".to_string(),
                    },
                });
            }
            let index: usize = id.trim_start_matches("id-").parse().unwrap();
            Ok(self.records[index].clone())
        }
    }

    fn handle(name: &str) -> ContainerHandle {
        ContainerHandle {
            id: name.to_string(),
            name: name.to_string(),
        }
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "recreata-snap-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn selection_matches_case_insensitive_substrings() {
        let containers = vec![handle("OpenHAB"), handle("vaultwarden"), handle("nginx")];

        let selected = select_containers(containers.clone(), &["hab".to_string()]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "OpenHAB");

        let selected = select_containers(containers.clone(), &["VAULT".to_string()]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "vaultwarden");

        let selected = select_containers(
            containers.clone(),
            &["hab".to_string(), "VAULT".to_string()],
        );
        assert_eq!(selected.len(), 2);

        let selected = select_containers(containers, &[]);
        assert_eq!(selected.len(), 3);
    }

    #[tokio::test]
    async fn vaultwarden_end_to_end() {
        let record = ContainerRecord {
            name: "vaultwarden".to_string(),
            image: "vaultwarden/server:latest".to_string(),
            network_mode: Some("bridge".to_string()),
            env: vec![
                "PATH=/usr/local/sbin:/usr/local/bin".to_string(),
                "TZ=UTC".to_string(),
            ],
            ..Default::default()
        };
        let source = StubSource {
            records: vec![record],
            fail: vec![],
        };

        let options = SnapshotOptions {
            patterns: vec![],
            additions: Additions {
                labels: vec![(
                    "traefik.http.routers.{{name}}.rule".to_string(),
                    "Host(`{{name}}.example.com`)".to_string(),
                )],
                ..Default::default()
            },
            include_cmd: false,
            no_overwrite: false,
        };

        let dir = temp_dir("vaultwarden");
        let path = dir.join("recreate.sh");
        let target = OutputTarget::Combined(path.clone());

        snapshot(&source, &options, &target).await.unwrap();

        let script = fs::read_to_string(&path).unwrap();
        assert!(script.contains("--name vaultwarden"));
        assert!(script.contains("'vaultwarden/server:latest'"));
        assert!(script.contains("-e TZ=UTC"));
        assert!(!script.contains("PATH="));
        assert!(!script.contains("--network"));
        assert!(script.contains(
            "--label 'traefik.http.routers.vaultwarden.rule=Host(`vaultwarden.example.com`)'"
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn failed_inspections_skip_only_that_container() {
        let web = ContainerRecord {
            name: "web".to_string(),
            image: "nginx".to_string(),
            ..Default::default()
        };
        let db = ContainerRecord {
            name: "db".to_string(),
            image: "postgres".to_string(),
            ..Default::default()
        };
        let source = StubSource {
            records: vec![web, db],
            fail: vec!["id-0".to_string()],
        };

        let options = SnapshotOptions {
            patterns: vec![],
            additions: Additions::default(),
            include_cmd: false,
            no_overwrite: false,
        };

        let dir = temp_dir("partial");
        let target = OutputTarget::PerContainer(dir.clone());

        snapshot(&source, &options, &target).await.unwrap();

        assert!(!dir.join("web.sh").exists());
        assert!(dir.join("db.sh").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn unmatched_patterns_exit_cleanly() {
        let record = ContainerRecord {
            name: "web".to_string(),
            image: "nginx".to_string(),
            ..Default::default()
        };
        let source = StubSource {
            records: vec![record],
            fail: vec![],
        };

        let options = SnapshotOptions {
            patterns: vec!["zzz".to_string()],
            additions: Additions::default(),
            include_cmd: false,
            no_overwrite: false,
        };

        let dir = temp_dir("unmatched");
        let target = OutputTarget::PerContainer(dir.join("out"));

        snapshot(&source, &options, &target).await.unwrap();
        assert!(!dir.join("out").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
