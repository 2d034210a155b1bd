mod engine;
mod docker;
mod error;
mod filters;
mod quote;
mod output;
mod snapshot;

use clap::Parser;
use std::path::PathBuf;
use std::process::exit;

use engine::additions::{parse_kv, Additions};
use output::OutputTarget;
use snapshot::SnapshotOptions;

// ======================================================
// CLI
// ======================================================

#[derive(Parser)]
#[command(name = "recreata")]
#[command(version)]
#[command(about = "Reconstruct docker run commands from running containers")]
struct Cli {
    /// Only include containers whose name contains one of these
    /// substrings (case-insensitive). No patterns selects everything.
    patterns: Vec<String>,

    /// Write all commands into a single combined script at this path.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Directory for one script per container.
    #[arg(long, default_value = "recreate_containers.d", conflicts_with = "output")]
    per_container_dir: PathBuf,

    /// Include the container's command in the generated line.
    #[arg(long)]
    include_cmd: bool,

    /// Add a label to every command (KEY=VALUE, {{name}} expands to
    /// the container name). Repeatable.
    #[arg(long, value_parser = parse_kv)]
    add_label: Vec<(String, String)>,

    /// Add an environment variable to every command (KEY=VALUE,
    /// {{name}} expands in the value). Repeatable.
    #[arg(long, value_parser = parse_kv)]
    add_env: Vec<(String, String)>,

    /// Restart policy to add when a container has none (e.g. unless-stopped).
    #[arg(long)]
    add_restart: Option<String>,

    /// Network to attach when a container sits on the default bridge.
    #[arg(long)]
    add_network: Option<String>,

    /// Never overwrite existing scripts.
    #[arg(long)]
    no_overwrite: bool,
}

// ======================================================
// MAIN
// ======================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let additions = Additions {
        labels: cli.add_label,
        env: cli.add_env,
        restart_policy: cli.add_restart,
        network: cli.add_network,
    };

    let target = match cli.output {
        Some(path) => OutputTarget::Combined(path),
        None => OutputTarget::PerContainer(cli.per_container_dir),
    };

    let options = SnapshotOptions {
        patterns: cli.patterns,
        additions,
        include_cmd: cli.include_cmd,
        no_overwrite: cli.no_overwrite,
    };

    if let Err(e) = snapshot::run(options, target).await {
        eprintln!("Error: {}", e);
        exit(1);
    }
}
