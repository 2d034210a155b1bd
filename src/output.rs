use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::SnapshotError;

// ======================================================
// SCRIPT OUTPUT
// ======================================================

/// Where rendered scripts land: one combined file, or one file per
/// container inside a directory.
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Combined(PathBuf),
    PerContainer(PathBuf),
}

/// A rendered block paired with the container name that produced it.
#[derive(Debug, Clone)]
pub struct RenderedContainer {
    pub name: String,
    pub block: String,
}

/// Reduce a container name to a safe script filename. Slashes are
/// trimmed, anything outside [A-Za-z0-9._-] becomes an underscore.
pub fn sanitize_filename(name: &str) -> String {
    let trimmed = name.trim_matches('/');
    if trimmed.is_empty() {
        return "container".to_string();
    }
    trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Ask before clobbering an existing file. Returns (proceed, all):
/// answering "a" makes the choice stick for the rest of the run.
/// EOF on stdin counts as a decline.
fn confirm_overwrite(path: &Path, overwrite_all: bool) -> (bool, bool) {
    if !path.exists() || overwrite_all {
        return (true, overwrite_all);
    }
    loop {
        print!("{} exists. Overwrite? [y/N/a] ", path.display());
        let _ = io::stdout().flush();

        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(0) | Err(_) => return (false, overwrite_all),
            Ok(_) => {}
        }
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return (true, overwrite_all),
            "a" | "all" => return (true, true),
            "" | "n" | "no" => return (false, overwrite_all),
            _ => continue,
        }
    }
}

/// Write every block into a single executable script. Returns false
/// when the file was left untouched (declined prompt or --no-overwrite).
pub fn write_combined(
    path: &Path,
    rendered: &[RenderedContainer],
    no_overwrite: bool,
) -> Result<bool, SnapshotError> {
    if no_overwrite && path.exists() {
        eprintln!("Skipped writing {}", path.display());
        return Ok(false);
    }
    let (proceed, _) = confirm_overwrite(path, false);
    if !proceed {
        eprintln!("Skipped writing {}", path.display());
        return Ok(false);
    }

    let joined = rendered
        .iter()
        .map(|container| container.block.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let script = format!("#!/bin/bash\n\n{}", joined);
    let script = format!("{}\n", script.trim_end());

    fs::write(path, script).map_err(|e| SnapshotError::WriteScript {
        path: path.display().to_string(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
    }

    Ok(true)
}

/// Write one executable script per container into `dir`, creating it
/// if needed. Individual write failures are reported and skipped;
/// returns how many scripts were actually written.
pub fn write_per_container(
    dir: &Path,
    rendered: &[RenderedContainer],
    no_overwrite: bool,
) -> Result<usize, SnapshotError> {
    fs::create_dir_all(dir).map_err(|e| SnapshotError::WriteScript {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut written = 0;
    let mut overwrite_all = false;
    for container in rendered {
        let path = dir.join(format!("{}.sh", sanitize_filename(&container.name)));
        if no_overwrite && path.exists() {
            continue;
        }
        let (proceed, all) = confirm_overwrite(&path, overwrite_all);
        overwrite_all = all;
        if !proceed {
            continue;
        }

        let script = format!("#!/bin/bash\n\n{}\n", container.block.trim_end());
        if let Err(e) = fs::write(&path, script) {
            eprintln!("Error: failed to write {}: {}", path.display(), e);
            continue;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o755));
        }

        written += 1;
    }

    Ok(written)
}
