use thiserror::Error;

// ======================================================
// SNAPSHOT ERRORS
// ======================================================

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The Docker daemon could not be reached at all. Fatal.
    #[error("cannot connect to the Docker daemon: {0}")]
    DaemonUnavailable(bollard::errors::Error),

    /// Enumeration failed. Fatal; without the list there is nothing to do.
    #[error("failed to list running containers: {0}")]
    ListContainers(bollard::errors::Error),

    /// One container's inspection failed, e.g. it exited between list
    /// and inspect. The run skips it and continues.
    #[error("failed to inspect container '{id}': {source}")]
    Inspect {
        id: String,
        source: bollard::errors::Error,
    },

    /// An output path could not be written. Fatal in combined mode;
    /// per-container mode reports it and moves on to the next file.
    #[error("failed to write '{path}': {source}")]
    WriteScript {
        path: String,
        source: std::io::Error,
    },
}
