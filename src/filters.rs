// ======================================================
// FILTER TABLES
// ======================================================

/// Environment keys injected by the runtime or the image base layers.
/// Recreating them would pin incidental values into the launch command.
pub const SYSTEM_ENV_KEYS: [&str; 5] = ["PATH", "HOSTNAME", "TERM", "HOME", "PWD"];

/// Environment keys with this prefix are daemon-injected.
pub const SYSTEM_ENV_PREFIX: &str = "DOCKER_";

/// Label keys that carry image metadata rather than operator intent.
pub const IGNORE_LABEL_KEYS: [&str; 2] = ["maintainer", "build_version"];

pub const IGNORE_LABEL_PREFIXES: [&str; 1] = ["org.opencontainers."];

/// Capabilities every container gets by default. Emitting them as
/// explicit --cap-add flags would add noise without changing behavior.
pub const DEFAULT_LINUX_CAPS: [&str; 13] = [
    "NET_RAW",
    "CHOWN",
    "DAC_OVERRIDE",
    "FOWNER",
    "FSETID",
    "KILL",
    "MKNOD",
    "NET_BIND_SERVICE",
    "SETFCAP",
    "SETGID",
    "SETPCAP",
    "SETUID",
    "SYS_CHROOT",
];

pub fn is_system_env_key(key: &str) -> bool {
    SYSTEM_ENV_KEYS.contains(&key) || key.starts_with(SYSTEM_ENV_PREFIX)
}

pub fn is_ignored_label_key(key: &str) -> bool {
    IGNORE_LABEL_KEYS.contains(&key)
        || IGNORE_LABEL_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}

/// Case-sensitive exact match against the default set.
pub fn is_default_capability(cap: &str) -> bool {
    DEFAULT_LINUX_CAPS.contains(&cap)
}
