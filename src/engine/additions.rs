use crate::engine::spec::LaunchSpec;

// ======================================================
// OPERATOR ADDITIONS
// ======================================================

/// Placeholder replaced with the container name inside addition keys
/// and values.
pub const NAME_PLACEHOLDER: &str = "{{name}}";

/// Replace every `{{name}}` in `template` with the container name.
/// Plain substring replacement; there is no other template syntax.
pub fn expand_name(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

/// Extra settings the operator wants merged into every reconstructed
/// command. Merging never overwrites what the container already has.
#[derive(Debug, Clone, Default)]
pub struct Additions {
    pub labels: Vec<(String, String)>,
    pub env: Vec<(String, String)>,
    pub restart_policy: Option<String>,
    pub network: Option<String>,
}

impl Additions {
    /// Merge these additions into `spec`: labels, then env, then
    /// restart policy, then network. Each step is idempotent, so
    /// applying the same additions twice changes nothing after the
    /// first pass.
    pub fn apply(&self, spec: &mut LaunchSpec) {
        for (key, value) in &self.labels {
            let key = expand_name(key, &spec.name);
            let value = expand_name(value, &spec.name);
            spec.labels.entry(key).or_insert(value);
        }

        // Env keys are not templated, only values.
        for (key, value) in &self.env {
            let value = expand_name(value, &spec.name);
            spec.env.entry(key.clone()).or_insert(value);
        }

        if let Some(policy) = &self.restart_policy {
            if spec.restart_policy.as_deref().map_or(true, str::is_empty) {
                spec.restart_policy = Some(policy.clone());
            }
        }

        if let Some(network) = &self.network {
            if spec.network.is_none() {
                spec.network = Some(network.clone());
            }
        }
    }
}

// ======================================================
// KEY=VALUE PARSING
// ======================================================

/// Value parser for --add-label / --add-env arguments.
pub fn parse_kv(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
