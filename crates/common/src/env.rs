pub trait EnvVars {
    fn load() -> Self;
    fn get_env_var(&self, key: &str) -> String;
}

/// Reads `key` from the process environment, falling back to `default` when unset.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads a boolean switch. Anything other than `false`/`0`/`no` counts as set.
pub fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"),
        Err(_) => default,
    }
}
