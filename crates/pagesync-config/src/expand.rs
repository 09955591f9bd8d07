//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set and non-empty, otherwise uses default

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// Braced reference with an optional `:-` default.
static ENV_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("valid regex")
});

/// Expand environment variable references in a string.
///
/// Only braced `${VAR}` and `${VAR:-default}` references are replaced; any
/// other `$`, including one inside a default, is kept as written. A default
/// applies when the variable is unset or empty.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut last = 0;

    for caps in ENV_REF_RE.captures_iter(value) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        expanded.push_str(&value[last..whole.start()]);
        last = whole.end();

        let var = std::env::var(name.as_str()).ok();
        match (var, caps.get(2)) {
            (Some(val), Some(_)) if !val.is_empty() => expanded.push_str(&val),
            (Some(val), None) => expanded.push_str(&val),
            (_, Some(default)) => expanded.push_str(default.as_str()),
            (None, None) => {
                return Err(ConfigError::EnvVar {
                    field: field.to_owned(),
                    message: format!("${{{}}} not set", name.as_str()),
                });
            }
        }
    }

    expanded.push_str(&value[last..]);
    Ok(expanded)
}

/// Expand an optional field in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}
