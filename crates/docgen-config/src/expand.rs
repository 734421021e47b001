//! Environment variable expansion for configuration values.
//!
//! Only the braced forms are recognized:
//! - `${VAR}` expands to the value of VAR and fails if it is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset

use std::env::VarError;

use crate::ConfigError;

/// Why a referenced variable could not be used.
struct Unusable {
    name: String,
    reason: &'static str,
}

/// Expand every set value of a settings file in place.
///
/// Stops at the first value that references an unusable variable.
pub(crate) fn expand_values<'a>(
    values: impl IntoIterator<Item = (&'static str, &'a mut Option<String>)>,
) -> Result<(), ConfigError> {
    for (key, value) in values {
        if let Some(current) = value.as_deref() {
            *value = Some(expand_env(current, key)?);
        }
    }
    Ok(())
}

/// Expand `${...}` references in a single value.
///
/// Strings without `${` are returned unchanged, so a bare `$` (common in
/// company names and colours) never triggers a lookup.
pub(crate) fn expand_env(value: &str, key: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, Unusable> {
        match std::env::var(var) {
            Ok(found) => Ok(Some(found)),
            Err(VarError::NotPresent) => Err(Unusable {
                name: var.to_owned(),
                reason: "not set",
            }),
            Err(VarError::NotUnicode(_)) => Err(Unusable {
                name: var.to_owned(),
                reason: "not valid UTF-8",
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: key.to_owned(),
        message: format!("${{{}}} {}", e.cause.name, e.cause.reason),
    })
}
