//! `${VAR}` expansion for string values read from `folio.toml`.
//!
//! Only the braced forms are recognised:
//! - `${VAR}` is replaced by the variable's value and fails when it is unset
//! - `${VAR:-fallback}` falls back to `fallback` when the variable is unset
//!
//! A bare `$VAR` is left alone so URLs and paths containing `$` survive.

use crate::ConfigError;

/// Expand variable references in `value`.
///
/// `field` is the dotted config key (e.g. `publish.base_url`) and only
/// appears in the error message.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

/// Name of the variable that could not be resolved.
struct Unset(String);

fn lookup(var: &str) -> Result<Option<String>, Unset> {
    std::env::var(var)
        .map(Some)
        .map_err(|_| Unset(var.to_owned()))
}
