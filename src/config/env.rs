//! Required environment variable lookup.
//!
//! Lookups go through a caller-supplied function so tests can run without
//! touching the process environment.

use std::env::VarError;

use crate::error::{HostspecError, Result};

/// Environment variable holding the expected Docker version substring.
pub const DOCKER_VERSION_VAR: &str = "RANCHER_DOCKER_VERSION";

/// Environment variable that turns on debug logging, like `--debug`.
pub const DEBUG_VAR: &str = "DEBUG";

/// Read a required variable from the real process environment.
pub fn required_var(name: &str) -> Result<String> {
    required_var_with(name, &|key: &str| std::env::var(key))
}

/// Read a required variable using a custom lookup function.
///
/// Unset, empty and non-UTF-8 values all yield
/// [`HostspecError::MissingEnvVar`]. Non-empty values are returned untouched.
pub fn required_var_with<F>(name: &str, env_fn: &F) -> Result<String>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    match env_fn(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) => {
            tracing::debug!("{} is set but empty", name);
            Err(HostspecError::MissingEnvVar {
                name: name.to_string(),
            })
        }
        Err(e) => {
            tracing::debug!("{} lookup failed: {}", name, e);
            Err(HostspecError::MissingEnvVar {
                name: name.to_string(),
            })
        }
    }
}

/// Read an optional variable, treating empty the same as unset.
pub fn optional_var_with<F>(name: &str, env_fn: &F) -> Option<String>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    required_var_with(name, env_fn).ok()
}

/// Whether [`DEBUG_VAR`] asks for debug logging.
///
/// Any value counts, including an empty one, except the literal `false`.
pub fn debug_enabled_with<F>(env_fn: &F) -> bool
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    match env_fn(DEBUG_VAR) {
        Ok(value) => value != "false",
        Err(VarError::NotUnicode(_)) => true,
        Err(VarError::NotPresent) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn env_with(value: &'static str) -> impl Fn(&str) -> std::result::Result<String, VarError> {
        move |key: &str| {
            if key == DOCKER_VERSION_VAR {
                Ok(value.to_string())
            } else {
                Err(VarError::NotPresent)
            }
        }
    }

    #[test]
    fn unset_variable_is_missing() {
        let result = required_var_with(DOCKER_VERSION_VAR, &|_: &str| Err(VarError::NotPresent));
        assert!(matches!(
            result,
            Err(HostspecError::MissingEnvVar { ref name }) if name == DOCKER_VERSION_VAR
        ));
    }

    #[test]
    fn empty_variable_is_missing() {
        let result = required_var_with(DOCKER_VERSION_VAR, &env_with(""));
        assert!(matches!(result, Err(HostspecError::MissingEnvVar { .. })));
    }

    #[test]
    fn non_unicode_variable_is_missing() {
        let result = required_var_with(DOCKER_VERSION_VAR, &|_: &str| {
            Err(VarError::NotUnicode(OsString::from("bad")))
        });
        assert!(matches!(result, Err(HostspecError::MissingEnvVar { .. })));
    }

    #[test]
    fn present_variable_is_returned_untrimmed() {
        let result = required_var_with(DOCKER_VERSION_VAR, &env_with(" 17.03.2 ")).unwrap();
        assert_eq!(result, " 17.03.2 ");
    }

    #[test]
    fn debug_switch_accepts_any_value_but_false() {
        fn debug(value: &'static str) -> impl Fn(&str) -> std::result::Result<String, VarError> {
            move |key: &str| {
                if key == DEBUG_VAR {
                    Ok(value.to_string())
                } else {
                    Err(VarError::NotPresent)
                }
            }
        }
        assert!(debug_enabled_with(&debug("1")));
        assert!(debug_enabled_with(&debug("true")));
        assert!(debug_enabled_with(&debug("")));
        assert!(!debug_enabled_with(&debug("false")));
        assert!(!debug_enabled_with(&|_: &str| Err(VarError::NotPresent)));
    }

    #[test]
    fn optional_var_treats_empty_as_unset() {
        assert_eq!(optional_var_with(DOCKER_VERSION_VAR, &env_with("")), None);
        assert_eq!(
            optional_var_with(DOCKER_VERSION_VAR, &env_with("17.03.2")),
            Some("17.03.2".to_string())
        );
    }
}
