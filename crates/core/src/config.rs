//! Environment-variable helpers shared by the `from_env` constructors.
//!
//! Every component reads its settings from the process environment
//! (optionally populated from a `.env` file by the binary). Values are
//! trimmed; an empty value counts as unset.

use std::str::FromStr;

use crate::error::CoreError;

/// Read a required environment variable.
pub fn env_var(name: &'static str) -> Result<String, CoreError> {
    lookup(name).ok_or(CoreError::MissingEnv(name))
}

/// Read an optional environment variable, falling back to `default`.
pub fn env_or(name: &'static str, default: &str) -> String {
    lookup(name).unwrap_or_else(|| default.to_string())
}

/// Read and parse an optional environment variable, falling back to
/// `default` when unset. A present but unparsable value is an error.
pub fn env_parse_or<T>(name: &'static str, default: T) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

/// Parse a boolean flag. Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
pub fn env_flag(name: &'static str, default: bool) -> Result<bool, CoreError> {
    match lookup(name) {
        Some(raw) => parse_flag(name, &raw),
        None => Ok(default),
    }
}

fn lookup(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| CoreError::InvalidEnv {
        name,
        message: format!("{raw:?}: {e}"),
    })
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, CoreError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CoreError::InvalidEnv {
            name,
            message: format!("{raw:?} is not a boolean"),
        }),
    }
}
