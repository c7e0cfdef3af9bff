//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an optional raw value with a default fallback.
///
/// - `None`: returns `default` silently (expected case).
/// - `Some` but unparseable: logs a warning and returns `default`.
pub fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Flag semantics: set and non-empty means enabled.
#[must_use]
pub fn flag_is_set(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| !v.trim().is_empty())
}
