//! Boolean coercion for raw query parameters.

/// Raw values read as `true`. Matching is exact; `" true"` with the leading
/// space is accepted because older clients send it.
pub const TRUTHY_TOKENS: &[&str] = &["True", "true", " true", "T", "t", "Yes", "yes", "y", "1"];

/// Interpret a raw parameter as a boolean. Missing input is false.
pub fn str_to_bool(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| TRUTHY_TOKENS.contains(&value))
}
