//! Environment variable capture and sanitization.

use std::collections::BTreeMap;

/// Variables whose values are cut down to a recognizable prefix.
pub const SECRET_ENV_VARS: &[&str] = &[
    "AWS_SESSION_TOKEN",
    "AWS_SECURITY_TOKEN",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
];

/// Characters of a secret value that survive sanitization.
pub const SECRET_PREFIX_LEN: usize = 12;

/// The process environment, lossily decoded, sorted by name.
pub fn capture() -> BTreeMap<String, String> {
    std::env::vars_os()
        .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned()))
        .collect()
}

pub fn is_secret(name: &str) -> bool {
    SECRET_ENV_VARS.contains(&name)
}

/// First [`SECRET_PREFIX_LEN`] characters of `value`.
pub fn truncate_secret(value: &str) -> String {
    value.chars().take(SECRET_PREFIX_LEN).collect()
}

/// Copy of `vars` with secret values truncated. Nothing is dropped.
pub fn sanitize<'a, I>(vars: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    vars.into_iter()
        .map(|(name, value)| {
            let value = if is_secret(name) {
                truncate_secret(value)
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}
