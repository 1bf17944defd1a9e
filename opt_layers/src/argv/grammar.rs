//! Lexical rules for flags, flag names and values.

/// Letters of a short flag cluster such as `-abc`.
pub(crate) fn short_cluster(token: &str) -> Option<&str> {
    let letters = token.strip_prefix('-')?;
    (!letters.is_empty() && letters.chars().all(|c| c.is_ascii_alphabetic())).then_some(letters)
}

/// Name of a long flag such as `--no-color`.
pub(crate) fn long_flag(token: &str) -> Option<&str> {
    let name = token.strip_prefix("--")?;
    name.split('-').all(is_long_segment).then_some(name)
}

fn is_long_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// Returns `true` when the token looks like a short cluster or a long flag.
pub(crate) fn is_flag(token: &str) -> bool {
    short_cluster(token).is_some() || long_flag(token).is_some()
}

/// Returns `true` when the token can be consumed as a flag's value.
pub(crate) fn is_value(token: &str) -> bool {
    !token.is_empty() && !is_flag(token)
}

/// Names usable for options and declared flags: a lowercase letter followed
/// by lowercase alphanumerics, with single hyphens between alphanumerics.
pub(crate) fn is_flag_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Returns `true` for a single ASCII letter.
pub(crate) fn is_short_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.next().is_none()
}
