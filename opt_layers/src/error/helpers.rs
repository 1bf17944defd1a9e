//! Formatting helpers shared by the error messages.

use crate::argv::display_flag;

/// Renders an optional failure reason as a `because …` suffix.
pub(super) fn because(reason: Option<&String>) -> String {
    reason.map_or_else(String::new, |text| format!(" because {text}"))
}

/// Quotes each flag in its command-line form and joins them as an English
/// list: `"-a"`, `"-a" and "-b"`, `"-a", "-b" and "-c"`.
pub(super) fn quoted_flags(flags: &[String]) -> String {
    let quoted: Vec<String> = flags
        .iter()
        .map(|flag| format!("\"{}\"", display_flag(flag)))
        .collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

/// Joins several findings into a single sentence.
pub(super) fn joined(reasons: &[String]) -> String {
    reasons.join("; ")
}
