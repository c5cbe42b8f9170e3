//! `{{placeholder}}` substitution for message templates.
//!
//! Tokens are matched as literal text. A token whose name is not present in
//! the value map is left in the output exactly as written, at every call
//! site. Substitution is a single left-to-right pass, so a value that itself
//! contains `{{something}}` is emitted verbatim and never expanded.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Name → replacement text.
pub type PlaceholderValues = BTreeMap<String, String>;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Regex matching `{{name}}` tokens that are eligible for extraction.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{([A-Za-z_][A-Za-z0-9_.]*)\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Replace every `{{name}}` whose `name` is a key of `values`.
///
/// Never fails; malformed or unmatched tokens pass through unchanged.
pub fn render(template: &str, values: &PlaceholderValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let Some(end) = after_open.find(CLOSE) else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let name = &after_open[..end];
        match values.get(name) {
            Some(value) => {
                out.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                // Keep one brace and rescan, so `{{{name}}}` still finds `{{name}}`.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Extract the distinct placeholder names used in `template`, sorted.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = PLACEHOLDER_RE
        .captures_iter(template)
        .map(|c| c[1].to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}
