//! `{{name}}` placeholders in launch plans.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replace every `{{name}}` in `template` with `vars[name]`.
///
/// Substituted values are not scanned again. An empty `{{}}` is left as is.
pub fn substitute_vars(template: &str, vars: &BTreeMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, name, after)) = next_placeholder(rest) {
        let value = vars.get(name).ok_or_else(|| Error::Variable {
            name: name.to_string(),
            template: template.to_string(),
        })?;
        out.push_str(before);
        out.push_str(value);
        rest = after;
    }

    out.push_str(rest);
    Ok(out)
}

/// Split `s` around its first `{{name}}` with a non-empty name free of `}`.
fn next_placeholder(s: &str) -> Option<(&str, &str, &str)> {
    let mut from = 0;
    while let Some(offset) = s[from..].find(OPEN) {
        let start = from + offset;
        let name_start = start + OPEN.len();
        let name_len = s[name_start..].find('}').unwrap_or(s.len() - name_start);
        let name_end = name_start + name_len;

        if name_len > 0 && s[name_end..].starts_with(CLOSE) {
            return Some((
                &s[..start],
                &s[name_start..name_end],
                &s[name_end + CLOSE.len()..],
            ));
        }
        from = start + 1;
    }
    None
}
