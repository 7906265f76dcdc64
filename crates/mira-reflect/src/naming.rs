//! Accessor naming conventions
//!
//! Maps accessor method names to property names: `getName`/`isActive` read,
//! `setName` writes. De-capitalization preserves acronyms — a derived name
//! whose first two characters are both uppercase is left as written, so
//! `getURL` exposes `URL`, not `uRL`.

/// Check whether a method name follows the getter convention
///
/// Requires at least one character after the `get`/`is` prefix.
pub fn is_getter_name(name: &str) -> bool {
    (name.starts_with("get") && name.len() > 3) || (name.starts_with("is") && name.len() > 2)
}

/// Check whether a method name follows the setter convention
pub fn is_setter_name(name: &str) -> bool {
    name.starts_with("set") && name.len() > 3
}

/// Derive the property name from an accessor method name
///
/// Returns `None` for names that match no accessor prefix.
pub fn method_to_property(name: &str) -> Option<String> {
    let stripped = if let Some(rest) = name.strip_prefix("is") {
        rest
    } else if let Some(rest) = name.strip_prefix("get") {
        rest
    } else if let Some(rest) = name.strip_prefix("set") {
        rest
    } else {
        return None;
    };
    if stripped.is_empty() {
        return None;
    }
    Some(decapitalize(stripped))
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    // Acronym rule: two leading uppercase characters stay as written
    if let Some(second) = chars.next() {
        if first.is_uppercase() && second.is_uppercase() {
            return name.to_string();
        }
    }
    let mut result = String::with_capacity(name.len());
    result.extend(first.to_lowercase());
    result.push_str(&name[first.len_utf8()..]);
    result
}
