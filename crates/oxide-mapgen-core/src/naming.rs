//! Identifier derivation helpers.
//!
//! Every function here is pure: inputs are passed explicitly and nothing is
//! read from ambient configuration, so the same table and configuration always
//! produce byte-identical names.

/// Characters that end a word when camel-casing a database identifier.
const WORD_SEPARATORS: &[char] = &['_', '-', '@', '$', '#', ' ', '/', '&'];

/// Converts a database identifier like `"USER_ROLE"` into camel case.
///
/// Separator characters are dropped and start a new word; every other
/// character is lower-cased unless it begins a word. Leading separators do not
/// capitalise the first letter, `first_upper` controls that.
#[must_use]
pub fn camel_case(input: &str, first_upper: bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;

    for ch in input.chars() {
        if WORD_SEPARATORS.contains(&ch) {
            if !out.is_empty() {
                upper_next = true;
            }
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    if first_upper {
        if let Some(first) = out.chars().next() {
            let rest = &out[first.len_utf8()..];
            out = first.to_uppercase().chain(rest.chars()).collect();
        }
    }

    out
}

/// Joins a package and a simple name with `.`, omitting the separator when
/// the package is empty.
#[must_use]
pub fn qualified_name(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{package}.{simple_name}")
    }
}

/// Splits a dotted name at its last `.` into `(prefix, simple name)`.
///
/// `"sub.pkg.UserDao"` yields `(Some("sub.pkg"), "UserDao")`, an undotted name
/// yields `(None, name)`.
#[must_use]
pub fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(idx) => (Some(&name[..idx]), &name[idx + 1..]),
        None => (None, name),
    }
}

/// Returns `Some(s)` when the string is present and non-empty.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Interprets a configuration property as a boolean (`"true"`, any case).
#[must_use]
pub fn is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Composes `catalog<sep>schema<sep>table`.
///
/// An absent schema keeps its slot when a catalog is present, giving
/// `catalog..table` for the `.` separator.
#[must_use]
pub fn compose_table_name(
    catalog: Option<&str>,
    schema: Option<&str>,
    table: &str,
    separator: char,
) -> String {
    let mut out = String::new();

    if let Some(catalog) = non_empty(catalog) {
        out.push_str(catalog);
        out.push(separator);
    }

    match non_empty(schema) {
        Some(schema) => {
            out.push_str(schema);
            out.push(separator);
        }
        None if !out.is_empty() => out.push(separator),
        None => {}
    }

    out.push_str(table);
    out
}
