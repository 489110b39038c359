//! LookML names for columns
//!
//! Field names are snake_case with a double underscore between path
//! segments (`SupplierInformation.GTINId` -> `supplier_information__gtin_id`).
//! SQL keeps the original casing; only names are normalized.

use regex::Regex;
use std::sync::OnceLock;

static ACRONYM_BOUNDARY: OnceLock<Regex> = OnceLock::new();
static WORD_BOUNDARY: OnceLock<Regex> = OnceLock::new();
static INVALID_CHARS: OnceLock<Regex> = OnceLock::new();
static UNDERSCORE_RUN: OnceLock<Regex> = OnceLock::new();
static LONG_UNDERSCORE_RUN: OnceLock<Regex> = OnceLock::new();

/// `GTINId` -> `GTIN_Id`
fn acronym_boundary() -> &'static Regex {
    ACRONYM_BOUNDARY.get_or_init(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"))
}

/// `supplierInfo` -> `supplier_Info`
fn word_boundary() -> &'static Regex {
    WORD_BOUNDARY.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"))
}

fn invalid_chars() -> &'static Regex {
    INVALID_CHARS.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"))
}

fn underscore_run() -> &'static Regex {
    UNDERSCORE_RUN.get_or_init(|| Regex::new(r"_{2,}").expect("valid regex"))
}

fn long_underscore_run() -> &'static Regex {
    LONG_UNDERSCORE_RUN.get_or_init(|| Regex::new(r"_{3,}").expect("valid regex"))
}

/// snake_case a single path segment
///
/// Idempotent; a lowercase segment without underscores comes back unchanged.
///
/// # Examples
/// ```
/// use lf_views::naming::snake_case;
/// assert_eq!(snake_case("SupplierInformation"), "supplier_information");
/// assert_eq!(snake_case("GTINId"), "gtin_id");
/// assert_eq!(snake_case("sku"), "sku");
/// ```
pub fn snake_case(segment: &str) -> String {
    if !segment.contains('_')
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return segment.to_string();
    }
    let split = acronym_boundary().replace_all(segment, "${1}_${2}");
    let split = word_boundary().replace_all(&split, "${1}_${2}");
    let cleaned = invalid_chars().replace_all(&split, "_");
    underscore_run().replace_all(&cleaned, "_").to_lowercase()
}

/// Make an arbitrary string a valid LookML identifier
///
/// Invalid characters become `_`, runs of three or more underscores
/// shrink to two and a leading digit gets a `_` prefix.
pub fn sanitize_identifier(name: &str) -> String {
    let cleaned = invalid_chars().replace_all(name, "_");
    let collapsed = long_underscore_run().replace_all(&cleaned, "__");
    match collapsed.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{collapsed}"),
        None => "_".to_string(),
        _ => collapsed.into_owned(),
    }
}

/// Double-underscore-joined snake_case of the segments
///
/// # Examples
/// ```
/// use lf_views::naming::long_name;
/// assert_eq!(long_name(&["Orders", "LineItems", "SKU"]), "orders__line_items__sku");
/// ```
pub fn long_name<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(|s| snake_case(s.as_ref()))
        .collect::<Vec<_>>()
        .join("__");
    sanitize_identifier(&joined)
}

/// snake_case of the last segment
pub fn short_name<S: AsRef<str>>(segments: &[S]) -> String {
    match segments.last() {
        Some(last) => sanitize_identifier(&snake_case(last.as_ref())),
        None => "_".to_string(),
    }
}

/// Human label from identifier-ish text (`order_items` -> `Order Items`)
pub fn title_case(text: &str) -> String {
    snake_case(text)
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title-case label of several path segments
pub fn title_case_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| title_case(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name of a nested view: `<principal>__<long name of the array path>`
pub fn nested_view_name<S: AsRef<str>>(principal: &str, owner_segments: &[S]) -> String {
    format!("{}__{}", principal, long_name(owner_segments))
}

#[cfg(test)]
#[path = "naming_test.rs"]
mod tests;
