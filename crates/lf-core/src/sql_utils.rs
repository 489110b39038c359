//! BigQuery identifier quoting utilities
//!
//! Column references in generated views keep the warehouse casing of the
//! original field names. Segments that are not plain identifiers are quoted
//! with backticks.

/// Whether `segment` can be referenced without quoting.
///
/// Plain identifiers consist of ASCII letters, digits and underscores.
pub fn is_plain_identifier(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote a BigQuery identifier with backticks, escaping embedded backticks.
///
/// # Examples
/// ```
/// use lf_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("first name"), "`first name`");
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "\\`"))
}

/// Render a dot path so each segment is a valid reference.
///
/// When any segment needs quoting, every segment is quoted individually.
///
/// # Examples
/// ```
/// use lf_core::sql_utils::quote_path;
/// assert_eq!(quote_path("Address.City"), "Address.City");
/// assert_eq!(quote_path("Address.Zip Code"), "`Address`.`Zip Code`");
/// ```
pub fn quote_path(path: &str) -> String {
    if path.split('.').all(is_plain_identifier) {
        return path.to_string();
    }
    path.split('.').map(quote_ident).collect::<Vec<_>>().join(".")
}

/// Strip backticks and double quotes from a relation name.
///
/// # Examples
/// ```
/// use lf_core::sql_utils::unquote_relation;
/// assert_eq!(unquote_relation("`proj`.`ds`.`orders`"), "proj.ds.orders");
/// ```
pub fn unquote_relation(relation: &str) -> String {
    relation.replace(['`', '"'], "")
}

/// Last component of a (possibly quoted) relation name.
///
/// # Examples
/// ```
/// use lf_core::sql_utils::relation_table_name;
/// assert_eq!(relation_table_name("`proj`.`ds`.`orders`"), "orders");
/// assert_eq!(relation_table_name("orders"), "orders");
/// ```
pub fn relation_table_name(relation: &str) -> String {
    let unquoted = unquote_relation(relation);
    match unquoted.rfind('.') {
        Some(pos) => unquoted[pos + 1..].to_string(),
        None => unquoted,
    }
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
