//! Warehouse type recognition
//!
//! Turns BigQuery type strings such as `ARRAY<STRUCT<id INT64, sku STRING>>`
//! or `NUMERIC(10,2)` into a [`ColumnKind`] and the list of inner type
//! tokens.

use std::fmt;

/// Scalar column kinds, each mapping to one LookML dimension shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Number,
    YesNo,
    String,
    Date,
    DateTime,
    Timestamp,
}

impl ScalarKind {
    /// Date, DateTime and Timestamp become dimension groups
    pub fn is_time(&self) -> bool {
        matches!(
            self,
            ScalarKind::Date | ScalarKind::DateTime | ScalarKind::Timestamp
        )
    }
}

/// Classification of a warehouse type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Scalar(ScalarKind),
    /// Non-repeated composite (STRUCT / RECORD)
    Record,
    /// ARRAY, possibly of records
    Repeated,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Scalar(kind) => write!(f, "{:?}", kind),
            ColumnKind::Record => write!(f, "Record"),
            ColumnKind::Repeated => write!(f, "Repeated"),
        }
    }
}

/// Result of recognizing a type string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Uppercased base type (`ARRAY`, `STRUCT`, `NUMERIC`, ...); empty when absent
    pub base: String,
    pub kind: ColumnKind,
    /// Element type for arrays, field types for structs
    pub inner_types: Vec<String>,
}

impl TypeInfo {
    pub fn is_array(&self) -> bool {
        self.kind == ColumnKind::Repeated
    }

    pub fn is_struct(&self) -> bool {
        self.kind == ColumnKind::Record
    }

    /// Scalar kind of the elements of a simple array
    ///
    /// `None` for non-arrays and for arrays of records or arrays.
    pub fn element_kind(&self) -> Option<ScalarKind> {
        if !self.is_array() {
            return None;
        }
        let element = self.inner_types.first()?;
        match recognize(Some(element)).kind {
            ColumnKind::Scalar(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Recognize a raw warehouse type string
///
/// An absent type is treated as a plain string column.
pub fn recognize(raw: Option<&str>) -> TypeInfo {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return TypeInfo {
            base: String::new(),
            kind: ColumnKind::Scalar(ScalarKind::String),
            inner_types: Vec::new(),
        };
    };

    let base = base_type(raw);
    let kind = kind_of_base(&base);
    let inner_types = match kind {
        ColumnKind::Repeated => angle_content(raw)
            .map(|inner| vec![inner.trim().to_string()])
            .unwrap_or_default(),
        ColumnKind::Record => angle_content(raw)
            .map(|inner| {
                split_top_level(inner, ',')
                    .into_iter()
                    .map(field_type)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        ColumnKind::Scalar(_) => Vec::new(),
    };

    TypeInfo {
        base,
        kind,
        inner_types,
    }
}

/// Substring before the first `<` or `(`, trimmed and uppercased
pub fn base_type(raw: &str) -> String {
    let end = raw.find(['<', '(']).unwrap_or(raw.len());
    raw[..end].trim().to_uppercase()
}

fn kind_of_base(base: &str) -> ColumnKind {
    match base {
        "INT64" | "INTEGER" | "INT" | "SMALLINT" | "BIGINT" | "TINYINT" | "BYTEINT" | "FLOAT"
        | "FLOAT64" | "NUMERIC" | "DECIMAL" | "BIGNUMERIC" | "BIGDECIMAL" => {
            ColumnKind::Scalar(ScalarKind::Number)
        }
        "BOOL" | "BOOLEAN" => ColumnKind::Scalar(ScalarKind::YesNo),
        "DATE" => ColumnKind::Scalar(ScalarKind::Date),
        "DATETIME" => ColumnKind::Scalar(ScalarKind::DateTime),
        "TIMESTAMP" => ColumnKind::Scalar(ScalarKind::Timestamp),
        "ARRAY" => ColumnKind::Repeated,
        "STRUCT" | "RECORD" => ColumnKind::Record,
        _ => ColumnKind::Scalar(ScalarKind::String),
    }
}

/// Whether the raw type begins with `ARRAY` (case-insensitive)
pub fn is_array_type(raw: Option<&str>) -> bool {
    raw.map(|r| r.trim_start().to_uppercase().starts_with("ARRAY"))
        .unwrap_or(false)
}

/// Whether the raw type mentions `STRUCT` without being an array
pub fn is_struct_type(raw: Option<&str>) -> bool {
    raw.map(|r| {
        let upper = r.to_uppercase();
        upper.contains("STRUCT") && !upper.trim_start().starts_with("ARRAY")
    })
    .unwrap_or(false)
}

/// Content between the outermost `<` and its matching `>`
fn angle_content(raw: &str) -> Option<&str> {
    let open = raw.find('<')?;
    let mut depth = 0usize;
    for (i, c) in raw[open..].char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    log::debug!("Unbalanced '<' in type string: {:?}", raw);
    Some(&raw[open + 1..])
}

/// Type part of a `name TYPE` struct field; the whole token when unnamed
fn field_type(field: &str) -> String {
    let field = field.trim();
    let first_bracket = field.find(['<', '(']).unwrap_or(field.len());
    match field[..first_bracket].find(char::is_whitespace) {
        Some(pos) => field[pos..].trim().to_string(),
        None => field.to_string(),
    }
}

/// Split on `delimiter` outside `<>` and `()`
fn split_top_level(s: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => {
                if depth == 0 {
                    log::warn!("Unbalanced closing bracket in type string: {:?}", s);
                } else {
                    depth -= 1;
                }
            }
            c if c == delimiter && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
