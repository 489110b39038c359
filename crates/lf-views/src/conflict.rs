//! Dimension name conflicts
//!
//! A dimension group named `created` owns `created`, `created_date`,
//! `created_week` and so on. A plain dimension whose name falls in that
//! set is renamed with the conflict suffix and (by default) hidden.

use crate::error::ViewError;
use crate::lookml::{DimensionGroup, View};
use std::collections::HashSet;

/// Names generated by the view's dimension groups
pub fn reserved_names(groups: &[DimensionGroup]) -> HashSet<String> {
    groups.iter().flat_map(|g| g.generated_names()).collect()
}

/// Rename dimensions that collide with dimension group names
///
/// Dimension groups are never modified. Duplicate plain dimension names
/// are made unique with a numeric suffix. Returns the number of renamed
/// dimensions.
pub fn resolve_conflicts(view: &mut View, model: &str, suffix: &str, hide: bool) -> usize {
    let reserved = reserved_names(&view.dimension_groups);
    let mut taken: HashSet<String> = view.dimensions.iter().map(|d| d.name.clone()).collect();
    let mut renamed = 0;

    for dimension in view.dimensions.iter_mut() {
        if !reserved.contains(&dimension.name) {
            continue;
        }
        let original = dimension.name.clone();
        let mut resolved = format!("{original}{suffix}");
        if reserved.contains(&resolved) || taken.contains(&resolved) {
            let base = resolved.clone();
            resolved = next_free(&base, |n| reserved.contains(n) || taken.contains(n));
            log::warn!(
                "{}",
                ViewError::NameCollision {
                    name: original.clone(),
                    view: view.name.clone(),
                    suffix: suffix.to_string(),
                    resolved: resolved.clone(),
                }
            );
        }
        log::info!(
            "Model '{}': dimension '{}' in view '{}' collides with a dimension group, renamed to '{}'",
            model,
            original,
            view.name,
            resolved
        );

        taken.insert(resolved.clone());
        dimension.name = resolved;
        if hide {
            dimension.hidden = Some(true);
        }
        renamed += 1;
    }

    let mut seen: HashSet<String> = HashSet::new();
    for dimension in view.dimensions.iter_mut() {
        if seen.insert(dimension.name.clone()) {
            continue;
        }
        let resolved = next_free(&dimension.name, |n| {
            reserved.contains(n) || taken.contains(n) || seen.contains(n)
        });
        log::warn!(
            "Model '{}': duplicate dimension '{}' in view '{}', renamed to '{}'",
            model,
            dimension.name,
            view.name,
            resolved
        );
        taken.insert(resolved.clone());
        seen.insert(resolved.clone());
        dimension.name = resolved;
        renamed += 1;
    }

    renamed
}

/// First `<base>_<n>` (n >= 2) not rejected by `is_taken`
fn next_free(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
#[path = "conflict_test.rs"]
mod tests;
