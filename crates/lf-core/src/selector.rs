//! Model selection
//!
//! Narrows the manifest's models to the ones views are generated for:
//! - `select` - explicit model names (default: all models)
//! - `exclude` - model names to drop
//! - `tag` - only models carrying the tag
//! - `exposures_only` - only models referenced by an exposure
//! - `exposures_tag` - only exposures carrying the tag are considered

use crate::error::{CoreError, CoreResult};
use crate::manifest::{Manifest, ManifestNode};
use std::collections::HashSet;

/// Criteria for choosing models
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSelection {
    pub select: Vec<String>,
    pub exclude: Vec<String>,
    pub tag: Option<String>,
    pub exposures_only: bool,
    pub exposures_tag: Option<String>,
}

impl ModelSelection {
    /// Parse a comma-separated list of model names
    pub fn parse_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Check the selection for contradictions
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(name) = self.select.iter().find(|n| self.exclude.contains(n)) {
            return Err(CoreError::InvalidSelector {
                selector: name.clone(),
                reason: "model is both selected and excluded".to_string(),
            });
        }
        if self.exposures_tag.is_some() && !self.exposures_only {
            log::debug!("exposures_tag given without exposures_only; enabling exposure filtering");
        }
        if matches!(self.tag.as_deref(), Some("")) {
            return Err(CoreError::InvalidSelector {
                selector: "tag:".to_string(),
                reason: "tag filter requires a value".to_string(),
            });
        }
        Ok(())
    }

    fn uses_exposures(&self) -> bool {
        self.exposures_only || self.exposures_tag.is_some()
    }

    /// Apply the selection to the manifest's enabled models
    ///
    /// Returns the matching nodes sorted by unique id. Explicitly selected
    /// names that do not exist in the manifest are an error.
    pub fn apply<'a>(&self, manifest: &'a Manifest) -> CoreResult<Vec<&'a ManifestNode>> {
        self.validate()?;

        let models = manifest.models();
        let known: HashSet<&str> = models.iter().map(|m| m.name.as_str()).collect();
        for name in &self.select {
            if !known.contains(name.as_str()) {
                return Err(CoreError::ModelNotFound { name: name.clone() });
            }
        }

        let exposed = if self.uses_exposures() {
            Some(exposed_models(manifest, self.exposures_tag.as_deref()))
        } else {
            None
        };

        let selected = models
            .into_iter()
            .filter(|m| self.select.is_empty() || self.select.contains(&m.name))
            .filter(|m| !self.exclude.contains(&m.name))
            .filter(|m| match &self.tag {
                Some(tag) => m.tags.iter().any(|t| t == tag),
                None => true,
            })
            .filter(|m| match &exposed {
                Some(names) => names.contains(m.name.as_str()),
                None => true,
            })
            .collect();
        Ok(selected)
    }
}

/// Names of models referenced by exposures, optionally only exposures with `tag`
pub fn exposed_models<'a>(manifest: &'a Manifest, tag: Option<&str>) -> HashSet<&'a str> {
    manifest
        .exposures
        .values()
        .filter(|e| match tag {
            Some(tag) => e.tags.iter().any(|t| t == tag),
            None => true,
        })
        .flat_map(|e| e.refs.iter().map(|r| r.name.as_str()))
        .collect()
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
