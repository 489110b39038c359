//! View composition
//!
//! Runs the whole pipeline for one model: canonicalize columns, build the
//! hierarchy, classify, assemble collections, materialize fields, resolve
//! conflicts. The result is the principal view plus one view per array
//! within the depth limit.

use crate::classifier::Classifier;
use crate::collections::ColumnCollections;
use crate::column::{canonicalize, Column, ColumnPath};
use crate::conflict::resolve_conflicts;
use crate::dimension::{FieldBuilder, ViewFields};
use crate::error::{ViewError, ViewResult};
use crate::hierarchy::ColumnHierarchy;
use crate::lookml::View;
use crate::measure::{implicit_count, model_measures};
use crate::naming::{nested_view_name, sanitize_identifier};
use lf_core::meta::{MeasureType, Timeframe};
use lf_core::sql_utils::relation_table_name;
use lf_core::{Config, DbtModel, DEFAULT_CONFLICT_SUFFIX, DEFAULT_MAX_NESTED_DEPTH};
use std::collections::BTreeMap;

/// Options that shape the generated views
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Name principal views after the physical table
    pub use_table_name: bool,
    pub custom_timeframes: Vec<Timeframe>,
    pub include_iso_fields: bool,
    pub conflict_suffix: String,
    pub hide_conflicts: bool,
    pub max_nested_depth: usize,
    /// Fail the model on the first invalid element instead of dropping it
    pub strict_validation: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            use_table_name: false,
            custom_timeframes: Vec::new(),
            include_iso_fields: false,
            conflict_suffix: DEFAULT_CONFLICT_SUFFIX.to_string(),
            hide_conflicts: true,
            max_nested_depth: DEFAULT_MAX_NESTED_DEPTH,
            strict_validation: false,
        }
    }
}

impl From<&Config> for ViewOptions {
    fn from(config: &Config) -> Self {
        Self {
            use_table_name: config.use_table_name,
            custom_timeframes: config.custom_timeframes.clone(),
            include_iso_fields: config.include_iso_fields,
            conflict_suffix: config.conflict_suffix.clone(),
            hide_conflicts: config.hide_conflicts,
            max_nested_depth: config.max_nested_depth,
            strict_validation: config.strict_validation,
        }
    }
}

/// A view over the unnested rows of an array
#[derive(Debug, Clone, PartialEq)]
pub struct NestedView {
    pub view: View,

    /// Array path owning the view
    pub owner: ColumnPath,

    /// View holding the anchor dimension this view is unnested from
    pub parent_view: String,

    /// Hidden dimension in `parent_view` referencing the array
    pub anchor_dimension: String,
}

/// All views generated for one model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelViews {
    pub model_name: String,
    pub schema: Option<String>,
    pub principal: View,

    /// Nested views, parents before children
    pub nested: Vec<NestedView>,

    /// Array owners whose views were skipped for depth
    pub skipped_owners: Vec<ColumnPath>,
}

impl ModelViews {
    pub fn views(&self) -> impl Iterator<Item = &View> {
        std::iter::once(&self.principal).chain(self.nested.iter().map(|n| &n.view))
    }

    pub fn view_count(&self) -> usize {
        1 + self.nested.len()
    }
}

/// Name of the principal view of a model
pub fn principal_view_name(model: &DbtModel, options: &ViewOptions) -> String {
    if options.use_table_name {
        sanitize_identifier(&relation_table_name(&model.relation_name))
    } else {
        sanitize_identifier(model.name.as_str())
    }
}

/// Generate the views of one model
pub fn build_model_views(model: &DbtModel, options: &ViewOptions) -> ViewResult<ModelViews> {
    let model_name = model.name.as_str();
    let columns = canonicalize(model_name, &model.columns);
    let hierarchy = ColumnHierarchy::build(&columns);
    let classifier = Classifier::new(&columns, &hierarchy, &[]);
    let collections = ColumnCollections::assemble(&columns, &classifier);

    log::debug!(
        "Model '{}': {} main, {} nested bags, {} excluded",
        model_name,
        collections.main.len(),
        collections.nested.len(),
        collections.excluded.len()
    );

    let principal_name = principal_view_name(model, options);
    let (principal, principal_anchors) =
        build_principal(model, &principal_name, &collections, &classifier, options)?;

    // Array owner -> (parent view, resolved anchor dimension)
    let mut anchors: BTreeMap<ColumnPath, (String, String)> = principal_anchors
        .into_iter()
        .map(|(owner, dimension)| (owner, (principal_name.clone(), dimension)))
        .collect();

    let mut nested = Vec::new();
    let mut skipped_owners = Vec::new();
    for (owner, bag) in &collections.nested {
        let depth = owner.depth();
        if depth > options.max_nested_depth {
            log::info!(
                "{}",
                ViewError::DepthExceeded {
                    owner: owner.to_string(),
                    depth,
                    max: options.max_nested_depth,
                }
            );
            skipped_owners.push(owner.clone());
            continue;
        }
        let Some(array) = bag.get(owner) else {
            log::warn!(
                "Model '{}': array '{}' has no column of its own, skipping its view",
                model_name,
                owner
            );
            continue;
        };
        let Some((parent_view, anchor_dimension)) = anchors.get(owner).cloned() else {
            log::warn!(
                "Model '{}': no anchor dimension for array '{}', skipping its view",
                model_name,
                owner
            );
            continue;
        };
        let (view, child_anchors) = build_nested(
            model_name,
            &principal_name,
            owner,
            array,
            format!("UNNEST(${{{}.{}}})", parent_view, anchor_dimension),
            bag,
            options,
        )?;
        for (child, dimension) in child_anchors {
            anchors.insert(child, (view.name.clone(), dimension));
        }
        nested.push(NestedView {
            view,
            owner: owner.clone(),
            parent_view,
            anchor_dimension,
        });
    }

    Ok(ModelViews {
        model_name: model_name.to_string(),
        schema: model.schema.clone(),
        principal,
        nested,
        skipped_owners,
    })
}

fn build_principal(
    model: &DbtModel,
    name: &str,
    collections: &ColumnCollections,
    classifier: &Classifier<'_>,
    options: &ViewOptions,
) -> ViewResult<(View, BTreeMap<ColumnPath, String>)> {
    let mut view = View::new(name, &model.relation_name);
    let view_meta = model.looker.view.clone().unwrap_or_default();
    view.label = view_meta.label;
    view.description = view_meta.description.or_else(|| model.description.clone());
    view.hidden = view_meta.hidden;
    view.validate()?;

    let mut builder = FieldBuilder::new(options, None);
    for column in collections.main.values() {
        builder.add_column(column);
    }
    let mut anchor_refs = Vec::new();
    for (owner, bag) in &collections.nested {
        if classifier.array_owner_of(owner).is_some() {
            continue;
        }
        if let Some(array) = bag.get(owner) {
            builder.add_anchor(array);
            anchor_refs.push((owner.clone(), builder.sql_ref(array)));
        }
    }

    let mut fields = builder.finish();
    fields.measures.extend(model_measures(&model.looker.measures));
    if !fields
        .measures
        .iter()
        .any(|m| m.measure_type == MeasureType::Count)
    {
        fields.measures.push(implicit_count());
    }

    populate(&mut view, fields, options.strict_validation)?;
    resolve_conflicts(
        &mut view,
        model.name.as_str(),
        &options.conflict_suffix,
        options.hide_conflicts,
    );
    let anchors = resolved_anchors(&view, anchor_refs);
    Ok((view, anchors))
}

fn build_nested(
    model_name: &str,
    principal_name: &str,
    owner: &ColumnPath,
    array: &Column,
    sql_table_name: String,
    bag: &BTreeMap<ColumnPath, Column>,
    options: &ViewOptions,
) -> ViewResult<(View, BTreeMap<ColumnPath, String>)> {
    let name = nested_view_name(principal_name, &array.original_segments());
    let mut view = View::new(&name, sql_table_name);
    view.description = array.description.clone();

    let mut builder = FieldBuilder::new(options, Some(owner));
    builder.add_element(array, bag.len() > 1);
    let mut anchor_refs = Vec::new();
    for (path, column) in bag {
        if path == owner {
            continue;
        }
        if column.is_array() {
            builder.add_anchor(column);
            anchor_refs.push((path.clone(), builder.sql_ref(column)));
        } else {
            builder.add_column(column);
        }
    }

    populate(&mut view, builder.finish(), options.strict_validation)?;
    resolve_conflicts(
        &mut view,
        model_name,
        &options.conflict_suffix,
        options.hide_conflicts,
    );
    let anchors = resolved_anchors(&view, anchor_refs);
    Ok((view, anchors))
}

/// Final names of the anchor dimensions after conflict resolution
///
/// Anchors are found by their SQL reference, which is unique per column.
fn resolved_anchors(
    view: &View,
    anchor_refs: Vec<(ColumnPath, String)>,
) -> BTreeMap<ColumnPath, String> {
    anchor_refs
        .into_iter()
        .filter_map(|(owner, sql)| {
            view.dimensions
                .iter()
                .find(|d| d.sql == sql)
                .map(|d| (owner, d.name.clone()))
        })
        .collect()
}

/// Move validated fields into the view
fn populate(view: &mut View, fields: ViewFields, strict: bool) -> ViewResult<()> {
    let name = view.name.clone();
    view.dimensions = retain_valid(fields.dimensions, strict, |d| d.validate(&name))?;
    view.dimension_groups = retain_valid(fields.dimension_groups, strict, |g| g.validate(&name))?;
    view.measures = retain_valid(fields.measures, strict, |m| m.validate(&name))?;
    Ok(())
}

fn retain_valid<T>(
    items: Vec<T>,
    strict: bool,
    check: impl Fn(&T) -> ViewResult<()>,
) -> ViewResult<Vec<T>> {
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        match check(&item) {
            Ok(()) => kept.push(item),
            Err(err) if strict => return Err(err),
            Err(err) => log::warn!("{}; dropping it", err),
        }
    }
    Ok(kept)
}

#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;
