use super::*;

fn manifest() -> Manifest {
    let node = |name: &str, tags: &[&str]| {
        format!(
            r#""model.shop.{name}": {{
                "unique_id": "model.shop.{name}",
                "name": "{name}",
                "resource_type": "model",
                "tags": [{}]
            }}"#,
            tags.iter()
                .map(|t| format!("\"{t}\""))
                .collect::<Vec<_>>()
                .join(",")
        )
    };
    let json = format!(
        r#"{{
            "metadata": {{"adapter_type": "bigquery"}},
            "nodes": {{ {}, {}, {} }},
            "exposures": {{
                "exposure.shop.exec": {{"name": "exec", "refs": [{{"name": "orders"}}], "tags": ["exec"]}},
                "exposure.shop.ops": {{"name": "ops", "refs": [{{"name": "customers"}}], "tags": []}}
            }}
        }}"#,
        node("orders", &["finance", "daily"]),
        node("customers", &["daily"]),
        node("events", &[])
    );
    Manifest::from_json(&json).unwrap()
}

fn names(nodes: &[&ManifestNode]) -> Vec<String> {
    nodes.iter().map(|n| n.name.clone()).collect()
}

#[test]
fn test_default_selects_everything() {
    let manifest = manifest();
    let selected = ModelSelection::default().apply(&manifest).unwrap();
    assert_eq!(names(&selected), vec!["customers", "events", "orders"]);
}

#[test]
fn test_select_and_exclude() {
    let manifest = manifest();
    let selection = ModelSelection {
        select: vec!["orders".into(), "events".into()],
        ..Default::default()
    };
    assert_eq!(names(&selection.apply(&manifest).unwrap()), vec!["events", "orders"]);

    let selection = ModelSelection {
        exclude: vec!["events".into()],
        ..Default::default()
    };
    assert_eq!(
        names(&selection.apply(&manifest).unwrap()),
        vec!["customers", "orders"]
    );
}

#[test]
fn test_tag_filter() {
    let manifest = manifest();
    let selection = ModelSelection {
        tag: Some("daily".into()),
        ..Default::default()
    };
    assert_eq!(
        names(&selection.apply(&manifest).unwrap()),
        vec!["customers", "orders"]
    );
}

#[test]
fn test_exposure_filters() {
    let manifest = manifest();
    let selection = ModelSelection {
        exposures_only: true,
        ..Default::default()
    };
    assert_eq!(
        names(&selection.apply(&manifest).unwrap()),
        vec!["customers", "orders"]
    );

    let selection = ModelSelection {
        exposures_only: true,
        exposures_tag: Some("exec".into()),
        ..Default::default()
    };
    assert_eq!(names(&selection.apply(&manifest).unwrap()), vec!["orders"]);
}

#[test]
fn test_unknown_selected_model_is_error() {
    let manifest = manifest();
    let selection = ModelSelection {
        select: vec!["nope".into()],
        ..Default::default()
    };
    assert!(matches!(
        selection.apply(&manifest),
        Err(CoreError::ModelNotFound { .. })
    ));
}

#[test]
fn test_selected_and_excluded_is_error() {
    let selection = ModelSelection {
        select: vec!["orders".into()],
        exclude: vec!["orders".into()],
        ..Default::default()
    };
    assert!(matches!(
        selection.validate(),
        Err(CoreError::InvalidSelector { .. })
    ));
}

#[test]
fn test_parse_list() {
    assert_eq!(
        ModelSelection::parse_list(" orders, ,customers "),
        vec!["orders".to_string(), "customers".to_string()]
    );
}
