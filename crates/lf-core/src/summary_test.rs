use super::*;
use tempfile::TempDir;

#[test]
fn test_new_summary() {
    let summary = GenerationSummary::new();
    assert_eq!(summary.run_id.len(), 8);
    assert_eq!(summary.files_generated, 0);
    assert!(summary.is_success());
    assert!(summary.elapsed_secs().is_none());
}

#[test]
fn test_mark_ok_and_failed() {
    let mut summary = GenerationSummary::new();
    summary.mark_ok("orders", 3, Path::new("out/orders.view.lkml"), 12);
    summary.mark_ok("customers", 1, Path::new("out/customers.view.lkml"), 4);
    summary.mark_failed("events", "[V001] invalid view");
    summary.finish();

    assert_eq!(summary.files_generated, 2);
    assert_eq!(summary.models_ok[0].name, "customers");
    assert_eq!(summary.models_ok[1].views, 3);
    assert_eq!(summary.models_failed[0].reason, "[V001] invalid view");
    assert!(!summary.is_success());
    assert!(summary.elapsed_secs().is_some());
}

#[test]
fn test_cancelled_is_not_success() {
    let mut summary = GenerationSummary::new();
    summary.mark_cancelled();
    assert!(!summary.is_success());
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports/summary.json");

    let mut summary = GenerationSummary::new();
    summary.mark_ok("orders", 2, Path::new("out/orders.view.lkml"), 7);
    summary.finish();
    summary.save(&path).unwrap();

    assert!(!path.with_extension("json.tmp").exists());
    let loaded = GenerationSummary::load(&path).unwrap().unwrap();
    assert_eq!(loaded.run_id, summary.run_id);
    assert_eq!(loaded.files_generated, 1);
    assert_eq!(loaded.models_ok[0].path, "out/orders.view.lkml");
}

#[test]
fn test_load_missing() {
    let dir = TempDir::new().unwrap();
    assert!(GenerationSummary::load(&dir.path().join("none.json"))
        .unwrap()
        .is_none());
}
